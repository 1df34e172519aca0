//! Redis storage implementation
//!
//! Quota records live in one sorted set per client, scored by request time in
//! milliseconds. Redis never holds submissions.
//!
//! ## Module Structure
//!
//! - `pool` - Lazily (re)connected multiplexed connection and health checks
//! - `quota` - Atomic check-and-reserve script and record loading

mod pool;
mod quota;

pub use pool::RedisPool;
pub use quota::RedisQuotaStore;
