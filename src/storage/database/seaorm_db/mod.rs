// Module declarations
mod connection;
mod quota_ops;
mod submission_ops;
mod types;


pub use quota_ops::{reserve_attempts, MIN_RESERVE_ATTEMPTS};
pub use types::{DatabaseBackendType, SeaOrmDatabase};
