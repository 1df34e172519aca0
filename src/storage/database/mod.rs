//! Database storage implementation using SeaORM
//!
//! Quota records and submissions live in SQLite or PostgreSQL, selected by
//! the database URL.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{reserve_attempts, DatabaseBackendType, MIN_RESERVE_ATTEMPTS};
