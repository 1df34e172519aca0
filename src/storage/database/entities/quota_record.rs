use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quota record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "quota_records")]
pub struct Model {
    /// Client identity
    #[sea_orm(primary_key, auto_increment = false)]
    pub client_id: String,

    /// Admitted request times as Unix milliseconds, oldest first
    pub requests: Json,

    /// Oldest retained request after the last admit
    pub last_reset: DateTimeUtc,

    /// Optimistic concurrency version
    pub version: i64,

    /// Last write
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
