use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Error submission database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Submission ID (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner identity
    pub client_id: String,

    /// Submitted error text
    #[sea_orm(column_type = "Text")]
    pub error_message: String,

    /// Declared language
    pub language: String,

    /// Model explanation
    #[sea_orm(column_type = "Text")]
    pub explanation: String,

    /// Likely causes (JSON string array)
    pub causes: Json,

    /// Suggested fixes (JSON string array)
    pub solutions: Json,

    /// low | medium | high
    pub severity: String,

    /// Error category
    pub category: String,

    /// Optional corrected code
    #[sea_orm(column_type = "Text", nullable)]
    pub example_code: Option<String>,

    /// Hidden from sharing
    pub is_private: bool,

    /// Published under `share_id`
    pub is_shared: bool,

    /// Public share identifier
    #[sea_orm(unique)]
    pub share_id: Option<String>,

    /// When the submission was shared
    pub shared_at: Option<DateTimeUtc>,

    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
