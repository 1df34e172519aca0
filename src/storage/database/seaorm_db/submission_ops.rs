use crate::core::analysis::{DEFAULT_CATEGORY, Severity};
use crate::core::identity::ClientIdentity;
use crate::core::submissions::SubmissionRecord;
use crate::storage::traits::{StorageResult, SubmissionFilter, SubmissionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::{debug, warn};

use super::super::entities::{self, submission};
use super::types::SeaOrmDatabase;

fn string_list(value: serde_json::Value, id: &str, field: &str) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(submission = id, field, "Unreadable stored list: {}", e);
        Vec::new()
    })
}

impl From<submission::Model> for SubmissionRecord {
    fn from(model: submission::Model) -> Self {
        let severity = model.severity.parse::<Severity>().unwrap_or_default();
        let category = if model.category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            model.category
        };

        Self {
            causes: string_list(model.causes, &model.id, "causes"),
            solutions: string_list(model.solutions, &model.id, "solutions"),
            id: model.id,
            client_id: ClientIdentity::from_raw(model.client_id),
            error_message: model.error_message,
            language: model.language,
            explanation: model.explanation,
            severity,
            category,
            example_code: model.example_code,
            is_private: model.is_private,
            is_shared: model.is_shared,
            share_id: model.share_id,
            shared_at: model.shared_at,
            created_at: model.created_at,
        }
    }
}

impl From<&SubmissionRecord> for submission::ActiveModel {
    fn from(record: &SubmissionRecord) -> Self {
        Self {
            id: Set(record.id.clone()),
            client_id: Set(record.client_id.as_str().to_string()),
            error_message: Set(record.error_message.clone()),
            language: Set(record.language.clone()),
            explanation: Set(record.explanation.clone()),
            causes: Set(serde_json::Value::from(record.causes.clone())),
            solutions: Set(serde_json::Value::from(record.solutions.clone())),
            severity: Set(record.severity.as_str().to_string()),
            category: Set(record.category.clone()),
            example_code: Set(record.example_code.clone()),
            is_private: Set(record.is_private),
            is_shared: Set(record.is_shared),
            share_id: Set(record.share_id.clone()),
            shared_at: Set(record.shared_at),
            created_at: Set(record.created_at),
        }
    }
}

#[async_trait]
impl SubmissionStore for SeaOrmDatabase {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn create(&self, record: &SubmissionRecord) -> StorageResult<()> {
        debug!("Creating submission: {}", record.id);

        entities::Submission::insert(submission::ActiveModel::from(record))
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<SubmissionRecord>> {
        let model = entities::Submission::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(SubmissionRecord::from))
    }

    async fn find_by_share_id(&self, share_id: &str) -> StorageResult<Option<SubmissionRecord>> {
        let model = entities::Submission::find()
            .filter(submission::Column::ShareId.eq(share_id))
            .one(&self.db)
            .await?;
        Ok(model.map(SubmissionRecord::from))
    }

    async fn mark_shared(
        &self,
        id: &str,
        share_id: &str,
        shared_at: DateTime<Utc>,
    ) -> StorageResult<bool> {
        debug!("Sharing submission {} as {}", id, share_id);

        let result = entities::Submission::update_many()
            .col_expr(submission::Column::IsShared, Expr::value(true))
            .col_expr(submission::Column::ShareId, Expr::value(share_id))
            .col_expr(submission::Column::SharedAt, Expr::value(shared_at))
            .filter(submission::Column::Id.eq(id))
            .filter(submission::Column::IsShared.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn list(&self, filter: &SubmissionFilter) -> StorageResult<Vec<SubmissionRecord>> {
        let mut query = entities::Submission::find();
        if let Some(client) = &filter.client_id {
            query = query.filter(submission::Column::ClientId.eq(client.as_str()));
        }
        if let Some(since) = filter.since {
            query = query.filter(submission::Column::CreatedAt.gte(since));
        }
        if let Some(until) = filter.until {
            query = query.filter(submission::Column::CreatedAt.lte(until));
        }

        let models = query
            .order_by_desc(submission::Column::CreatedAt)
            .limit(filter.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(SubmissionRecord::from).collect())
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let result = entities::Submission::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
