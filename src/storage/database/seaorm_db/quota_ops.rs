use crate::core::identity::ClientIdentity;
use crate::core::quota::{QuotaDecision, QuotaPolicy, QuotaRecord};
use crate::storage::traits::{QuotaStore, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, quota_record};
use super::types::SeaOrmDatabase;

/// Lower bound on optimistic write attempts before a reserve gives up
pub const MIN_RESERVE_ATTEMPTS: u32 = 8;

/// Attempts allowed for one reserve under `policy`.
///
/// Every lost race is another writer's admission, so after `max_requests`
/// losses the record is full and the next attempt denies without writing.
pub fn reserve_attempts(policy: &QuotaPolicy) -> u32 {
    policy
        .max_requests
        .saturating_add(1)
        .max(MIN_RESERVE_ATTEMPTS)
}

fn encode_requests(requests: &[DateTime<Utc>]) -> serde_json::Value {
    serde_json::Value::from(
        requests
            .iter()
            .map(|t| t.timestamp_millis())
            .collect::<Vec<i64>>(),
    )
}

fn to_domain(model: &quota_record::Model) -> StorageResult<QuotaRecord> {
    let millis: Vec<i64> = serde_json::from_value(model.requests.clone())?;
    let mut requests = millis
        .into_iter()
        .map(|ms| {
            DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| {
                StorageError::Corrupt(format!(
                    "quota record {} has an out-of-range timestamp",
                    model.client_id
                ))
            })
        })
        .collect::<StorageResult<Vec<_>>>()?;
    requests.sort();

    Ok(QuotaRecord {
        client_id: ClientIdentity::from_raw(model.client_id.clone()),
        requests,
        last_reset: model.last_reset,
    })
}

impl SeaOrmDatabase {
    /// Insert a first record; `Ok(false)` when another writer got there first
    async fn insert_quota_record(
        &self,
        record: &QuotaRecord,
        now: DateTime<Utc>,
    ) -> StorageResult<bool> {
        let active_model = quota_record::ActiveModel {
            client_id: Set(record.client_id.as_str().to_string()),
            requests: Set(encode_requests(&record.requests)),
            last_reset: Set(record.last_reset),
            version: Set(1),
            updated_at: Set(now),
        };

        let result = entities::QuotaRecord::insert(active_model)
            .on_conflict(
                OnConflict::column(quota_record::Column::ClientId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;

        match result {
            Ok(0) | Err(DbErr::RecordNotInserted) => Ok(false),
            Ok(_) => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the record if it is still at `version`
    async fn update_quota_record(
        &self,
        record: &QuotaRecord,
        version: i64,
        now: DateTime<Utc>,
    ) -> StorageResult<bool> {
        let result = entities::QuotaRecord::update_many()
            .col_expr(
                quota_record::Column::Requests,
                Expr::value(encode_requests(&record.requests)),
            )
            .col_expr(quota_record::Column::LastReset, Expr::value(record.last_reset))
            .col_expr(quota_record::Column::Version, Expr::value(version + 1))
            .col_expr(quota_record::Column::UpdatedAt, Expr::value(now))
            .filter(quota_record::Column::ClientId.eq(record.client_id.as_str()))
            .filter(quota_record::Column::Version.eq(version))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[async_trait]
impl QuotaStore for SeaOrmDatabase {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn load(&self, client: &ClientIdentity) -> StorageResult<Option<QuotaRecord>> {
        let model = entities::QuotaRecord::find_by_id(client.as_str().to_string())
            .one(&self.db)
            .await?;
        model.as_ref().map(to_domain).transpose()
    }

    async fn reserve(
        &self,
        client: &ClientIdentity,
        now: DateTime<Utc>,
        policy: &QuotaPolicy,
    ) -> StorageResult<QuotaDecision> {
        let attempts = reserve_attempts(policy);
        for attempt in 1..=attempts {
            let existing = entities::QuotaRecord::find_by_id(client.as_str().to_string())
                .one(&self.db)
                .await?;

            let written = match existing {
                None => {
                    let mut record = QuotaRecord::new(client.clone(), now);
                    let decision = record.try_admit(now, policy);
                    self.insert_quota_record(&record, now)
                        .await?
                        .then_some(decision)
                }
                Some(model) => {
                    let mut record = to_domain(&model)?;
                    let decision = record.try_admit(now, policy);
                    if !decision.allowed {
                        return Ok(decision);
                    }
                    self.update_quota_record(&record, model.version, now)
                        .await?
                        .then_some(decision)
                }
            };

            if let Some(decision) = written {
                return Ok(decision);
            }
            debug!(client = %client, attempt, "Quota record changed concurrently, retrying");
        }

        Err(StorageError::Conflict(format!(
            "quota record for {} still contended after {} attempts",
            client, attempts
        )))
    }
}
