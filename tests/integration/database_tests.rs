//! Database store integration tests
//!
//! SeaORM stores over in-memory SQLite, driven through the store traits and
//! the durable quota tracker.

#[cfg(test)]
mod tests {
    use crate::common::{SubmissionFactory, TestDatabase};
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use errexplain::config::{DatabaseConfig, StorageConfig};
    use errexplain::core::clock::{Clock, ManualClock};
    use errexplain::core::identity::ClientIdentity;
    use errexplain::core::quota::{DurableQuotaTracker, QuotaPolicy, QuotaTracker};
    use errexplain::storage::database::{reserve_attempts, MIN_RESERVE_ATTEMPTS};
    use errexplain::storage::{
        QuotaStore, StorageLayer, StorageMode, SubmissionFilter, SubmissionStore,
    };
    use std::sync::Arc;
    use std::time::Duration;

    // ==================== Quota Records ====================

    #[tokio::test]
    async fn test_tracker_over_database() {
        let test_db = TestDatabase::new().await;
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap());
        let tracker = DurableQuotaTracker::new(
            test_db.db_arc(),
            QuotaPolicy::default(),
            Arc::new(clock.clone()),
            Duration::from_secs(5),
        );
        let client = ClientIdentity::from_raw("db_client");

        for expected in (0..5).rev() {
            let decision = tracker.check_and_reserve(&client).await;
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected);
        }
        let denied = tracker.check_and_reserve(&client).await;
        assert!(!denied.allowed);
        assert_eq!(
            denied.reset_time,
            Utc.with_ymd_and_hms(2025, 4, 2, 12, 0, 0).unwrap()
        );

        let status = tracker.peek(&client).await;
        assert_eq!(status.remaining, 0);
        assert!(!status.can_analyze);

        clock.advance(ChronoDuration::hours(24));
        assert_eq!(tracker.peek(&client).await.remaining, 5);
        assert!(tracker.check_and_reserve(&client).await.allowed);
    }

    #[tokio::test]
    async fn test_quota_record_persists_between_loads() {
        let test_db = TestDatabase::new().await;
        let store = test_db.db();
        let client = ClientIdentity::from_raw("persisted");
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap();
        let policy = QuotaPolicy::default();

        store.reserve(&client, now, &policy).await.unwrap();
        store
            .reserve(&client, now + ChronoDuration::minutes(5), &policy)
            .await
            .unwrap();

        let record = store.load(&client).await.unwrap().unwrap();
        assert_eq!(record.requests.len(), 2);
        assert_eq!(record.requests[0], now);
        assert_eq!(record.client_id, client);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reserves_admit_exactly_cap() {
        let test_db = TestDatabase::new().await;
        let client = ClientIdentity::from_raw("db_burst");
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap();

        let mut handles = Vec::new();
        for _ in 0..12 {
            let store = test_db.db_arc();
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                let policy = QuotaPolicy::default();
                loop {
                    match store.reserve(&client, now, &policy).await {
                        Ok(decision) => return decision.allowed,
                        Err(errexplain::storage::StorageError::Conflict(_)) => continue,
                        Err(e) => panic!("unexpected store error: {e}"),
                    }
                }
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 5);

        let record = test_db.db().load(&client).await.unwrap().unwrap();
        assert_eq!(record.requests.len(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_contended_tracker_never_exceeds_large_cap() {
        let test_db = TestDatabase::new().await;
        let policy = QuotaPolicy::new(20, ChronoDuration::days(1));
        let tracker = Arc::new(DurableQuotaTracker::new(
            test_db.db_arc(),
            policy,
            Arc::new(ManualClock::new(
                Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
            )),
            Duration::from_secs(30),
        ));
        let client = ClientIdentity::from_raw("db_large_burst");

        let mut handles = Vec::new();
        for _ in 0..60 {
            let tracker = Arc::clone(&tracker);
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                tracker.check_and_reserve(&client).await.allowed
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 20);
        assert_eq!(tracker.fallback().tracked_clients(), 0);

        let record = test_db.db().load(&client).await.unwrap().unwrap();
        assert_eq!(record.requests.len(), 20);
    }

    #[test]
    fn test_reserve_attempts_cover_the_cap() {
        let day = ChronoDuration::days(1);
        assert_eq!(
            reserve_attempts(&QuotaPolicy::default()),
            MIN_RESERVE_ATTEMPTS
        );
        assert_eq!(reserve_attempts(&QuotaPolicy::new(20, day)), 21);
        assert_eq!(reserve_attempts(&QuotaPolicy::new(u32::MAX, day)), u32::MAX);
    }

    // ==================== Submissions ====================

    #[tokio::test]
    async fn test_submission_round_trip_and_share() {
        let test_db = TestDatabase::new().await;
        let store = test_db.db();
        let owner = ClientIdentity::from_raw("owner");
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap());

        let record = SubmissionFactory::owned_by(&owner, clock.now());
        store.create(&record).await.unwrap();

        let loaded = store.get(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded.client_id, owner);
        assert_eq!(loaded.causes, record.causes);
        assert_eq!(loaded.severity, record.severity);
        assert_eq!(loaded.example_code, record.example_code);
        assert!(!loaded.is_shared);

        assert!(store.mark_shared(&record.id, "share1", clock.now()).await.unwrap());
        assert!(!store.mark_shared(&record.id, "share2", clock.now()).await.unwrap());

        let shared = store.find_by_share_id("share1").await.unwrap().unwrap();
        assert_eq!(shared.id, record.id);
        assert!(shared.is_shared);
        assert!(store.find_by_share_id("share2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_private_flag_survives_storage() {
        let test_db = TestDatabase::new().await;
        let store = test_db.db();
        let owner = ClientIdentity::from_raw("owner");

        let record = SubmissionFactory::private(&owner, Utc::now());
        store.create(&record).await.unwrap();
        assert!(store.get(&record.id).await.unwrap().unwrap().is_private);
    }

    #[tokio::test]
    async fn test_history_listing_is_scoped_and_ordered() {
        let test_db = TestDatabase::new().await;
        let store = test_db.db();
        let owner = ClientIdentity::from_raw("owner");
        let other = ClientIdentity::from_raw("other");
        let start = Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap();

        for hour in 0..4 {
            store
                .create(&SubmissionFactory::owned_by(
                    &owner,
                    start + ChronoDuration::hours(hour),
                ))
                .await
                .unwrap();
        }
        store
            .create(&SubmissionFactory::owned_by(&other, start))
            .await
            .unwrap();

        let listed = store
            .list(&SubmissionFilter::for_client(&owner, 3))
            .await
            .unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].created_at, start + ChronoDuration::hours(3));
        assert!(listed.iter().all(|r| r.client_id == owner));

        let newest = listed[0].id.clone();
        assert!(store.delete(&newest).await.unwrap());
        assert!(!store.delete(&newest).await.unwrap());
    }

    // ==================== Storage Layer ====================

    #[tokio::test]
    async fn test_storage_layer_with_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("errexplain.db").display());
        let config = StorageConfig {
            database: Some(DatabaseConfig::with_url(url)),
            ..StorageConfig::default()
        };

        let layer = StorageLayer::new(&config).await.unwrap();
        assert_eq!(layer.mode, StorageMode::Database);
        assert_eq!(layer.quota.as_ref().unwrap().name(), "database");
        assert!(layer.submissions.is_some());
        assert!(layer.health_check().await.is_ok());
    }
}
