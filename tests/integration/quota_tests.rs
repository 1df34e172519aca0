//! Quota tracking through the public API
//!
//! Local and durable trackers, store fallback and the rolling window.

#[cfg(test)]
mod tests {
    use crate::common::{FailingStore, SlowStore};
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use errexplain::core::clock::ManualClock;
    use errexplain::core::identity::ClientIdentity;
    use errexplain::core::quota::{
        DurableQuotaTracker, LocalQuotaTracker, QuotaPolicy, QuotaTracker, build_tracker,
    };
    use errexplain::storage::{MemoryStore, QuotaStore};
    use std::sync::Arc;
    use std::time::Duration;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
    }

    fn durable(store: Arc<dyn QuotaStore>, clock: &ManualClock) -> DurableQuotaTracker {
        DurableQuotaTracker::new(
            store,
            QuotaPolicy::default(),
            Arc::new(clock.clone()),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn test_rolling_window_reopens_one_slot_at_a_time() {
        let clock = clock();
        let tracker = LocalQuotaTracker::new(QuotaPolicy::default(), Arc::new(clock.clone()));
        let client = ClientIdentity::from_raw("rolling");

        // One request per hour
        for _ in 0..5 {
            assert!(tracker.check_and_reserve(&client).await.allowed);
            clock.advance(ChronoDuration::hours(1));
        }
        assert!(!tracker.check_and_reserve(&client).await.allowed);

        // The first request leaves the window 24h after it was made
        clock.set(Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());
        let decision = tracker.check_and_reserve(&client).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert!(!tracker.check_and_reserve(&client).await.allowed);
    }

    #[tokio::test]
    async fn test_durable_tracker_shares_state_through_store() {
        let clock = clock();
        let store = Arc::new(MemoryStore::new());
        let first = durable(store.clone(), &clock);
        let second = durable(store, &clock);
        let client = ClientIdentity::from_raw("shared");

        for _ in 0..3 {
            assert!(first.check_and_reserve(&client).await.allowed);
        }
        for _ in 0..2 {
            assert!(second.check_and_reserve(&client).await.allowed);
        }
        assert!(!first.check_and_reserve(&client).await.allowed);
        assert_eq!(second.peek(&client).await.remaining, 0);
    }

    #[tokio::test]
    async fn test_failing_store_falls_back_to_local_limit() {
        let clock = clock();
        let tracker = durable(Arc::new(FailingStore), &clock);
        let client = ClientIdentity::from_raw("fallback");

        for expected in (0..5).rev() {
            let decision = tracker.check_and_reserve(&client).await;
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected);
        }
        assert!(!tracker.check_and_reserve(&client).await.allowed);
        assert_eq!(tracker.fallback().tracked_clients(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_store_times_out_to_fallback() {
        let clock = clock();
        let tracker = durable(
            Arc::new(SlowStore {
                delay: Duration::from_secs(30),
            }),
            &clock,
        );
        let client = ClientIdentity::from_raw("stalled");

        let decision = tracker.check_and_reserve(&client).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
        assert_eq!(tracker.peek(&client).await.remaining, 4);
    }

    #[tokio::test]
    async fn test_build_tracker_picks_backend() {
        let clock: Arc<ManualClock> = Arc::new(clock());
        let local = build_tracker(
            None,
            QuotaPolicy::default(),
            clock.clone(),
            Duration::from_secs(1),
        );
        assert_eq!(local.backend(), "local");

        let durable = build_tracker(
            Some(Arc::new(MemoryStore::new())),
            QuotaPolicy::default(),
            clock,
            Duration::from_secs(1),
        );
        assert_eq!(durable.backend(), "durable");
        assert_eq!(durable.policy().max_requests, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reserves_never_exceed_cap() {
        let clock = clock();
        let tracker: Arc<dyn QuotaTracker> =
            Arc::new(durable(Arc::new(MemoryStore::new()), &clock));
        let client = ClientIdentity::from_raw("burst");

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let tracker = tracker.clone();
                let client = client.clone();
                tokio::spawn(async move { tracker.check_and_reserve(&client).await.allowed })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 5);
    }
}
