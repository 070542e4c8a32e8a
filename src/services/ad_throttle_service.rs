//! Interstitial throttling.
//!
//! A single persisted counter pair decides how often free readers see an
//! ad: `chapters_read` advances on every finished chapter, `last_ad_shown`
//! is checkpointed to it whenever an ad is actually displayed. The counter
//! is global across ads, so showing any ad resets the countdown for all of
//! them.

use crate::errors::AppResult;
use crate::models::ad_model::Ad;
use crate::services::tracker_store::TrackerStore;
use std::sync::Arc;

pub struct AdThrottleService {
    store: Arc<dyn TrackerStore>,
}

impl AdThrottleService {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    /// Records one finished chapter and returns the new total.
    ///
    /// Call once per chapter-finish event, and only for non-premium
    /// readers; premium readers are never tracked.
    pub async fn increment_chapters_read(&self) -> AppResult<i64> {
        let mut tracker = self.store.load().await?;
        tracker.chapters_read += 1;
        self.store.save(tracker).await?;

        tracing::debug!(chapters_read = tracker.chapters_read, "Chapter read recorded");
        Ok(tracker.chapters_read)
    }

    /// Whether `ad` should interrupt the reader now. Read-only: calling it
    /// repeatedly without a mutation in between gives the same answer.
    pub async fn should_show_ad(&self, ad: &Ad, is_premium: bool) -> AppResult<bool> {
        if is_premium || !ad.is_active {
            return Ok(false);
        }

        let tracker = self.store.load().await?;
        let threshold = ad.show_frequency.chapters_between_shows();

        Ok(tracker.chapters_since_last_ad() >= threshold)
    }

    /// Checkpoints the counter after an ad was actually displayed. Must be
    /// called exactly once per ad shown; calling it without showing one
    /// silently restarts the countdown.
    pub async fn mark_ad_shown(&self) -> AppResult<()> {
        let mut tracker = self.store.load().await?;
        tracker.last_ad_shown = tracker.chapters_read;
        self.store.save(tracker).await?;

        tracing::debug!(last_ad_shown = tracker.last_ad_shown, "Ad display checkpointed");
        Ok(())
    }

    /// Factory-reset of the throttle. Idempotent.
    pub async fn reset(&self) -> AppResult<()> {
        self.store.clear().await?;
        tracing::info!("Ad tracker reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ad_model::{Ad, ShowFrequency};
    use crate::models::tracker_model::AdTracker;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    struct MemoryTrackerStore {
        record: Mutex<Option<AdTracker>>,
    }

    impl MemoryTrackerStore {
        fn empty() -> Arc<Self> {
            Arc::new(Self {
                record: Mutex::new(None),
            })
        }

        fn with(tracker: AdTracker) -> Arc<Self> {
            Arc::new(Self {
                record: Mutex::new(Some(tracker)),
            })
        }

        fn snapshot(&self) -> Option<AdTracker> {
            *self.record.lock().unwrap()
        }
    }

    #[async_trait]
    impl TrackerStore for MemoryTrackerStore {
        async fn load(&self) -> AppResult<AdTracker> {
            Ok(self.record.lock().unwrap().unwrap_or_default().clamped())
        }

        async fn save(&self, tracker: AdTracker) -> AppResult<()> {
            *self.record.lock().unwrap() = Some(tracker);
            Ok(())
        }

        async fn clear(&self) -> AppResult<()> {
            *self.record.lock().unwrap() = None;
            Ok(())
        }
    }

    fn ad(is_active: bool, show_frequency: ShowFrequency) -> Ad {
        Ad {
            id: "ad-1".to_string(),
            title: "Go Premium".to_string(),
            description: "Ad-free reading and early access".to_string(),
            image_url: "https://cdn.example.com/ad.jpg".to_string(),
            link_url: "#premium".to_string(),
            button_text: "Upgrade".to_string(),
            is_active,
            show_frequency,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn premium_readers_never_see_ads() {
        let store = MemoryTrackerStore::with(AdTracker {
            chapters_read: 100,
            last_ad_shown: 0,
        });
        let throttle = AdThrottleService::new(store);

        let eligible = throttle
            .should_show_ad(&ad(true, ShowFrequency::Every), true)
            .await
            .unwrap();
        assert!(!eligible);
    }

    #[tokio::test]
    async fn inactive_ads_are_never_shown() {
        let store = MemoryTrackerStore::with(AdTracker {
            chapters_read: 100,
            last_ad_shown: 0,
        });
        let throttle = AdThrottleService::new(store);

        let eligible = throttle
            .should_show_ad(&ad(false, ShowFrequency::Every), false)
            .await
            .unwrap();
        assert!(!eligible);
    }

    #[tokio::test]
    async fn every_2_ad_waits_for_two_chapters() {
        let throttle = AdThrottleService::new(MemoryTrackerStore::empty());
        let ad = ad(true, ShowFrequency::Every2);

        assert_eq!(throttle.increment_chapters_read().await.unwrap(), 1);
        assert!(!throttle.should_show_ad(&ad, false).await.unwrap());

        assert_eq!(throttle.increment_chapters_read().await.unwrap(), 2);
        assert!(throttle.should_show_ad(&ad, false).await.unwrap());
    }

    #[tokio::test]
    async fn mark_ad_shown_checkpoints_and_suppresses() {
        let store = MemoryTrackerStore::empty();
        let throttle = AdThrottleService::new(store.clone());
        let ad = ad(true, ShowFrequency::Every2);

        throttle.increment_chapters_read().await.unwrap();
        throttle.increment_chapters_read().await.unwrap();
        assert!(throttle.should_show_ad(&ad, false).await.unwrap());

        throttle.mark_ad_shown().await.unwrap();

        let tracker = store.snapshot().unwrap();
        assert_eq!(tracker.last_ad_shown, 2);
        assert!(!throttle.should_show_ad(&ad, false).await.unwrap());
    }

    #[tokio::test]
    async fn should_show_ad_does_not_mutate_state() {
        let store = MemoryTrackerStore::with(AdTracker {
            chapters_read: 5,
            last_ad_shown: 0,
        });
        let throttle = AdThrottleService::new(store.clone());
        let ad = ad(true, ShowFrequency::Every5);

        for _ in 0..4 {
            assert!(throttle.should_show_ad(&ad, false).await.unwrap());
        }
        assert_eq!(
            store.snapshot().unwrap(),
            AdTracker {
                chapters_read: 5,
                last_ad_shown: 0,
            }
        );
    }

    #[tokio::test]
    async fn reset_clears_to_defaults_and_is_idempotent() {
        let store = MemoryTrackerStore::with(AdTracker {
            chapters_read: 7,
            last_ad_shown: 4,
        });
        let throttle = AdThrottleService::new(store.clone());

        throttle.reset().await.unwrap();
        throttle.reset().await.unwrap();

        assert_eq!(store.load().await.unwrap(), AdTracker::default());
    }

    #[tokio::test]
    async fn corrupted_counters_are_repaired_on_load() {
        let store = MemoryTrackerStore::with(AdTracker {
            chapters_read: -4,
            last_ad_shown: -9,
        });
        let throttle = AdThrottleService::new(store);
        let ad = ad(true, ShowFrequency::Every);

        // Repaired to {0, 0}: one more chapter makes an every-chapter ad due.
        assert!(!throttle.should_show_ad(&ad, false).await.unwrap());
        assert_eq!(throttle.increment_chapters_read().await.unwrap(), 1);
        assert!(throttle.should_show_ad(&ad, false).await.unwrap());
    }
}
