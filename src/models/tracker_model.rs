use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Global ad-throttle bookkeeping. One record per installation.
///
/// `last_ad_shown` is a checkpoint of `chapters_read` taken when an ad was
/// last presented, not a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, FromRow)]
pub struct AdTracker {
    pub chapters_read: i64,
    pub last_ad_shown: i64,
}

impl AdTracker {
    /// Repairs a tracker loaded from untrusted local storage: negative
    /// counters become 0 and the checkpoint is capped at `chapters_read`.
    pub fn clamped(self) -> Self {
        let chapters_read = self.chapters_read.max(0);
        let last_ad_shown = self.last_ad_shown.max(0).min(chapters_read);
        Self {
            chapters_read,
            last_ad_shown,
        }
    }

    pub fn chapters_since_last_ad(&self) -> i64 {
        self.chapters_read - self.last_ad_shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tracker_is_zeroed() {
        let tracker = AdTracker::default();
        assert_eq!(tracker.chapters_read, 0);
        assert_eq!(tracker.last_ad_shown, 0);
    }

    #[test]
    fn clamp_repairs_negative_counters() {
        let tracker = AdTracker {
            chapters_read: -3,
            last_ad_shown: -7,
        };
        assert_eq!(tracker.clamped(), AdTracker::default());
    }

    #[test]
    fn clamp_caps_checkpoint_at_chapters_read() {
        let tracker = AdTracker {
            chapters_read: 2,
            last_ad_shown: 9,
        };
        let repaired = tracker.clamped();
        assert_eq!(repaired.chapters_read, 2);
        assert_eq!(repaired.last_ad_shown, 2);
    }

    #[test]
    fn well_formed_tracker_is_untouched() {
        let tracker = AdTracker {
            chapters_read: 5,
            last_ad_shown: 3,
        };
        assert_eq!(tracker.clamped(), tracker);
        assert_eq!(tracker.chapters_since_last_ad(), 2);
    }
}
