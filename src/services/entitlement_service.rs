//! Chapter visibility decisions.
//!
//! Pure functions over their inputs: no clock reads, no storage access.
//! Handlers pass the current instant in so the rules stay deterministic
//! under test.

use crate::models::chapter_model::Chapter;
use crate::models::user_model::User;
use chrono::NaiveDateTime;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whether `user` may read `chapter` right now.
///
/// An unlocked chapter is visible to everyone, dates included in the row are
/// informational only. A locked chapter is premium-early-access: premium
/// status alone grants it, and free or anonymous readers are denied until an
/// admin flips the lock off. Premium expiry (`premium_until`) is deliberately
/// not consulted here.
pub fn can_access_chapter(chapter: &Chapter, user: Option<&User>) -> bool {
    if !chapter.is_locked {
        return true;
    }
    user.map(|u| u.is_premium).unwrap_or(false)
}

/// Days until `chapter` becomes free, for the "Free in N days" label.
///
/// Rounds partial days up, so 3 hours remaining still reads as 1 day, and
/// never goes negative once the release date has passed. Display only; it
/// does not gate anything.
pub fn days_until_unlock(chapter: &Chapter, now: NaiveDateTime) -> i64 {
    let remaining_ms = chapter
        .release_date
        .signed_duration_since(now)
        .num_milliseconds();

    if remaining_ms <= 0 {
        return 0;
    }

    (remaining_ms + MS_PER_DAY - 1) / MS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn chapter(is_locked: bool, release_offset: Duration) -> Chapter {
        let now = Utc::now().naive_utc();
        Chapter {
            id: "ch-1".to_string(),
            comic_id: "comic-1".to_string(),
            number: 1,
            title: "Chapter 1".to_string(),
            release_date: now + release_offset,
            premium_release_date: now + release_offset - Duration::days(7),
            is_locked,
            pages: vec!["p1.jpg".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    fn user(is_premium: bool) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: "user-1".to_string(),
            email: "reader@example.com".to_string(),
            username: "reader".to_string(),
            is_premium,
            premium_until: None,
            profile_picture: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn unlocked_chapter_is_open_to_everyone() {
        // Even with a future release date: the lock flag alone decides.
        let ch = chapter(false, Duration::days(30));
        assert!(can_access_chapter(&ch, None));
        assert!(can_access_chapter(&ch, Some(&user(false))));
        assert!(can_access_chapter(&ch, Some(&user(true))));
    }

    #[test]
    fn locked_chapter_requires_premium() {
        let ch = chapter(true, Duration::days(3));
        assert!(!can_access_chapter(&ch, None));
        assert!(!can_access_chapter(&ch, Some(&user(false))));
        assert!(can_access_chapter(&ch, Some(&user(true))));
    }

    #[test]
    fn locked_chapter_stays_locked_after_release_date() {
        // Elapsed time does not unlock; an admin has to clear the flag.
        let ch = chapter(true, Duration::days(-3));
        assert!(!can_access_chapter(&ch, Some(&user(false))));
    }

    #[test]
    fn countdown_is_zero_for_released_chapters() {
        let now = Utc::now().naive_utc();
        let ch = chapter(true, Duration::days(-10));
        assert_eq!(days_until_unlock(&ch, now), 0);
    }

    #[test]
    fn countdown_rounds_partial_days_up() {
        let now = Utc::now().naive_utc();
        assert_eq!(days_until_unlock(&chapter(true, Duration::hours(25)), now), 2);
        assert_eq!(days_until_unlock(&chapter(true, Duration::hours(3)), now), 1);
    }

    #[test]
    fn countdown_counts_exact_days_exactly() {
        let now = Utc::now().naive_utc();
        assert_eq!(days_until_unlock(&chapter(true, Duration::hours(24)), now), 1);
        assert_eq!(days_until_unlock(&chapter(true, Duration::days(7)), now), 7);
    }
}
