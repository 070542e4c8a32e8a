use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chapter {
    pub id: String,
    pub comic_id: String,
    pub number: i32,
    pub title: String,
    /// When the chapter becomes visible to free readers.
    pub release_date: NaiveDateTime,
    /// When the chapter becomes visible to premium readers.
    /// Always at or before `release_date`.
    pub premium_release_date: NaiveDateTime,
    pub is_locked: bool,
    pub pages: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full chapter payload, returned only once access has been granted.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterDto {
    pub id: String,
    pub comic_id: String,
    pub number: i32,
    pub title: String,
    pub release_date: NaiveDateTime,
    pub is_locked: bool,
    pub pages: Vec<String>,
}

impl From<Chapter> for ChapterDto {
    fn from(chapter: Chapter) -> Self {
        Self {
            id: chapter.id,
            comic_id: chapter.comic_id,
            number: chapter.number,
            title: chapter.title,
            release_date: chapter.release_date,
            is_locked: chapter.is_locked,
            pages: chapter.pages,
        }
    }
}

/// Chapter listing entry with the reader's computed entitlement attached.
/// Pages are withheld; only the count is exposed.
#[derive(Debug, Serialize)]
pub struct ChapterSummary {
    pub id: String,
    pub comic_id: String,
    pub number: i32,
    pub title: String,
    pub release_date: NaiveDateTime,
    pub is_locked: bool,
    pub page_count: usize,
    pub can_access: bool,
    pub days_until_unlock: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChapterDto {
    pub comic_id: String,
    #[validate(range(min = 1, message = "Chapter number must be at least 1"))]
    pub number: i32,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub release_date: NaiveDateTime,
    pub premium_release_date: NaiveDateTime,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub pages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChapterDto {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub release_date: Option<NaiveDateTime>,
    pub premium_release_date: Option<NaiveDateTime>,
    pub is_locked: Option<bool>,
    pub pages: Option<Vec<String>>,
}

impl UpdateChapterDto {
    /// The `(release_date, premium_release_date)` pair the row would carry
    /// after this update, with omitted dates taken from the stored chapter.
    /// Partial updates must be ordered against this merged pair, not just
    /// the fields present in the request.
    pub fn effective_dates(&self, current: &Chapter) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.release_date.unwrap_or(current.release_date),
            self.premium_release_date
                .unwrap_or(current.premium_release_date),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn stored_chapter() -> Chapter {
        let now = Utc::now().naive_utc();
        Chapter {
            id: "ch-1".to_string(),
            comic_id: "comic-1".to_string(),
            number: 1,
            title: "Chapter 1".to_string(),
            release_date: now,
            premium_release_date: now - Duration::days(7),
            is_locked: true,
            pages: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn empty_update() -> UpdateChapterDto {
        UpdateChapterDto {
            title: None,
            release_date: None,
            premium_release_date: None,
            is_locked: None,
            pages: None,
        }
    }

    #[test]
    fn moving_only_the_premium_date_is_ordered_against_the_stored_free_date() {
        let chapter = stored_chapter();
        let mut dto = empty_update();
        dto.premium_release_date = Some(chapter.release_date + Duration::days(1));

        let (release, premium) = dto.effective_dates(&chapter);
        assert!(premium > release);
    }

    #[test]
    fn moving_only_the_free_date_is_ordered_against_the_stored_premium_date() {
        let chapter = stored_chapter();
        let mut dto = empty_update();
        dto.release_date = Some(chapter.premium_release_date - Duration::days(1));

        let (release, premium) = dto.effective_dates(&chapter);
        assert!(premium > release);
    }

    #[test]
    fn full_and_empty_updates_keep_a_valid_pair_valid() {
        let chapter = stored_chapter();

        let (release, premium) = empty_update().effective_dates(&chapter);
        assert!(premium <= release);

        let mut dto = empty_update();
        dto.release_date = Some(chapter.release_date + Duration::days(14));
        dto.premium_release_date = Some(chapter.release_date + Duration::days(7));
        let (release, premium) = dto.effective_dates(&chapter);
        assert!(premium <= release);
    }
}
