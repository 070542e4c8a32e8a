use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reading progress for one user on one comic: the last chapter they saved.
/// One bookmark per (user, comic); saving again moves it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub comic_id: String,
    pub chapter_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Bookmark with joined comic and chapter data for the continue-reading list
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookmarkWithComic {
    pub id: String,
    pub user_id: String,
    pub comic_id: String,
    pub chapter_id: String,
    pub updated_at: NaiveDateTime,
    // Joined fields
    pub comic_title: String,
    pub comic_cover_image: String,
    pub comic_author: String,
    pub chapter_number: i32,
}

/// DTO for saving reading progress
#[derive(Debug, Clone, Deserialize)]
pub struct SaveBookmarkDto {
    pub comic_id: String,
    pub chapter_id: String,
}

/// Response DTO for a saved bookmark
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkResponse {
    pub id: String,
    pub comic_id: String,
    pub chapter_id: String,
    pub updated_at: NaiveDateTime,
}

/// Response for a bookmark with its comic details
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkWithComicResponse {
    pub id: String,
    pub chapter_id: String,
    pub chapter_number: i32,
    pub updated_at: NaiveDateTime,
    pub comic: ComicSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComicSummary {
    pub id: String,
    pub title: String,
    pub cover_image: String,
    pub author: String,
}

/// Response for check bookmark status
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkStatusResponse {
    pub is_bookmarked: bool,
    pub chapter_id: Option<String>,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id,
            comic_id: bookmark.comic_id,
            chapter_id: bookmark.chapter_id,
            updated_at: bookmark.updated_at,
        }
    }
}

impl From<BookmarkWithComic> for BookmarkWithComicResponse {
    fn from(b: BookmarkWithComic) -> Self {
        Self {
            id: b.id,
            chapter_id: b.chapter_id,
            chapter_number: b.chapter_number,
            updated_at: b.updated_at,
            comic: ComicSummary {
                id: b.comic_id,
                title: b.comic_title,
                cover_image: b.comic_cover_image,
                author: b.comic_author,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn joined_row_folds_comic_fields_into_summary() {
        let now = Utc::now().naive_utc();
        let row = BookmarkWithComic {
            id: "bm-1".to_string(),
            user_id: "user-1".to_string(),
            comic_id: "comic-1".to_string(),
            chapter_id: "ch-12".to_string(),
            updated_at: now,
            comic_title: "Tower Climber".to_string(),
            comic_cover_image: "cover.jpg".to_string(),
            comic_author: "Kim".to_string(),
            chapter_number: 12,
        };

        let response = BookmarkWithComicResponse::from(row);
        assert_eq!(response.comic.id, "comic-1");
        assert_eq!(response.comic.title, "Tower Climber");
        assert_eq!(response.chapter_number, 12);
        assert_eq!(response.chapter_id, "ch-12");
    }
}
