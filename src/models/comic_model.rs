use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComicStatus {
    Ongoing,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comic {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub description: String,
    pub genres: Vec<String>,
    pub rating: f64,
    pub status: ComicStatus,
    pub total_chapters: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComicDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub description: String,
    pub genres: Vec<String>,
    pub rating: f64,
    pub status: ComicStatus,
    pub total_chapters: i32,
}

impl From<Comic> for ComicDto {
    fn from(comic: Comic) -> Self {
        Self {
            id: comic.id,
            title: comic.title,
            author: comic.author,
            cover_image: comic.cover_image,
            description: comic.description,
            genres: comic.genres,
            rating: comic.rating,
            status: comic.status,
            total_chapters: comic.total_chapters,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComicDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub cover_image: String,
    pub description: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: f64,
    pub status: ComicStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateComicDto {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub genres: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: Option<f64>,
    pub status: Option<ComicStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comic_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ComicStatus::Ongoing).unwrap(),
            "\"ongoing\""
        );
        assert_eq!(
            serde_json::to_string(&ComicStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn create_comic_rejects_out_of_range_rating() {
        let dto = CreateComicDto {
            title: "Solo Farming".to_string(),
            author: "Kim".to_string(),
            cover_image: String::new(),
            description: String::new(),
            genres: vec![],
            rating: 11.0,
            status: ComicStatus::Ongoing,
        };
        assert!(validator::Validate::validate(&dto).is_err());
    }
}
