use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// How many chapters a reader gets between interstitials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar")]
pub enum ShowFrequency {
    #[serde(rename = "every")]
    #[sqlx(rename = "every")]
    Every,
    #[serde(rename = "every-2")]
    #[sqlx(rename = "every-2")]
    Every2,
    #[serde(rename = "every-3")]
    #[sqlx(rename = "every-3")]
    Every3,
    #[serde(rename = "every-5")]
    #[sqlx(rename = "every-5")]
    Every5,
}

impl ShowFrequency {
    /// Chapters that must be read since the last ad before this one
    /// becomes eligible again.
    pub fn chapters_between_shows(self) -> i64 {
        match self {
            ShowFrequency::Every => 1,
            ShowFrequency::Every2 => 2,
            ShowFrequency::Every3 => 3,
            ShowFrequency::Every5 => 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ad {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub button_text: String,
    pub is_active: bool,
    pub show_frequency: ShowFrequency,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub button_text: String,
    pub is_active: bool,
    pub show_frequency: ShowFrequency,
}

impl From<Ad> for AdDto {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            image_url: ad.image_url,
            link_url: ad.link_url,
            button_text: ad.button_text,
            is_active: ad.is_active,
            show_frequency: ad.show_frequency,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub button_text: String,
    #[serde(default)]
    pub is_active: bool,
    pub show_frequency: ShowFrequency,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAdDto {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub is_active: Option<bool>,
    pub show_frequency: Option<ShowFrequency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_thresholds_match_fixed_table() {
        assert_eq!(ShowFrequency::Every.chapters_between_shows(), 1);
        assert_eq!(ShowFrequency::Every2.chapters_between_shows(), 2);
        assert_eq!(ShowFrequency::Every3.chapters_between_shows(), 3);
        assert_eq!(ShowFrequency::Every5.chapters_between_shows(), 5);
    }

    #[test]
    fn frequency_uses_kebab_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&ShowFrequency::Every2).unwrap(),
            "\"every-2\""
        );
        let parsed: ShowFrequency = serde_json::from_str("\"every-5\"").unwrap();
        assert_eq!(parsed, ShowFrequency::Every5);
    }
}
