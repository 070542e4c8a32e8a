use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_premium: bool,
    pub premium_until: Option<NaiveDateTime>,
    pub profile_picture: Option<String>,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_premium: bool,
    pub premium_until: Option<NaiveDateTime>,
    pub profile_picture: Option<String>,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            is_premium: user.is_premium,
            premium_until: user.premium_until,
            profile_picture: user.profile_picture,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDto {
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginDto {
    pub email: String,
}
