//! Mock identity management.
//!
//! There is no real authentication in this system: clients assert who they
//! are and the server trusts them. Login accepts any email and creates the
//! account on first use, matching the front-end's mock sign-in. The premium
//! upgrade endpoint flips the entitlement flag without any payment step.

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::user_model::{LoginDto, RegisterDto, User, UserDto};
use chrono::{Duration, Utc};

const PREMIUM_TERM_DAYS: i64 = 30;

pub struct AuthService {
    db: Database,
}

impl AuthService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn register(&self, request: RegisterDto) -> AppResult<UserDto> {
        if request.email.is_empty() || request.username.is_empty() {
            return Err(AppError::BadRequest(
                "Email and username are required".to_string(),
            ));
        }

        if self.email_exists(&request.email).await? {
            return Err(AppError::BadRequest("Email already exists".to_string()));
        }

        let user = self
            .insert_user(&request.email, &request.username)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Mock login: any email signs in, creating the account on first use.
    pub async fn login(&self, request: LoginDto) -> AppResult<UserDto> {
        if request.email.is_empty() {
            return Err(AppError::Unauthorized);
        }

        if let Some(user) = self.find_user_by_email(&request.email).await? {
            return Ok(user.into());
        }

        let username = request
            .email
            .split('@')
            .next()
            .unwrap_or(request.email.as_str())
            .to_string();
        let user = self.insert_user(&request.email, &username).await?;

        tracing::info!(user_id = %user.id, "User created on first login");
        Ok(user.into())
    }

    pub async fn get_user_by_id(&self, id: &str) -> AppResult<UserDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, is_premium, premium_until,
                   profile_picture, is_admin, created_at, updated_at
            FROM "User"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// Grants premium for 30 days from now. No payment is collected; the
    /// expiry is stored but not enforced by the gating logic.
    pub async fn upgrade_to_premium(&self, user_id: &str) -> AppResult<UserDto> {
        let now = Utc::now().naive_utc();
        let premium_until = now + Duration::days(PREMIUM_TERM_DAYS);

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE "User"
            SET is_premium = TRUE, premium_until = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, email, username, is_premium, premium_until,
                      profile_picture, is_admin, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(premium_until)
        .bind(now)
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(user_id = %user.id, until = %premium_until, "Premium upgrade");
        Ok(user.into())
    }

    async fn insert_user(&self, email: &str, username: &str) -> AppResult<User> {
        let id = cuid2::create_id();
        let now = Utc::now().naive_utc();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "User"
                (id, email, username, is_premium, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, FALSE, FALSE, $4, $4)
            RETURNING id, email, username, is_premium, premium_until,
                      profile_picture, is_admin, created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(username)
        .bind(now)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, is_premium, premium_until,
                   profile_picture, is_admin, created_at, updated_at
            FROM "User"
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let result: Option<(bool,)> =
            sqlx::query_as(r#"SELECT EXISTS(SELECT 1 FROM "User" WHERE email = $1)"#)
                .bind(email)
                .fetch_optional(&self.db.pool)
                .await?;

        Ok(result.map(|(exists,)| exists).unwrap_or(false))
    }
}
