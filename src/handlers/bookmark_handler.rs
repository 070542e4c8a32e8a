use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use crate::{
    errors::AppError,
    middleware::auth::AuthUser,
    models::bookmark_model::{
        Bookmark, BookmarkResponse, BookmarkStatusResponse, BookmarkWithComic,
        BookmarkWithComicResponse, SaveBookmarkDto,
    },
    models::response_model::ApiResponse,
    AppState,
};

pub struct BookmarkHandler;

impl BookmarkHandler {
    /// Saves reading progress: one bookmark per (user, comic), moved to the
    /// given chapter on every save.
    /// POST /api/bookmark
    pub async fn save_bookmark(
        State(state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Json(dto): Json<SaveBookmarkDto>,
    ) -> Result<(StatusCode, Json<ApiResponse<BookmarkResponse>>), AppError> {
        tracing::debug!(user_id = %user.id, comic_id = %dto.comic_id, "Saving bookmark");

        // The chapter must exist and belong to the comic being bookmarked.
        let chapter_matches = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM "Chapter" WHERE id = $1 AND comic_id = $2"#,
        )
        .bind(&dto.chapter_id)
        .bind(&dto.comic_id)
        .fetch_one(&state.db.pool)
        .await?;

        if chapter_matches == 0 {
            return Err(AppError::NotFound(
                "Chapter not found for this comic".to_string(),
            ));
        }

        let id = cuid2::create_id();
        let now = Utc::now().naive_utc();

        let bookmark = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO "Bookmark" (id, user_id, comic_id, chapter_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (user_id, comic_id) DO UPDATE
            SET chapter_id = EXCLUDED.chapter_id,
                updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, comic_id, chapter_id, created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&user.id)
        .bind(&dto.comic_id)
        .bind(&dto.chapter_id)
        .bind(now)
        .fetch_one(&state.db.pool)
        .await?;

        tracing::info!(
            user_id = %user.id,
            comic_id = %dto.comic_id,
            chapter_id = %dto.chapter_id,
            "Bookmark saved"
        );

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(BookmarkResponse::from(bookmark))),
        ))
    }

    /// Remove the bookmark for a comic
    /// DELETE /api/bookmark/comic/{comic_id}
    pub async fn delete_bookmark_by_comic(
        State(state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Path(comic_id): Path<String>,
    ) -> Result<StatusCode, AppError> {
        let result = sqlx::query(r#"DELETE FROM "Bookmark" WHERE comic_id = $1 AND user_id = $2"#)
            .bind(&comic_id)
            .bind(&user.id)
            .execute(&state.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Bookmark not found".to_string()));
        }

        tracing::info!(comic_id = %comic_id, user_id = %user.id, "Bookmark deleted");

        Ok(StatusCode::NO_CONTENT)
    }

    /// All bookmarks for the current user, most recently read first
    /// GET /api/bookmarks
    pub async fn get_user_bookmarks(
        State(state): State<AppState>,
        Extension(user): Extension<AuthUser>,
    ) -> Result<Json<ApiResponse<Vec<BookmarkWithComicResponse>>>, AppError> {
        let bookmarks = sqlx::query_as::<_, BookmarkWithComic>(
            r#"
            SELECT
                b.id,
                b.user_id,
                b.comic_id,
                b.chapter_id,
                b.updated_at,
                c.title as comic_title,
                c.cover_image as comic_cover_image,
                c.author as comic_author,
                ch.number as chapter_number
            FROM "Bookmark" b
            JOIN "Comic" c ON b.comic_id = c.id
            JOIN "Chapter" ch ON b.chapter_id = ch.id
            WHERE b.user_id = $1
            ORDER BY b.updated_at DESC
            "#,
        )
        .bind(&user.id)
        .fetch_all(&state.db.pool)
        .await?;

        let response: Vec<BookmarkWithComicResponse> = bookmarks
            .into_iter()
            .map(BookmarkWithComicResponse::from)
            .collect();

        Ok(Json(ApiResponse::success(response)))
    }

    /// Whether the current user has a bookmark on a comic, and where
    /// GET /api/bookmark/check/{comic_id}
    pub async fn check_bookmark(
        State(state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Path(comic_id): Path<String>,
    ) -> Result<Json<ApiResponse<BookmarkStatusResponse>>, AppError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            r#"SELECT id, user_id, comic_id, chapter_id, created_at, updated_at
               FROM "Bookmark" WHERE user_id = $1 AND comic_id = $2"#,
        )
        .bind(&user.id)
        .bind(&comic_id)
        .fetch_optional(&state.db.pool)
        .await?;

        Ok(Json(ApiResponse::success(BookmarkStatusResponse {
            is_bookmarked: bookmark.is_some(),
            chapter_id: bookmark.map(|b| b.chapter_id),
        })))
    }
}
