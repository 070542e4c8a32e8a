use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    errors::AppError,
    middleware::auth::AuthUser,
    models::chapter_model::{ChapterDto, ChapterSummary, CreateChapterDto, UpdateChapterDto},
    models::response_model::ApiResponse,
    models::user_model::User,
    repository::ContentRepository,
    require_admin,
    services::entitlement_service,
    AppState,
};

pub struct ChapterHandler;

impl ChapterHandler {
    fn create_repo(state: &AppState) -> ContentRepository {
        ContentRepository::new(state.db.clone(), state.events.clone())
    }

    /// Chapter list for a comic's detail view. Every entry carries the
    /// reader's computed access and the unlock countdown, so the front-end
    /// renders "Free in N days" without re-deriving policy.
    pub async fn get_chapters_by_comic(
        State(state): State<AppState>,
        Extension(user): Extension<Option<User>>,
        Path(comic_id): Path<String>,
    ) -> Result<Json<ApiResponse<Vec<ChapterSummary>>>, AppError> {
        let repo = Self::create_repo(&state);
        repo.get_comic(&comic_id).await?;

        let now = Utc::now().naive_utc();

        let chapters = repo.list_chapters(&comic_id).await?;
        let summaries = chapters
            .into_iter()
            .map(|chapter| ChapterSummary {
                can_access: entitlement_service::can_access_chapter(&chapter, user.as_ref()),
                days_until_unlock: entitlement_service::days_until_unlock(&chapter, now),
                page_count: chapter.pages.len(),
                id: chapter.id,
                comic_id: chapter.comic_id,
                number: chapter.number,
                title: chapter.title,
                release_date: chapter.release_date,
                is_locked: chapter.is_locked,
            })
            .collect();

        Ok(Json(ApiResponse::success(summaries)))
    }

    /// Full chapter with pages, gated by entitlement. A locked chapter
    /// requested without premium responds 403 with the unlock countdown.
    pub async fn get_chapter(
        State(state): State<AppState>,
        Extension(user): Extension<Option<User>>,
        Path(id): Path<String>,
    ) -> Result<Json<ApiResponse<ChapterDto>>, AppError> {
        let repo = Self::create_repo(&state);
        let chapter = repo.get_chapter(&id).await?;

        if !entitlement_service::can_access_chapter(&chapter, user.as_ref()) {
            let days =
                entitlement_service::days_until_unlock(&chapter, Utc::now().naive_utc());
            return Err(AppError::ChapterLocked(days));
        }

        Ok(Json(ApiResponse::success(chapter.into())))
    }

    pub async fn create_chapter(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CreateChapterDto>,
    ) -> Result<(StatusCode, Json<ApiResponse<ChapterDto>>), AppError> {
        require_admin!(auth_user);
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if request.premium_release_date > request.release_date {
            return Err(AppError::BadRequest(
                "Premium release date must not be after the free release date".to_string(),
            ));
        }

        let repo = Self::create_repo(&state);
        let chapter = repo.create_chapter(request).await?;

        tracing::info!(
            chapter_id = %chapter.id,
            comic_id = %chapter.comic_id,
            number = chapter.number,
            "Chapter created"
        );

        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::with_message(
                "Chapter created successfully",
                chapter.into(),
            )),
        ))
    }

    pub async fn update_chapter(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<String>,
        Json(request): Json<UpdateChapterDto>,
    ) -> Result<Json<ApiResponse<ChapterDto>>, AppError> {
        require_admin!(auth_user);
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let repo = Self::create_repo(&state);

        // A partial update must keep the merged date pair ordered, so check
        // against the stored row whenever either date moves.
        if request.release_date.is_some() || request.premium_release_date.is_some() {
            let current = repo.get_chapter(&id).await?;
            let (release, premium) = request.effective_dates(&current);
            if premium > release {
                return Err(AppError::BadRequest(
                    "Premium release date must not be after the free release date".to_string(),
                ));
            }
        }

        let chapter = repo.update_chapter(&id, request).await?;

        Ok(Json(ApiResponse::with_message(
            "Chapter updated successfully",
            chapter.into(),
        )))
    }

    pub async fn delete_chapter(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, AppError> {
        require_admin!(auth_user);

        let repo = Self::create_repo(&state);
        repo.delete_chapter(&id).await?;

        tracing::info!(chapter_id = %id, "Chapter deleted");
        Ok(StatusCode::NO_CONTENT)
    }
}
