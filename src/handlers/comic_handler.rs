use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::{
    errors::AppError,
    middleware::auth::AuthUser,
    models::comic_model::{ComicDto, CreateComicDto, UpdateComicDto},
    models::paging::{PaginatedResponse, PaginationMeta, PaginationParams},
    models::response_model::ApiResponse,
    repository::ContentRepository,
    require_admin, AppState,
};

pub struct ComicHandler;

impl ComicHandler {
    fn create_repo(state: &AppState) -> ContentRepository {
        ContentRepository::new(state.db.clone(), state.events.clone())
    }

    pub async fn get_comics(
        State(state): State<AppState>,
        Query(params): Query<PaginationParams>,
    ) -> Result<Json<PaginatedResponse<ComicDto>>, AppError> {
        params.validate().map_err(AppError::Validation)?;

        let repo = Self::create_repo(&state);
        let total_items = repo.count_comics().await?;
        let comics = repo.list_comics(&params).await?;

        let data = comics.into_iter().map(ComicDto::from).collect();
        let meta = PaginationMeta::new(params.page, params.limit, total_items);

        Ok(Json(PaginatedResponse::new(data, meta)))
    }

    pub async fn get_comic(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Json<ApiResponse<ComicDto>>, AppError> {
        let repo = Self::create_repo(&state);
        let comic = repo.get_comic(&id).await?;

        Ok(Json(ApiResponse::success(comic.into())))
    }

    pub async fn create_comic(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CreateComicDto>,
    ) -> Result<(StatusCode, Json<ApiResponse<ComicDto>>), AppError> {
        require_admin!(auth_user);
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let repo = Self::create_repo(&state);
        let comic = repo.create_comic(request).await?;

        tracing::info!(comic_id = %comic.id, "Comic created");

        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::with_message(
                "Comic created successfully",
                comic.into(),
            )),
        ))
    }

    pub async fn update_comic(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<String>,
        Json(request): Json<UpdateComicDto>,
    ) -> Result<Json<ApiResponse<ComicDto>>, AppError> {
        require_admin!(auth_user);
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let repo = Self::create_repo(&state);
        let comic = repo.update_comic(&id, request).await?;

        Ok(Json(ApiResponse::with_message(
            "Comic updated successfully",
            comic.into(),
        )))
    }

    pub async fn delete_comic(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, AppError> {
        require_admin!(auth_user);

        let repo = Self::create_repo(&state);
        repo.delete_comic(&id).await?;

        tracing::info!(comic_id = %id, "Comic deleted");
        Ok(StatusCode::NO_CONTENT)
    }
}
