use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::{
    errors::AppError,
    middleware::auth::AuthUser,
    models::ad_model::{AdDto, CreateAdDto, UpdateAdDto},
    models::response_model::ApiResponse,
    repository::ContentRepository,
    require_admin, AppState,
};

pub struct AdHandler;

impl AdHandler {
    fn create_repo(state: &AppState) -> ContentRepository {
        ContentRepository::new(state.db.clone(), state.events.clone())
    }

    /// All ads, including inactive ones, for the admin dashboard.
    pub async fn get_ads(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> Result<Json<ApiResponse<Vec<AdDto>>>, AppError> {
        require_admin!(auth_user);

        let repo = Self::create_repo(&state);
        let ads = repo.list_ads().await?;

        Ok(Json(ApiResponse::success(
            ads.into_iter().map(AdDto::from).collect(),
        )))
    }

    pub async fn create_ad(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CreateAdDto>,
    ) -> Result<(StatusCode, Json<ApiResponse<AdDto>>), AppError> {
        require_admin!(auth_user);
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let repo = Self::create_repo(&state);
        let ad = repo.create_ad(request).await?;

        tracing::info!(ad_id = %ad.id, "Ad created");

        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::with_message("Ad created successfully", ad.into())),
        ))
    }

    pub async fn update_ad(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<String>,
        Json(request): Json<UpdateAdDto>,
    ) -> Result<Json<ApiResponse<AdDto>>, AppError> {
        require_admin!(auth_user);
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let repo = Self::create_repo(&state);
        let ad = repo.update_ad(&id, request).await?;

        Ok(Json(ApiResponse::with_message(
            "Ad updated successfully",
            ad.into(),
        )))
    }

    pub async fn delete_ad(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, AppError> {
        require_admin!(auth_user);

        let repo = Self::create_repo(&state);
        repo.delete_ad(&id).await?;

        tracing::info!(ad_id = %id, "Ad deleted");
        Ok(StatusCode::NO_CONTENT)
    }
}
