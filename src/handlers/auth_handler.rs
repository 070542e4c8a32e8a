use crate::middleware::auth::AuthUser;
use crate::models::response_model::ApiResponse;
use crate::models::user_model::{LoginDto, RegisterDto, UserDto};
use crate::services::auth_service::AuthService;
use crate::{errors::AppError, AppState};
use axum::Extension;
use axum::{extract::State, http::StatusCode, Json};

pub struct AuthHandler;

impl AuthHandler {
    fn create_service(state: &AppState) -> AuthService {
        AuthService::new(state.db.clone())
    }

    pub async fn register(
        State(state): State<AppState>,
        Json(request): Json<RegisterDto>,
    ) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), AppError> {
        let service = Self::create_service(&state);
        let user = service.register(request).await?;

        Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
    }

    pub async fn login(
        State(state): State<AppState>,
        Json(request): Json<LoginDto>,
    ) -> Result<Json<ApiResponse<UserDto>>, AppError> {
        let service = Self::create_service(&state);
        let user = service.login(request).await?;

        Ok(Json(ApiResponse::success(user)))
    }

    pub async fn me(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> Result<Json<ApiResponse<UserDto>>, AppError> {
        let service = Self::create_service(&state);
        let user = service.get_user_by_id(&auth_user.id).await?;

        Ok(Json(ApiResponse::success(user)))
    }

    pub async fn upgrade(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> Result<Json<ApiResponse<UserDto>>, AppError> {
        let service = Self::create_service(&state);
        let user = service.upgrade_to_premium(&auth_user.id).await?;

        Ok(Json(ApiResponse::with_message(
            "Welcome to premium",
            user,
        )))
    }
}
