use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    errors::AppError,
    middleware::auth::AuthUser,
    models::ad_model::AdDto,
    models::response_model::ApiResponse,
    models::user_model::User,
    repository::ContentRepository,
    require_admin,
    services::ad_throttle_service::AdThrottleService,
    services::entitlement_service,
    services::tracker_store::PgTrackerStore,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct FinishChapterResponse {
    /// Total chapters read since tracking began. Absent for premium
    /// readers, who are never tracked.
    pub chapters_read: Option<i64>,
    /// The interstitial to show before the next chapter, if one is due.
    pub ad: Option<AdDto>,
}

pub struct ReaderHandler;

impl ReaderHandler {
    fn create_repo(state: &AppState) -> ContentRepository {
        ContentRepository::new(state.db.clone(), state.events.clone())
    }

    fn create_throttle(state: &AppState) -> AdThrottleService {
        AdThrottleService::new(Arc::new(PgTrackerStore::new(state.db.clone())))
    }

    /// Chapter-finish event from the reader view.
    ///
    /// For a free or anonymous reader this advances the read counter and
    /// then walks the active ads in catalog order, returning the first one
    /// the throttle lets through. The checkpoint is taken once, before
    /// responding, so one qualifying event yields at most one ad and resets
    /// the shared countdown for all ads. Premium readers get neither
    /// tracking nor ads.
    pub async fn finish_chapter(
        State(state): State<AppState>,
        Extension(user): Extension<Option<User>>,
        Path(chapter_id): Path<String>,
    ) -> Result<Json<ApiResponse<FinishChapterResponse>>, AppError> {
        let repo = Self::create_repo(&state);
        let chapter = repo.get_chapter(&chapter_id).await?;

        if !entitlement_service::can_access_chapter(&chapter, user.as_ref()) {
            let days =
                entitlement_service::days_until_unlock(&chapter, chrono::Utc::now().naive_utc());
            return Err(AppError::ChapterLocked(days));
        }

        let is_premium = user.as_ref().map(|u| u.is_premium).unwrap_or(false);
        if is_premium {
            return Ok(Json(ApiResponse::success(FinishChapterResponse {
                chapters_read: None,
                ad: None,
            })));
        }

        let throttle = Self::create_throttle(&state);
        let chapters_read = throttle.increment_chapters_read().await?;

        let mut shown = None;
        for ad in repo.list_active_ads().await? {
            if throttle.should_show_ad(&ad, is_premium).await? {
                throttle.mark_ad_shown().await?;
                tracing::info!(ad_id = %ad.id, chapters_read, "Interstitial selected");
                shown = Some(ad);
                break;
            }
        }

        Ok(Json(ApiResponse::success(FinishChapterResponse {
            chapters_read: Some(chapters_read),
            ad: shown.map(AdDto::from),
        })))
    }

    /// Factory-reset of the ad throttle, part of the admin data-reset
    /// action. Idempotent.
    pub async fn reset_tracker(
        State(state): State<AppState>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> Result<Json<ApiResponse<()>>, AppError> {
        require_admin!(auth_user);

        let throttle = Self::create_throttle(&state);
        throttle.reset().await?;

        Ok(Json(ApiResponse::with_message("Ad tracker reset", ())))
    }
}
