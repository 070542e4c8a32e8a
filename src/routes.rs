use crate::{
    handlers::{
        ad_handler::AdHandler,
        auth_handler::AuthHandler,
        bookmark_handler::BookmarkHandler,
        chapter_handler::ChapterHandler,
        comic_handler::ComicHandler,
        health_handler::{db_health_check, health_checker_handler},
        reader_handler::ReaderHandler,
    },
    middleware::{
        api_key::api_key_middleware,
        auth::{auth_middleware, optional_auth_middleware},
    },
    AppState,
};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

pub fn create_routes(app_state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api", api_routes(app_state.clone()))
        .route("/healthy", get(health_checker_handler))
        .route("/db-health", get(db_health_check))
        .with_state(app_state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
}

fn api_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes(app_state.clone()))
        .merge(comic_routes(app_state.clone()))
        .merge(chapter_routes(app_state.clone()))
        .merge(bookmark_routes(app_state.clone()))
        .merge(ad_routes(app_state.clone()))
        .merge(admin_routes(app_state))
}

fn auth_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(AuthHandler::register))
        .route("/login", post(AuthHandler::login));

    let protected = Router::new()
        .route("/me", get(AuthHandler::me))
        .route("/upgrade", post(AuthHandler::upgrade))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ));

    public.merge(protected)
}

fn comic_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/comics", get(ComicHandler::get_comics))
        .route("/comic/{id}", get(ComicHandler::get_comic))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            api_key_middleware,
        ));

    let protected = Router::new()
        .route("/comic", post(ComicHandler::create_comic))
        .route(
            "/comic/{id}",
            put(ComicHandler::update_comic).delete(ComicHandler::delete_comic),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ));

    public.merge(protected)
}

fn chapter_routes(app_state: AppState) -> Router<AppState> {
    // Reading routes allow anonymous readers; the entitlement check inside
    // the handler decides what they may see.
    let reading = Router::new()
        .route(
            "/comic/{id}/chapters",
            get(ChapterHandler::get_chapters_by_comic),
        )
        .route("/chapter/{id}", get(ChapterHandler::get_chapter))
        .route("/chapter/{id}/finish", post(ReaderHandler::finish_chapter))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            optional_auth_middleware,
        ));

    let protected = Router::new()
        .route("/chapter", post(ChapterHandler::create_chapter))
        .route(
            "/chapter/{id}",
            put(ChapterHandler::update_chapter).delete(ChapterHandler::delete_chapter),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ));

    reading.merge(protected)
}

fn bookmark_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/bookmark", post(BookmarkHandler::save_bookmark))
        .route(
            "/bookmark/comic/{comic_id}",
            delete(BookmarkHandler::delete_bookmark_by_comic),
        )
        .route(
            "/bookmark/check/{comic_id}",
            get(BookmarkHandler::check_bookmark),
        )
        .route("/bookmarks", get(BookmarkHandler::get_user_bookmarks))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ))
}

fn ad_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/ads", get(AdHandler::get_ads))
        .route("/ad", post(AdHandler::create_ad))
        .route(
            "/ad/{id}",
            put(AdHandler::update_ad).delete(AdHandler::delete_ad),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ))
}

fn admin_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/tracker/reset", post(ReaderHandler::reset_tracker))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ))
}
