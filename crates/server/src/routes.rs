pub mod auth;
pub mod jokes;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{gates, openapi::ApiDoc, state::ServerState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public reads, gated writes, docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Anyone may read
    let public = Router::new()
        .route("/health", get(health))
        .route("/jokes", get(jokes::index))
        .route("/jokes/search", get(jokes::search_query).post(jokes::search))
        .route("/jokes/details", get(jokes::details))
        .route("/jokes/details/:id", get(jokes::details))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Signed-in callers only; POSTs additionally need an anti-forgery token.
    // The last route_layer runs first, so the session gate precedes the token gate.
    let gated = Router::new()
        .route("/jokes/create", get(jokes::create_form).post(jokes::create))
        .route("/jokes/edit", get(jokes::edit_form))
        .route("/jokes/edit/:id", get(jokes::edit_form).post(jokes::edit))
        .route("/jokes/delete", get(jokes::delete_confirm))
        .route("/jokes/delete/:id", get(jokes::delete_confirm).post(jokes::delete_confirmed))
        .route("/antiforgery/token", get(auth::antiforgery_token))
        .route_layer(middleware::from_fn_with_state(state.clone(), gates::require_antiforgery))
        .route_layer(middleware::from_fn_with_state(state.clone(), gates::require_session));

    public
        .merge(gated)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
