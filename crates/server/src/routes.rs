pub mod boats;
pub mod members;
pub mod parking;

use axum::{middleware, response::IntoResponse, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{csrf, observability, openapi::ApiDoc, state::AppState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    observability::encode_metrics()
}

/// Build the full application router: boat, parking and member pages plus
/// health, metrics and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    observability::init_metrics();

    let boats = Router::new()
        .route("/Boat", get(boats::list))
        .route("/Boat/Details/:id", get(boats::details))
        .route("/Boat/Create", get(boats::create_form).post(boats::create))
        .route("/Boat/Edit/:id", get(boats::edit_form).post(boats::edit))
        .route("/Boat/Delete/:id", get(boats::delete_form).post(boats::delete));

    let parkings = Router::new()
        .route("/Parking", get(parking::list))
        .route("/Parking/Details/:code", get(parking::details))
        .route("/Parking/Create", get(parking::create_form).post(parking::create))
        .route("/Parking/Edit/:code", get(parking::edit_form).post(parking::edit))
        .route("/Parking/Delete/:code", get(parking::delete_form).post(parking::delete));

    let pages = Router::new()
        .route("/Member", get(members::index))
        .merge(boats)
        .merge(parkings)
        .route_layer(middleware::from_fn(csrf::require_csrf));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(pages)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use configs::SelectionConfig;
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(DatabaseConnection::Disconnected, SelectionConfig::default());
        build_router(state, CorsLayer::very_permissive())
    }

    #[tokio::test]
    async fn health_is_public() {
        let res = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn posts_without_token_are_forbidden() {
        for path in ["/Boat/Create", "/Boat/Delete/1", "/Parking/Edit/A1"] {
            let req = Request::post(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("boat_class=x"))
                .unwrap();
            let res = app().oneshot(req).await.unwrap();
            assert_eq!(res.status(), StatusCode::FORBIDDEN, "{path}");
        }
    }

    #[tokio::test]
    async fn mismatched_token_is_forbidden() {
        let req = Request::post("/Parking/Delete/A1")
            .header(header::COOKIE, "csrf_token=abc")
            .header("X-CSRF-Token", "xyz")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
