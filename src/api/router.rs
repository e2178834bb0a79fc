//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Cross-origin requests are permitted from the single configured
//! front-end origin only.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router with the CORS layer for the given origin.
pub fn api_router(ctx: ApiContext, allowed_origin: &str) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            get(endpoints::patients::get_by_id)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::delete),
        )
        .route(
            "/clinicaldata",
            get(endpoints::clinical_data::list).post(endpoints::clinical_data::create),
        )
        .route(
            "/clinicaldata/clinicals",
            post(endpoints::clinical_data::record_for_patient),
        )
        .route(
            "/clinicaldata/:id",
            get(endpoints::clinical_data::get_by_id)
                .put(endpoints::clinical_data::update)
                .delete(endpoints::clinical_data::delete),
        )
        .with_state(ctx)
        .layer(cors_layer(allowed_origin))
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
        Err(e) => {
            tracing::warn!("Invalid CORS origin {allowed_origin:?}: {e}; denying cross-origin");
            CorsLayer::new()
        }
    }
}
