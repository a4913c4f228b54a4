//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the renewal API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Update License Renewal API",
        version = "0.1.0",
        description = "Renewal quotes for update licenses: priced plan offers, expiry classification, and plan selection for checkout."
    ),
    paths(
        crate::routes::renewals::get_quote,
        crate::routes::renewals::create_selection,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::renewals::SelectionRequest,
        crate::routes::renewals::OfferView,
        crate::routes::renewals::ExpiryView,
        crate::routes::renewals::RenewalQuoteResponse,
        crate::routes::renewals::RenewalSelection,
    )),
    tags(
        (name = "renewals", description = "Update license renewal quotes and plan selection"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_renewal_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/renewals/quote"));
        assert!(doc.paths.paths.contains_key("/v1/renewals/selection"));
    }

    #[test]
    fn document_serializes() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("RenewalQuoteResponse"));
    }
}
