//! # Renewals API
//!
//! Composes the renewal flow for the authenticated user:
//!
//! ```text
//! CurrentUser → settings gate → resolve license → compute offers → classify expiry
//! ```
//!
//! The settings snapshot and the current instant are taken once per request
//! and passed into the pure engine. Resolution failures of any kind are
//! logged with their cause and answered with a single 404.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use renew_core::{License, LicenseId, LicenseSelector, ProductId, Timestamp, UserId};
use renew_quote::{classify, compute_offers, select_offer, ExpiryStatus, PlanDuration, RenewalOffer};
use renew_store::{RenewalSettings, ResolveError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, extract_validated_query, Validate};
use crate::state::AppState;

/// Query selecting the license to quote. `0` means "not given".
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteQuery {
    /// License id, or 0.
    #[serde(default)]
    pub license_id: i64,
    /// Product id, or 0.
    #[serde(default)]
    pub product_id: i64,
}

impl Validate for QuoteQuery {
    fn validate(&self) -> Result<(), String> {
        LicenseSelector::from_raw(self.license_id, self.product_id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Request to lock in one renewal plan for checkout.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct SelectionRequest {
    #[serde(default)]
    pub license_id: i64,
    #[serde(default)]
    pub product_id: i64,
    /// One of 3, 6, 12, 24.
    pub duration_months: u32,
}

impl Validate for SelectionRequest {
    fn validate(&self) -> Result<(), String> {
        LicenseSelector::from_raw(self.license_id, self.product_id).map_err(|e| e.to_string())?;
        PlanDuration::try_from(self.duration_months).map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// One priced plan as presented to the customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferView {
    pub duration_months: u32,
    /// Full-precision price.
    #[schema(value_type = String)]
    pub price: Decimal,
    /// Price rounded to cents.
    #[schema(value_type = String)]
    pub display_price: Decimal,
    pub savings_percent: u8,
}

impl From<RenewalOffer> for OfferView {
    fn from(offer: RenewalOffer) -> Self {
        Self {
            duration_months: offer.duration.months(),
            price: offer.price,
            display_price: offer.display_price(),
            savings_percent: offer.savings_percent,
        }
    }
}

/// Expiry classification with its display forms.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpiryView {
    /// `no_expiry`, `active` or `expired`.
    pub status: String,
    /// Fractional days remaining (active) or overdue (expired).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whole_days: Option<u64>,
    pub summary: String,
}

impl From<ExpiryStatus> for ExpiryView {
    fn from(status: ExpiryStatus) -> Self {
        Self {
            status: status.as_str().to_string(),
            days: status.days(),
            whole_days: status.whole_days(),
            summary: status.summary(),
        }
    }
}

/// Renewal quote for one license.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenewalQuoteResponse {
    #[schema(value_type = i64)]
    pub license_id: LicenseId,
    #[schema(value_type = i64)]
    pub product_id: ProductId,
    #[schema(value_type = String)]
    pub base_price: Decimal,
    #[schema(value_type = String)]
    pub discount_percent: Decimal,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub update_expires_at: Option<Timestamp>,
    /// Always four offers: 3, 6, 12 and 24 months.
    pub offers: Vec<OfferView>,
    pub expiry: ExpiryView,
    #[schema(value_type = String, format = DateTime)]
    pub quoted_at: Timestamp,
}

/// The `(license, duration, price)` triple handed to checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenewalSelection {
    #[schema(value_type = i64)]
    pub license_id: LicenseId,
    #[schema(value_type = i64)]
    pub product_id: ProductId,
    pub duration_months: u32,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[schema(value_type = String)]
    pub display_price: Decimal,
    pub savings_percent: u8,
}

/// Build the renewals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/renewals/quote", get(get_quote))
        .route("/v1/renewals/selection", post(create_selection))
}

/// Price and classify `license` under `settings` at `now`.
pub fn build_quote(license: &License, settings: &RenewalSettings, now: Timestamp) -> RenewalQuoteResponse {
    let offers = compute_offers(license.base_product_price, settings.update_renewal_discount);
    RenewalQuoteResponse {
        license_id: license.id,
        product_id: license.product_id,
        base_price: license.base_product_price,
        discount_percent: settings.update_renewal_discount,
        update_expires_at: license.update_expires_at,
        offers: offers.into_iter().map(OfferView::from).collect(),
        expiry: classify(license.update_expires_at, now).into(),
        quoted_at: now,
    }
}

fn ensure_enabled(settings: &RenewalSettings) -> Result<(), AppError> {
    if settings.allow_update_renewal {
        Ok(())
    } else {
        Err(AppError::PreconditionFailed("update renewals are disabled".into()))
    }
}

async fn resolve_for(state: &AppState, user: UserId, selector: LicenseSelector) -> Result<License, AppError> {
    state.resolve_license(user, selector).await.map_err(|err: ResolveError| {
        tracing::warn!(
            user_id = %user,
            %selector,
            cause = err.cause(),
            error = %err,
            "renewal license resolution failed"
        );
        AppError::from(err)
    })
}

/// GET /v1/renewals/quote: Offers and expiry status for one license.
#[utoipa::path(
    get,
    path = "/v1/renewals/quote",
    params(QuoteQuery),
    responses(
        (status = 200, description = "Renewal quote", body = RenewalQuoteResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorBody),
        (status = 404, description = "License not found", body = crate::error::ErrorBody),
        (status = 412, description = "Renewals disabled", body = crate::error::ErrorBody),
    ),
    tag = "renewals"
)]
pub async fn get_quote(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Json<RenewalQuoteResponse>, AppError> {
    let settings = state.renewal_settings();
    ensure_enabled(&settings)?;

    let query = extract_validated_query(query)?;
    let selector = LicenseSelector::from_raw(query.license_id, query.product_id)?;
    let license = resolve_for(&state, user.user_id, selector).await?;

    let quote = build_quote(&license, &settings, Timestamp::now());
    tracing::info!(
        user_id = %user.user_id,
        license_id = %license.id,
        expiry = quote.expiry.status.as_str(),
        "renewal quote issued"
    );
    Ok(Json(quote))
}

/// POST /v1/renewals/selection: Price one plan for checkout.
#[utoipa::path(
    post,
    path = "/v1/renewals/selection",
    request_body = SelectionRequest,
    responses(
        (status = 200, description = "Priced selection", body = RenewalSelection),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorBody),
        (status = 404, description = "License not found", body = crate::error::ErrorBody),
        (status = 412, description = "Renewals disabled", body = crate::error::ErrorBody),
        (status = 422, description = "Unsupported duration", body = crate::error::ErrorBody),
    ),
    tag = "renewals"
)]
pub async fn create_selection(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<SelectionRequest>, JsonRejection>,
) -> Result<Json<RenewalSelection>, AppError> {
    let settings = state.renewal_settings();
    ensure_enabled(&settings)?;

    let req = extract_validated_json(body)?;
    let selector = LicenseSelector::from_raw(req.license_id, req.product_id)?;
    let license = resolve_for(&state, user.user_id, selector).await?;

    let offers = compute_offers(license.base_product_price, settings.update_renewal_discount);
    let offer = select_offer(&offers, req.duration_months)?;

    tracing::info!(
        user_id = %user.user_id,
        license_id = %license.id,
        duration_months = req.duration_months,
        "renewal plan selected"
    );

    Ok(Json(RenewalSelection {
        license_id: license.id,
        product_id: license.product_id,
        duration_months: offer.duration.months(),
        price: offer.price,
        display_price: offer.display_price(),
        savings_percent: offer.savings_percent,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license(expires_at: Option<Timestamp>) -> License {
        License {
            id: LicenseId(5),
            user_id: UserId(1),
            product_id: ProductId(9),
            is_active: true,
            update_expires_at: expires_at,
            base_product_price: Decimal::from(100),
        }
    }

    fn settings(discount: i64) -> RenewalSettings {
        RenewalSettings {
            allow_update_renewal: true,
            update_renewal_discount: Decimal::from(discount),
        }
    }

    fn now() -> Timestamp {
        Timestamp::parse("2024-01-01T00:00:00Z").unwrap()
    }

    #[test]
    fn quote_prices_all_plans() {
        let quote = build_quote(&license(None), &settings(20), now());
        let prices: Vec<Decimal> = quote.offers.iter().map(|o| o.price).collect();
        assert_eq!(
            prices,
            vec![Decimal::from(20), Decimal::from(36), Decimal::from(64), Decimal::from(120)]
        );
        let months: Vec<u32> = quote.offers.iter().map(|o| o.duration_months).collect();
        assert_eq!(months, vec![3, 6, 12, 24]);
        assert_eq!(quote.expiry.status, "no_expiry");
        assert_eq!(quote.expiry.summary, "never expires");
        assert!(quote.expiry.days.is_none());
    }

    #[test]
    fn quote_classifies_expired_license() {
        let expired = now().plus_seconds(-10 * 86_400);
        let quote = build_quote(&license(Some(expired)), &settings(0), now());
        assert_eq!(quote.expiry.status, "expired");
        assert_eq!(quote.expiry.whole_days, Some(10));
        assert_eq!(quote.expiry.summary, "expired 10 days ago");
        assert_eq!(quote.quoted_at, now());
    }

    #[test]
    fn quote_classifies_active_license() {
        let expires = now().plus_seconds(15 * 86_400 + 43_200);
        let quote = build_quote(&license(Some(expires)), &settings(0), now());
        assert_eq!(quote.expiry.status, "active");
        assert!((quote.expiry.days.unwrap() - 15.5).abs() < 1e-9);
        assert_eq!(quote.expiry.summary, "15 days left");
    }

    #[test]
    fn display_price_rounds_to_cents() {
        let mut lic = license(None);
        lic.base_product_price = Decimal::new(9_999, 2);
        let quote = build_quote(&lic, &settings(0), now());
        // 99.99 × 0.25 = 24.9975
        assert_eq!(quote.offers[0].price, Decimal::new(249_975, 4));
        assert_eq!(quote.offers[0].display_price, Decimal::new(2_500, 2));
    }

    #[test]
    fn disabled_settings_rejected() {
        let disabled = RenewalSettings {
            allow_update_renewal: false,
            update_renewal_discount: Decimal::ZERO,
        };
        assert!(matches!(ensure_enabled(&disabled), Err(AppError::PreconditionFailed(_))));
        assert!(ensure_enabled(&settings(0)).is_ok());
    }

    #[test]
    fn selection_request_validation() {
        let ok = SelectionRequest {
            license_id: 5,
            product_id: 0,
            duration_months: 12,
        };
        assert!(ok.validate().is_ok());

        let bad_duration = SelectionRequest {
            duration_months: 7,
            ..ok
        };
        assert!(bad_duration.validate().unwrap_err().contains('7'));

        let negative = SelectionRequest { license_id: -1, ..ok };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn quote_query_rejects_negative_ids() {
        assert!(QuoteQuery { license_id: 0, product_id: -4 }.validate().is_err());
        assert!(QuoteQuery::default().validate().is_ok());
    }
}
