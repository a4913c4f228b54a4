//! # Renewal Pricing
//!
//! Every offer is priced as
//!
//! ```text
//! price = base_price × price_factor × (1 − discount_percent / 100)
//! ```
//!
//! in `Decimal` with no intermediate rounding. Rounding to cents happens
//! only at presentation via [`RenewalOffer::display_price`].
//!
//! The discount is not clamped. A negative discount inflates every price
//! and a discount above 100 makes every price negative. Callers that want
//! a range check must apply it before calling [`compute_offers`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogEntry, PlanDuration, PLAN_CATALOG};

/// Number of offers produced for every license.
pub const OFFER_COUNT: usize = PLAN_CATALOG.len();

/// Errors raised when turning a customer's choice into a priced selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Requested duration is not one of the catalog plans.
    #[error("unsupported renewal duration: {0} months (expected 3, 6, 12 or 24)")]
    UnknownDuration(u32),
}

/// A priced renewal option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalOffer {
    pub duration: PlanDuration,
    /// Full-precision price.
    pub price: Decimal,
    /// Catalog savings figure, copied verbatim.
    pub savings_percent: u8,
}

impl RenewalOffer {
    /// Price rounded half-away-from-zero to two decimal places.
    pub fn display_price(&self) -> Decimal {
        self.price
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn from_entry(entry: &CatalogEntry, base_price: Decimal, discount_multiplier: Decimal) -> Self {
        Self {
            duration: entry.duration,
            price: base_price
                .saturating_mul(entry.price_factor)
                .saturating_mul(discount_multiplier),
            savings_percent: entry.savings_percent,
        }
    }
}

/// `1 − discount_percent / 100`, unclamped.
fn discount_multiplier(discount_percent: Decimal) -> Decimal {
    Decimal::ONE.saturating_sub(discount_percent / Decimal::ONE_HUNDRED)
}

/// Price every catalog plan for `base_price` under `discount_percent`.
///
/// Returns exactly [`OFFER_COUNT`] offers in catalog order (3, 6, 12, 24
/// months). Total over all inputs: products beyond the `Decimal` range
/// saturate instead of panicking.
pub fn compute_offers(base_price: Decimal, discount_percent: Decimal) -> [RenewalOffer; OFFER_COUNT] {
    let multiplier = discount_multiplier(discount_percent);
    PLAN_CATALOG.map(|entry| RenewalOffer::from_entry(&entry, base_price, multiplier))
}

/// Pick the offer matching `months` out of a computed offer set.
pub fn select_offer(offers: &[RenewalOffer], months: u32) -> Result<RenewalOffer, QuoteError> {
    let duration = PlanDuration::try_from(months)?;
    offers
        .iter()
        .find(|offer| offer.duration == duration)
        .copied()
        .ok_or(QuoteError::UnknownDuration(months))
}
