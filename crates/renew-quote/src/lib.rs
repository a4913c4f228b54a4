//! # renew-quote: Renewal Quote Engine
//!
//! Pure, synchronous computations over a resolved license:
//!
//! - **Catalog** (`catalog.rs`): the fixed set of renewal plans, each a
//!   duration with a price factor and a marketing savings figure.
//! - **Pricing** (`pricing.rs`): `compute_offers()` applies the catalog
//!   factors and the global discount to a base price; `select_offer()`
//!   validates a requested duration against the computed offers.
//! - **Expiry** (`expiry.rs`): `classify()` turns an optional expiry instant
//!   and a caller-supplied `now` into an [`ExpiryStatus`].
//!
//! Nothing in this crate reads the clock, the environment, or settings.
//! The discount and `now` are always parameters.

pub mod catalog;
pub mod expiry;
pub mod pricing;

pub use catalog::{CatalogEntry, PlanDuration, PLAN_CATALOG};
pub use expiry::{classify, ExpiryStatus};
pub use pricing::{compute_offers, select_offer, QuoteError, RenewalOffer, OFFER_COUNT};
