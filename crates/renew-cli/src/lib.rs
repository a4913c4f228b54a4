//! # renew-cli: Offline Renewal Tooling
//!
//! Provides the `renew` command-line interface over the pure quote engine.
//! Nothing here touches a license store or settings: the base price,
//! discount and instants are all given on the command line.
//!
//! ## Subcommands
//!
//! - `renew plans`: print the plan catalog.
//! - `renew quote`: price every plan and optionally classify an expiry.
//! - `renew classify`: classify an expiry instant.
//!
//! ```bash
//! renew quote --base-price 100 --discount 20
//! renew quote --base-price 49.99 --discount 0 --expires-at 2025-03-01T00:00:00Z --json
//! renew classify --expires-at 2025-03-01T00:00:00Z --now 2025-02-14T12:00:00Z
//! ```

pub mod classify;
pub mod plans;
pub mod quote;

use renew_core::{Decimal, Timestamp};

/// Clap value parser for RFC 3339 instants. Any offset is accepted and
/// converted to UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, String> {
    Timestamp::parse_lenient(raw).map_err(|e| e.to_string())
}

/// Clap value parser for prices and percentages.
pub fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    renew_core::parse_amount(raw).map_err(|e| e.to_string())
}
