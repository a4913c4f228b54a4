//! # Quote Subcommand
//!
//! Prices every renewal plan for a base price and discount, the same
//! computation the API runs for a resolved license. With `--expires-at`
//! the quote also carries the expiry classification.
//!
//! The discount is taken as given: negative values inflate prices and
//! values above 100 produce negative prices.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use renew_core::Timestamp;
use renew_quote::{classify, compute_offers, RenewalOffer};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::classify::ExpiryReport;

/// Arguments for the `renew quote` subcommand.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Product list price.
    #[arg(long, value_parser = crate::parse_decimal, allow_hyphen_values = true)]
    pub base_price: Decimal,

    /// Global renewal discount, in percent.
    #[arg(long, value_parser = crate::parse_decimal, allow_hyphen_values = true)]
    pub discount: Decimal,

    /// End of the update window (RFC 3339).
    #[arg(long, value_parser = crate::parse_timestamp)]
    pub expires_at: Option<Timestamp>,

    /// Instant to classify against (RFC 3339). Defaults to now.
    #[arg(long, value_parser = crate::parse_timestamp)]
    pub now: Option<Timestamp>,

    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct OfferLine {
    duration_months: u32,
    price: Decimal,
    display_price: Decimal,
    savings_percent: u8,
}

impl From<&RenewalOffer> for OfferLine {
    fn from(offer: &RenewalOffer) -> Self {
        Self {
            duration_months: offer.duration.months(),
            price: offer.price,
            display_price: offer.display_price(),
            savings_percent: offer.savings_percent,
        }
    }
}

#[derive(Debug, Serialize)]
struct QuoteReport {
    base_price: Decimal,
    discount_percent: Decimal,
    offers: Vec<OfferLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry: Option<ExpiryReport>,
}

/// Execute the quote subcommand.
pub fn run_quote(args: &QuoteArgs, out: &mut impl Write) -> Result<u8> {
    if args.discount < Decimal::ZERO || args.discount > Decimal::ONE_HUNDRED {
        tracing::warn!(discount = %args.discount, "discount outside 0..=100, prices are not clamped");
    }

    let offers = compute_offers(args.base_price, args.discount);
    let expiry = args.expires_at.map(|expires_at| {
        let now = args.now.unwrap_or_else(Timestamp::now);
        ExpiryReport::from(classify(Some(expires_at), now))
    });

    let report = QuoteReport {
        base_price: args.base_price,
        discount_percent: args.discount,
        offers: offers.iter().map(OfferLine::from).collect(),
        expiry,
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(0);
    }

    writeln!(out, "{:>6}  {:>12}  {:>7}", "months", "price", "savings")?;
    for line in &report.offers {
        writeln!(
            out,
            "{:>6}  {:>12}  {:>6}%",
            line.duration_months, line.display_price, line.savings_percent
        )?;
    }
    if let Some(expiry) = &report.expiry {
        writeln!(out, "expiry: {}", expiry.summary)?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: QuoteArgs,
    }

    fn parse(argv: &[&str]) -> QuoteArgs {
        let mut full = vec!["renew-quote"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    fn render(args: &QuoteArgs) -> String {
        let mut buf = Vec::new();
        assert_eq!(run_quote(args, &mut buf).unwrap(), 0);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_shows_rounded_prices() {
        let out = render(&parse(&["--base-price", "100", "--discount", "20"]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("20.00"));
        assert!(lines[4].contains("120.00"));
        assert!(lines[4].trim_end().ends_with("25%"));
    }

    #[test]
    fn json_keeps_full_precision() {
        let out = render(&parse(&["--base-price", "99.99", "--discount", "0", "--json"]));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["offers"][0]["price"], "24.9975");
        assert_eq!(value["offers"][0]["display_price"], "25.00");
        assert!(value.get("expiry").is_none());
    }

    #[test]
    fn negative_discount_is_accepted() {
        let args = parse(&["--base-price", "100", "--discount", "-50", "--json"]);
        assert_eq!(args.discount, Decimal::from(-50));
        let value: serde_json::Value = serde_json::from_str(&render(&args)).unwrap();
        let price: Decimal = value["offers"][0]["price"].as_str().unwrap().parse().unwrap();
        assert_eq!(price, Decimal::new(375, 1));
    }

    #[test]
    fn expiry_is_classified_against_now() {
        let args = parse(&[
            "--base-price",
            "10",
            "--discount",
            "0",
            "--expires-at",
            "2024-01-01T00:00:00Z",
            "--now",
            "2024-01-03T00:00:00Z",
        ]);
        let out = render(&args);
        assert!(out.ends_with("expiry: expired 2 days ago\n"));
    }

    #[test]
    fn bad_amount_is_a_usage_error() {
        let argv = ["renew-quote", "--base-price", "ten", "--discount", "0"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }
}
