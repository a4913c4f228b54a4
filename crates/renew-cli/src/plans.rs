//! # Plans Subcommand
//!
//! Prints the renewal plan catalog: duration, price factor, and the
//! advertised savings figure.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use renew_quote::PLAN_CATALOG;
use rust_decimal::Decimal;
use serde::Serialize;

/// Arguments for the `renew plans` subcommand.
#[derive(Args, Debug, Default)]
pub struct PlansArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PlanRow {
    duration_months: u32,
    price_factor: Decimal,
    savings_percent: u8,
}

/// Execute the plans subcommand.
pub fn run_plans(args: &PlansArgs, out: &mut impl Write) -> Result<u8> {
    let rows: Vec<PlanRow> = PLAN_CATALOG
        .iter()
        .map(|entry| PlanRow {
            duration_months: entry.duration.months(),
            price_factor: entry.price_factor,
            savings_percent: entry.savings_percent,
        })
        .collect();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(0);
    }

    writeln!(out, "{:>6}  {:>6}  {:>7}", "months", "factor", "savings")?;
    for row in &rows {
        writeln!(
            out,
            "{:>6}  {:>6}  {:>6}%",
            row.duration_months, row.price_factor, row.savings_percent
        )?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(json: bool) -> String {
        let mut buf = Vec::new();
        let code = run_plans(&PlansArgs { json }, &mut buf).unwrap();
        assert_eq!(code, 0);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_lists_every_plan() {
        let out = render(false);
        assert_eq!(out.lines().count(), 1 + PLAN_CATALOG.len());
        assert!(out.contains("0.80"));
        assert!(out.contains("25%"));
    }

    #[test]
    fn json_output_is_catalog_order() {
        let rows: Vec<serde_json::Value> = serde_json::from_str(&render(true)).unwrap();
        let months: Vec<u64> = rows.iter().map(|r| r["duration_months"].as_u64().unwrap()).collect();
        assert_eq!(months, vec![3, 6, 12, 24]);
        assert_eq!(rows[3]["price_factor"], "1.50");
    }
}
