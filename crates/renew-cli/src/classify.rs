//! # Classify Subcommand
//!
//! Classifies an update-expiry instant relative to `--now` (default: the
//! current time, read here and nowhere deeper).

use std::io::Write;

use anyhow::Result;
use clap::Args;
use renew_core::Timestamp;
use renew_quote::{classify, ExpiryStatus};
use serde::Serialize;

/// Arguments for the `renew classify` subcommand.
#[derive(Args, Debug, Default)]
pub struct ClassifyArgs {
    /// End of the update window (RFC 3339). Omit for a license that never expires.
    #[arg(long, value_parser = crate::parse_timestamp)]
    pub expires_at: Option<Timestamp>,

    /// Instant to classify against (RFC 3339). Defaults to now.
    #[arg(long, value_parser = crate::parse_timestamp)]
    pub now: Option<Timestamp>,

    /// Emit JSON instead of a summary line.
    #[arg(long)]
    pub json: bool,
}

/// JSON form of a classification.
#[derive(Debug, Serialize)]
pub struct ExpiryReport {
    #[serde(flatten)]
    pub status: ExpiryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whole_days: Option<u64>,
    pub summary: String,
}

impl From<ExpiryStatus> for ExpiryReport {
    fn from(status: ExpiryStatus) -> Self {
        Self {
            status,
            whole_days: status.whole_days(),
            summary: status.summary(),
        }
    }
}

/// Execute the classify subcommand.
pub fn run_classify(args: &ClassifyArgs, out: &mut impl Write) -> Result<u8> {
    let now = args.now.unwrap_or_else(Timestamp::now);
    let status = classify(args.expires_at, now);
    tracing::debug!(%now, status = status.as_str(), "classified expiry");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &ExpiryReport::from(status))?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}: {}", status.as_str(), status.summary())?;
    }
    Ok(0)
}
