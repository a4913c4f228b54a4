//! # Expiry Classification
//!
//! Classifies a license's update window relative to an explicit `now`:
//!
//! ```text
//! update_expires_at absent          → NoExpiry
//! days_left = (expires − now) / 1d  → days_left <  0 → Expired { days_overdue: |days_left| }
//!                                     days_left >= 0 → Active  { days_remaining: days_left }
//! ```
//!
//! The boundary `expires == now` is Active with zero days remaining.
//! Day counts keep their fractional part; whole-day rounding is a display
//! concern handled by [`ExpiryStatus::whole_days`] and [`ExpiryStatus::summary`].

use renew_core::{Timestamp, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Tri-state temporal status of a license's update window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// The license has no expiry date.
    NoExpiry,
    /// Updates are still covered for `days_remaining` days (≥ 0).
    Active { days_remaining: f64 },
    /// Update coverage ended `days_overdue` days ago (> 0).
    Expired { days_overdue: f64 },
}

/// Classify `update_expires_at` against `now`.
pub fn classify(update_expires_at: Option<Timestamp>, now: Timestamp) -> ExpiryStatus {
    let Some(expires_at) = update_expires_at else {
        return ExpiryStatus::NoExpiry;
    };

    let days_left = expires_at.seconds_since(&now) as f64 / SECONDS_PER_DAY;
    if days_left < 0.0 {
        ExpiryStatus::Expired {
            days_overdue: days_left.abs(),
        }
    } else {
        ExpiryStatus::Active {
            days_remaining: days_left,
        }
    }
}

impl ExpiryStatus {
    /// Whether renewal coverage is currently in force (never-expiring counts).
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Expired { .. })
    }

    /// Machine-readable state name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoExpiry => "no_expiry",
            Self::Active { .. } => "active",
            Self::Expired { .. } => "expired",
        }
    }

    /// Fractional day count for the current state, `None` for `NoExpiry`.
    pub fn days(&self) -> Option<f64> {
        match *self {
            Self::NoExpiry => None,
            Self::Active { days_remaining } => Some(days_remaining),
            Self::Expired { days_overdue } => Some(days_overdue),
        }
    }

    /// Day count truncated to whole days, `None` for `NoExpiry`.
    pub fn whole_days(&self) -> Option<u64> {
        self.days().map(|d| d.floor() as u64)
    }

    /// Short human-readable description.
    pub fn summary(&self) -> String {
        match (self, self.whole_days()) {
            (Self::NoExpiry, _) | (_, None) => "never expires".to_string(),
            (Self::Active { .. }, Some(n)) => format!("{n} {} left", day_word(n)),
            (Self::Expired { .. }, Some(n)) => format!("expired {n} {} ago", day_word(n)),
        }
    }
}

fn day_word(n: u64) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}
