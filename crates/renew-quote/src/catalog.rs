//! # Plan Catalog
//!
//! The fixed renewal plans, in the order they are offered:
//!
//! | months | factor | savings % |
//! |--------|--------|-----------|
//! | 3      | 0.25   | 0         |
//! | 6      | 0.45   | 10        |
//! | 12     | 0.80   | 20        |
//! | 24     | 1.50   | 25        |
//!
//! `savings_percent` is a catalog constant shown to customers. It is not
//! the ratio between factors and must not be recomputed from prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::QuoteError;

/// A renewal duration offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PlanDuration {
    ThreeMonths,
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
}

impl PlanDuration {
    /// Length of the plan in months.
    pub fn months(&self) -> u32 {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
            Self::TwentyFourMonths => 24,
        }
    }

    /// The catalog row for this duration.
    pub fn entry(&self) -> &'static CatalogEntry {
        match self {
            Self::ThreeMonths => &PLAN_CATALOG[0],
            Self::SixMonths => &PLAN_CATALOG[1],
            Self::TwelveMonths => &PLAN_CATALOG[2],
            Self::TwentyFourMonths => &PLAN_CATALOG[3],
        }
    }
}

impl TryFrom<u32> for PlanDuration {
    type Error = QuoteError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            3 => Ok(Self::ThreeMonths),
            6 => Ok(Self::SixMonths),
            12 => Ok(Self::TwelveMonths),
            24 => Ok(Self::TwentyFourMonths),
            other => Err(QuoteError::UnknownDuration(other)),
        }
    }
}

impl From<PlanDuration> for u32 {
    fn from(d: PlanDuration) -> Self {
        d.months()
    }
}

impl std::fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// One row of the plan catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub duration: PlanDuration,
    /// Multiplier applied to the product's base price.
    pub price_factor: Decimal,
    /// Advertised savings, independent of `price_factor`.
    pub savings_percent: u8,
}

/// The renewal plans in offer order.
pub const PLAN_CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        duration: PlanDuration::ThreeMonths,
        price_factor: Decimal::from_parts(25, 0, 0, false, 2),
        savings_percent: 0,
    },
    CatalogEntry {
        duration: PlanDuration::SixMonths,
        price_factor: Decimal::from_parts(45, 0, 0, false, 2),
        savings_percent: 10,
    },
    CatalogEntry {
        duration: PlanDuration::TwelveMonths,
        price_factor: Decimal::from_parts(80, 0, 0, false, 2),
        savings_percent: 20,
    },
    CatalogEntry {
        duration: PlanDuration::TwentyFourMonths,
        price_factor: Decimal::from_parts(150, 0, 0, false, 2),
        savings_percent: 25,
    },
];
