//! # renew-core: Foundational Types for License Renewal
//!
//! Leaf crate of the renewal workspace. Defines the identifiers, timestamps,
//! and the read-only `License` record that every other crate speaks in.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `UserId`, `LicenseId`, and
//!    `ProductId` cannot be swapped for one another. The raw value `0` is
//!    reserved for "not provided" and never names a stored record.
//!
//! 2. **Selectors, not sentinel pairs.** A `(license_id_or_zero,
//!    product_id_or_zero)` pair is normalized once into a `LicenseSelector`
//!    so downstream code matches on `Option`s instead of zeros.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision.
//!    Nothing in the workspace reads the wall clock except at a binary's
//!    edge; business logic receives `now` as a parameter.
//!
//! 4. **Decimal money.** Prices are `rust_decimal::Decimal`; nothing is
//!    rounded until presentation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `renew-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod license;
pub mod money;
pub mod temporal;

pub use error::ValidationError;
pub use identity::{LicenseId, LicenseSelector, ProductId, UserId};
pub use license::License;
pub use money::parse_amount;
pub use temporal::{Timestamp, SECONDS_PER_DAY};

pub use rust_decimal::Decimal;
