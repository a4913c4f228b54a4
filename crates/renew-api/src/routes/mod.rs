//! # API Route Modules
//!
//! - `renewals`: renewal quotes (offers plus expiry status) and priced plan
//!   selection for the checkout hand-off.

pub mod renewals;
