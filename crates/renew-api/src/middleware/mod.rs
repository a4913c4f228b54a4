//! # Middleware Modules
//!
//! Tower middleware layers for the API service. Request tracing uses
//! `tower_http::trace::TraceLayer` directly in [`crate::app`].

pub mod metrics;
