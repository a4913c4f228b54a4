//! # renew-store: Collaborator Boundaries and License Resolution
//!
//! The renewal engine is pure; everything it needs from the outside world
//! arrives through the traits defined here.
//!
//! - **License store** (`store.rs`): [`LicenseStore`] finds a user's active
//!   licenses by id-or-product. Adapters: [`MemoryLicenseStore`]
//!   (`memory.rs`) and [`PgLicenseStore`] (`postgres.rs`), unified by
//!   [`LicenseBackend`] for callers that choose at startup.
//! - **Settings** (`settings.rs`): [`SettingsSource`] answers typed lookups
//!   with caller-supplied defaults; [`RenewalSettings`] snapshots the two
//!   keys renewal cares about.
//! - **Resolver** (`resolver.rs`): [`LicenseResolver`] applies the
//!   ownership/activity invariant on top of a store and collapses every
//!   failure into [`ResolveError`], which keeps the internal cause for logs
//!   while exposing a single user-facing message.
//!
//! The store read is the only suspension point. Bounding it with a timeout
//! is the caller's job; see [`StoreError::Timeout`].

pub mod error;
pub mod memory;
pub mod postgres;
pub mod resolver;
pub mod settings;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryLicenseStore;
pub use postgres::PgLicenseStore;
pub use resolver::{LicenseResolver, ResolveError, LICENSE_NOT_FOUND};
pub use settings::{
    MemorySettings, RenewalSettings, SettingsSource, ALLOW_UPDATE_RENEWAL, UPDATE_RENEWAL_DISCOUNT,
};
pub use store::{LicenseBackend, LicenseStore};
