//! # License Resolver
//!
//! Turns `(user, selector)` into exactly one renewable license or a
//! [`ResolveError`].
//!
//! The store is asked for active matches; the resolver then re-checks the
//! ownership/activity invariant on every returned record and drops
//! violators, so a misbehaving backend cannot hand out someone else's
//! license. Among the survivors the first in store order wins.
//!
//! Every failure carries the same user-facing text, [`LICENSE_NOT_FOUND`].
//! The variant records why, for logs only.

use renew_core::{License, LicenseSelector, UserId};
use thiserror::Error;

use crate::error::StoreError;
use crate::store::LicenseStore;

/// The only message end users see for any resolution failure.
pub const LICENSE_NOT_FOUND: &str = "license not found";

/// Why a license could not be resolved.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Neither a license id nor a product id was supplied.
    #[error("no license or product id supplied")]
    EmptySelector,

    /// The store returned no active license owned by the user.
    #[error("no active license for {user} matching {selector}")]
    NoMatch {
        user: UserId,
        selector: LicenseSelector,
    },

    /// The store read failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// The message shown to end users, identical for every cause.
    pub fn user_message(&self) -> &'static str {
        LICENSE_NOT_FOUND
    }

    /// Short cause label for structured logs.
    pub fn cause(&self) -> &'static str {
        match self {
            Self::EmptySelector => "empty_selector",
            Self::NoMatch { .. } => "no_match",
            Self::Store(StoreError::Timeout { .. }) => "store_timeout",
            Self::Store(StoreError::Unavailable(_)) => "store_unavailable",
            Self::Store(StoreError::Decode(_)) => "store_decode",
        }
    }
}

/// Resolves renewable licenses against a [`LicenseStore`].
#[derive(Debug, Clone)]
pub struct LicenseResolver<S> {
    store: S,
}

impl<S: LicenseStore> LicenseResolver<S> {
    /// Create a resolver over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Find the single active license owned by `user` matching `selector`.
    ///
    /// With several matches the first one in store order is returned;
    /// callers must not depend on which.
    pub async fn resolve(&self, user: UserId, selector: LicenseSelector) -> Result<License, ResolveError> {
        if selector.is_empty() {
            return Err(ResolveError::EmptySelector);
        }

        let candidates = self.store.find_active(user, selector).await?;
        let total = candidates.len();

        let license = candidates
            .into_iter()
            .find(|l| l.is_renewable_by(user) && selector.matches(l.id, l.product_id))
            .ok_or(ResolveError::NoMatch { user, selector })?;

        if total > 1 {
            tracing::debug!(
                %user,
                %selector,
                candidates = total,
                chosen = %license.id,
                "ambiguous license selector, using first match"
            );
        }

        Ok(license)
    }
}
