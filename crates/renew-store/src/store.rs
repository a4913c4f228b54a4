//! # License Store Boundary
//!
//! [`LicenseStore`] is the single read the renewal flow performs. An
//! implementation must filter by owner, by id-or-product, and by the active
//! flag, and return matches in its natural query order. Which of several
//! matches ends up resolved is therefore backend-defined.

use std::future::Future;

use renew_core::{License, LicenseSelector, UserId};

use crate::error::StoreError;
use crate::memory::MemoryLicenseStore;
use crate::postgres::PgLicenseStore;

/// Read access to licenses.
pub trait LicenseStore: Send + Sync {
    /// Active licenses owned by `user` that match `selector`, in store order.
    fn find_active(
        &self,
        user: UserId,
        selector: LicenseSelector,
    ) -> impl Future<Output = Result<Vec<License>, StoreError>> + Send;
}

/// The store chosen at startup: PostgreSQL when a database is configured,
/// otherwise an in-memory store.
#[derive(Debug, Clone)]
pub enum LicenseBackend {
    Memory(MemoryLicenseStore),
    Postgres(PgLicenseStore),
}

impl LicenseBackend {
    /// Backend name for logs and readiness output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

impl LicenseStore for LicenseBackend {
    fn find_active(
        &self,
        user: UserId,
        selector: LicenseSelector,
    ) -> impl Future<Output = Result<Vec<License>, StoreError>> + Send {
        async move {
            match self {
                Self::Memory(store) => store.find_active(user, selector).await,
                Self::Postgres(store) => store.find_active(user, selector).await,
            }
        }
    }
}

impl From<MemoryLicenseStore> for LicenseBackend {
    fn from(store: MemoryLicenseStore) -> Self {
        Self::Memory(store)
    }
}

impl From<PgLicenseStore> for LicenseBackend {
    fn from(store: PgLicenseStore) -> Self {
        Self::Postgres(store)
    }
}
