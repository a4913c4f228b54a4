//! # In-Memory License Store
//!
//! Thread-safe, cloneable store backed by an insertion-ordered `Vec`.
//! Insertion order is the query order, so the first inserted match is the
//! one a resolver sees first.
//!
//! The lock is `parking_lot::RwLock`: non-poisoning, and never held across
//! an `.await`.

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use renew_core::{License, LicenseId, LicenseSelector, UserId};

use crate::error::StoreError;
use crate::store::LicenseStore;

/// In-memory license table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLicenseStore {
    records: Arc<RwLock<Vec<License>>>,
}

impl MemoryLicenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `licenses`, in order.
    pub fn with_licenses(licenses: impl IntoIterator<Item = License>) -> Self {
        Self {
            records: Arc::new(RwLock::new(licenses.into_iter().collect())),
        }
    }

    /// Insert a license, replacing any existing record with the same id in
    /// place. Returns the replaced record.
    pub fn upsert(&self, license: License) -> Option<License> {
        let mut guard = self.records.write();
        match guard.iter_mut().find(|existing| existing.id == license.id) {
            Some(slot) => Some(std::mem::replace(slot, license)),
            None => {
                guard.push(license);
                None
            }
        }
    }

    /// Retrieve a license by id regardless of owner or activity.
    pub fn get(&self, id: LicenseId) -> Option<License> {
        self.records.read().iter().find(|l| l.id == id).cloned()
    }

    /// Remove a license by id.
    pub fn remove(&self, id: LicenseId) -> Option<License> {
        let mut guard = self.records.write();
        let pos = guard.iter().position(|l| l.id == id)?;
        Some(guard.remove(pos))
    }

    /// Number of stored licenses.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(&self, user: UserId, selector: LicenseSelector) -> Vec<License> {
        self.records
            .read()
            .iter()
            .filter(|l| l.user_id == user && l.is_active && selector.matches(l.id, l.product_id))
            .cloned()
            .collect()
    }
}

impl LicenseStore for MemoryLicenseStore {
    fn find_active(
        &self,
        user: UserId,
        selector: LicenseSelector,
    ) -> impl Future<Output = Result<Vec<License>, StoreError>> + Send {
        let found = self.matching(user, selector);
        async move { Ok(found) }
    }
}
