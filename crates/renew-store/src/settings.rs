//! # Settings Collaborator
//!
//! Typed lookups with caller-supplied defaults. The renewal flow reads two
//! keys per request and passes the values into the engine explicitly:
//!
//! - [`ALLOW_UPDATE_RENEWAL`]: gate checked before anything else runs.
//! - [`UPDATE_RENEWAL_DISCOUNT`]: global discount percentage for pricing.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;

/// Settings key enabling renewals.
pub const ALLOW_UPDATE_RENEWAL: &str = "allow_update_renewal";

/// Settings key for the global renewal discount percentage.
pub const UPDATE_RENEWAL_DISCOUNT: &str = "update_renewal_discount";

/// Read access to administrator settings.
pub trait SettingsSource: Send + Sync {
    /// Boolean setting, or `default` when absent or not a boolean.
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Decimal setting, or `default` when absent or not a decimal.
    fn get_decimal(&self, key: &str, default: Decimal) -> Decimal;
}

/// A stored setting value.
#[derive(Debug, Clone, PartialEq)]
enum SettingValue {
    Bool(bool),
    Decimal(Decimal),
}

/// In-memory settings table. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Arc<RwLock<HashMap<String, SettingValue>>>,
}

impl MemorySettings {
    /// Create an empty settings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean value.
    pub fn set_bool(&self, key: impl Into<String>, value: bool) {
        self.values.write().insert(key.into(), SettingValue::Bool(value));
    }

    /// Set a decimal value.
    pub fn set_decimal(&self, key: impl Into<String>, value: Decimal) {
        self.values.write().insert(key.into(), SettingValue::Decimal(value));
    }

    /// Remove a key so lookups fall back to their defaults.
    pub fn unset(&self, key: &str) {
        self.values.write().remove(key);
    }
}

impl SettingsSource for MemorySettings {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.read().get(key) {
            Some(SettingValue::Bool(v)) => *v,
            _ => default,
        }
    }

    fn get_decimal(&self, key: &str, default: Decimal) -> Decimal {
        match self.values.read().get(key) {
            Some(SettingValue::Decimal(v)) => *v,
            _ => default,
        }
    }
}

/// Snapshot of the renewal-related settings for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalSettings {
    /// Whether renewals are offered at all.
    pub allow_update_renewal: bool,
    /// Global discount percentage. Not range-checked.
    pub update_renewal_discount: Decimal,
}

impl RenewalSettings {
    /// Read both keys from `source`, defaulting to disabled with no discount.
    pub fn load(source: &impl SettingsSource) -> Self {
        Self {
            allow_update_renewal: source.get_bool(ALLOW_UPDATE_RENEWAL, false),
            update_renewal_discount: source.get_decimal(UPDATE_RENEWAL_DISCOUNT, Decimal::ZERO),
        }
    }
}
