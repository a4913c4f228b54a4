//! # License Record
//!
//! The read-only view of a customer's update license as supplied by the
//! license store. The renewal crates never mutate or persist it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::identity::{LicenseId, ProductId, UserId};
use crate::temporal::Timestamp;

/// A user's entitlement to product updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: LicenseId,
    /// Owning user.
    pub user_id: UserId,
    /// The entitled product.
    pub product_id: ProductId,
    /// Only active licenses are eligible for renewal.
    pub is_active: bool,
    /// End of the update window. `None` means it never expires.
    pub update_expires_at: Option<Timestamp>,
    /// List price of the product, the base for every renewal offer.
    pub base_product_price: Decimal,
}

impl License {
    /// Whether this license may be handed to `user` for renewal: it must be
    /// active and owned by that user.
    pub fn is_renewable_by(&self, user: UserId) -> bool {
        self.is_active && self.user_id == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license(user: i64, active: bool) -> License {
        License {
            id: LicenseId(5),
            user_id: UserId(user),
            product_id: ProductId(9),
            is_active: active,
            update_expires_at: None,
            base_product_price: Decimal::new(10_000, 2),
        }
    }

    #[test]
    fn renewable_requires_owner_and_active() {
        assert!(license(1, true).is_renewable_by(UserId(1)));
        assert!(!license(1, true).is_renewable_by(UserId(2)));
        assert!(!license(1, false).is_renewable_by(UserId(1)));
    }

    #[test]
    fn serializes_price_as_string() {
        let json = serde_json::to_value(license(1, true)).unwrap();
        assert_eq!(json["base_product_price"], "100.00");
        assert_eq!(json["update_expires_at"], serde_json::Value::Null);
    }
}
