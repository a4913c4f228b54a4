//! # Identifier Newtypes
//!
//! Typed identifiers for users, licenses, and products. You cannot pass a
//! `ProductId` where a `LicenseId` is expected, which matters because the
//! resolver matches on *either* of the two.
//!
//! Identifiers are 64-bit signed integers to match the `BIGINT` columns of
//! the license store. The raw value `0` means "not provided"; it is
//! normalized away by [`LicenseSelector::from_raw`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Validate a raw identifier. Rejects negative values.
            pub fn new(raw: i64) -> Result<Self, ValidationError> {
                if raw < 0 {
                    return Err(ValidationError::NegativeId { kind: $kind, value: raw });
                }
                Ok(Self(raw))
            }

            /// Interpret a raw value where `0` means "not provided".
            pub fn from_raw_optional(raw: i64) -> Result<Option<Self>, ValidationError> {
                Self::new(raw).map(|id| (raw != 0).then_some(id))
            }

            /// Access the raw integer.
            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($kind, ":{}"), self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of an authenticated customer.
    UserId,
    "user"
);

integer_id!(
    /// Identifier of a license record.
    LicenseId,
    "license"
);

integer_id!(
    /// Identifier of a purchasable product.
    ProductId,
    "product"
);

/// Which license a renewal request is about.
///
/// A license matches when its id equals `license_id` **or** its product
/// equals `product_id`. Either side may be absent; when both are absent
/// nothing can match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseSelector {
    pub license_id: Option<LicenseId>,
    pub product_id: Option<ProductId>,
}

impl LicenseSelector {
    /// Build a selector from the raw `(license_id_or_zero, product_id_or_zero)` pair.
    pub fn from_raw(license_id: i64, product_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            license_id: LicenseId::from_raw_optional(license_id)?,
            product_id: ProductId::from_raw_optional(product_id)?,
        })
    }

    /// Select by license id only.
    pub fn by_license(id: LicenseId) -> Self {
        Self {
            license_id: Some(id),
            product_id: None,
        }
    }

    /// Select by product id only.
    pub fn by_product(id: ProductId) -> Self {
        Self {
            license_id: None,
            product_id: Some(id),
        }
    }

    /// True when neither side is set.
    pub fn is_empty(&self) -> bool {
        self.license_id.is_none() && self.product_id.is_none()
    }

    /// Whether a `(license, product)` pair satisfies the id-or-product match.
    pub fn matches(&self, license_id: LicenseId, product_id: ProductId) -> bool {
        self.license_id == Some(license_id) || self.product_id == Some(product_id)
    }

    /// Raw pair with `0` standing in for absent sides, as bound into SQL.
    pub fn to_raw(&self) -> (i64, i64) {
        (
            self.license_id.map_or(0, |id| id.0),
            self.product_id.map_or(0, |id| id.0),
        )
    }
}

impl std::fmt::Display for LicenseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.license_id, self.product_id) {
            (Some(l), Some(p)) => write!(f, "{l} or {p}"),
            (Some(l), None) => write!(f, "{l}"),
            (None, Some(p)) => write!(f, "{p}"),
            (None, None) => f.write_str("<empty selector>"),
        }
    }
}
