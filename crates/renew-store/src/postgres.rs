//! # PostgreSQL License Store
//!
//! Reads licenses joined to their product's list price. Expected schema:
//!
//! ```sql
//! CREATE TABLE products (id BIGINT PRIMARY KEY, price NUMERIC NOT NULL);
//! CREATE TABLE licenses (
//!     id                BIGINT PRIMARY KEY,
//!     user_id           BIGINT NOT NULL,
//!     product_id        BIGINT NOT NULL REFERENCES products (id),
//!     is_active         BOOLEAN NOT NULL,
//!     update_expires_at TIMESTAMPTZ
//! );
//! ```
//!
//! No `ORDER BY`: with several matches the first row PostgreSQL returns
//! wins. Absent selector sides are bound as `0`, which never names a row.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use renew_core::{License, LicenseId, LicenseSelector, ProductId, Timestamp, UserId};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::store::LicenseStore;

const FIND_ACTIVE_SQL: &str = "\
SELECT l.id, l.user_id, l.product_id, l.is_active, l.update_expires_at,
       p.price AS base_product_price
FROM licenses l
JOIN products p ON p.id = l.product_id
WHERE l.user_id = $1
  AND (l.id = $2 OR l.product_id = $3)
  AND l.is_active = TRUE";

/// Row shape returned by [`FIND_ACTIVE_SQL`].
#[derive(Debug, sqlx::FromRow)]
struct LicenseRow {
    id: i64,
    user_id: i64,
    product_id: i64,
    is_active: bool,
    update_expires_at: Option<DateTime<Utc>>,
    base_product_price: Decimal,
}

impl From<LicenseRow> for License {
    fn from(row: LicenseRow) -> Self {
        License {
            id: LicenseId(row.id),
            user_id: UserId(row.user_id),
            product_id: ProductId(row.product_id),
            is_active: row.is_active,
            update_expires_at: row.update_expires_at.map(Timestamp::from_utc),
            base_product_price: row.base_product_price,
        }
    }
}

/// License store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgLicenseStore {
    pool: PgPool,
}

impl PgLicenseStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a small pool to `database_url`.
    pub async fn connect(database_url: &str, acquire_timeout: Duration) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        tracing::info!("connected license store to PostgreSQL");
        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl LicenseStore for PgLicenseStore {
    fn find_active(
        &self,
        user: UserId,
        selector: LicenseSelector,
    ) -> impl Future<Output = Result<Vec<License>, StoreError>> + Send {
        let (license_id, product_id) = selector.to_raw();
        async move {
            let rows: Vec<LicenseRow> = sqlx::query_as(FIND_ACTIVE_SQL)
                .bind(user.get())
                .bind(license_id)
                .bind(product_id)
                .fetch_all(&self.pool)
                .await?;
            Ok(rows.into_iter().map(License::from).collect())
        }
    }
}
