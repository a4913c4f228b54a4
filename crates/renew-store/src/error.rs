//! Store-level failures. These never reach end users directly; the resolver
//! folds them into [`crate::ResolveError`].

use thiserror::Error;

/// Failure reading from a license store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not be reached or the query failed.
    #[error("license store unavailable: {0}")]
    Unavailable(String),

    /// The read did not complete within the caller's deadline.
    #[error("license store read timed out after {millis} ms")]
    Timeout {
        /// The deadline that elapsed.
        millis: u64,
    },

    /// A row came back that could not be turned into a license.
    #[error("malformed license row: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) | sqlx::Error::Decode(_) => {
                Self::Decode(err.to_string())
            }
            other => Self::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn missing_column_is_decode() {
        let err = StoreError::from(sqlx::Error::ColumnNotFound("price".into()));
        assert!(matches!(err, StoreError::Decode(msg) if msg.contains("price")));
    }

    #[test]
    fn timeout_message_has_deadline() {
        assert!(StoreError::Timeout { millis: 2000 }.to_string().contains("2000 ms"));
    }
}
