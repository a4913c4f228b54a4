//! # Application State
//!
//! Shared state for the Axum application, passed to handlers via the
//! `State` extractor. Holds the collaborators the renewal flow reads:
//!
//! - **License resolver** over the configured [`LicenseBackend`].
//! - **Settings** source for the renewal gate and discount.
//! - **Prometheus handle**, when the binary installed a recorder.
//!
//! Nothing here is mutated per request; the renewal engine itself is
//! stateless.

use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use renew_core::{License, LicenseSelector, UserId};
use renew_store::{
    LicenseBackend, LicenseResolver, MemoryLicenseStore, MemorySettings, RenewalSettings, ResolveError,
    StoreError,
};

/// Default deadline for the license store read.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Application configuration.
///
/// Custom `Debug` redacts the auth secret.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Shared bearer secret. `None` runs in development mode.
    pub auth_token: Option<String>,
    /// Deadline for a single license store read.
    pub lookup_timeout: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: LicenseResolver<LicenseBackend>,
    pub settings: MemorySettings,
    pub metrics_handle: Option<PrometheusHandle>,
    pub config: AppConfig,
}

impl AppState {
    /// In-memory state with default configuration and empty stores.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), MemoryLicenseStore::new().into(), MemorySettings::new())
    }

    /// State over the given backend and settings.
    pub fn with_config(config: AppConfig, backend: LicenseBackend, settings: MemorySettings) -> Self {
        Self {
            resolver: LicenseResolver::new(backend),
            settings,
            metrics_handle: None,
            config,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Snapshot the renewal settings for one request.
    pub fn renewal_settings(&self) -> RenewalSettings {
        RenewalSettings::load(&self.settings)
    }

    /// Resolve a license, bounding the store read by the configured timeout.
    pub async fn resolve_license(
        &self,
        user: UserId,
        selector: LicenseSelector,
    ) -> Result<License, ResolveError> {
        let deadline = self.config.lookup_timeout;
        match tokio::time::timeout(deadline, self.resolver.resolve(user, selector)).await {
            Ok(result) => result,
            Err(_) => Err(ResolveError::Store(StoreError::Timeout {
                millis: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
            })),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let config = AppConfig {
            auth_token: Some("super-secret".into()),
            ..AppConfig::default()
        };
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn default_state_is_memory_backed_and_disabled() {
        let state = AppState::new();
        assert_eq!(state.resolver.store().kind(), "memory");
        assert!(!state.renewal_settings().allow_update_renewal);
        assert!(state.metrics_handle.is_none());
    }
}
