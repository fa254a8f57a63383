//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. Holds the issue operations, the optional database
//! pool (for readiness checks), and the configuration the server was
//! started with.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::issues::PgIssueStore;
use crate::service::IssueService;
use crate::store::memory::InMemoryIssueStore;
use crate::store::IssueStore;

/// Server configuration, read from the environment by the binary.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. If `None`, authentication is disabled.
    pub auth_token: Option<String>,
    /// Postgres connection string. If `None`, issues are kept in memory.
    pub database_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            database_url: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from `PORT`, `AUTH_TOKEN` and `DATABASE_URL`.
    ///
    /// An unset or unparsable `PORT` falls back to 8080; empty values of the
    /// other two count as unset.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "PORT is not a valid port number, using 8080");
                8080
            }),
            Err(_) => 8080,
        };

        Self {
            port,
            auth_token: non_empty("AUTH_TOKEN"),
            database_url: non_empty("DATABASE_URL"),
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Issue operations over the configured store.
    pub issues: IssueService,
    /// PostgreSQL pool, when the service runs against a database.
    pub db_pool: Option<PgPool>,
    pub config: AppConfig,
}

impl AppState {
    /// In-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// State over Postgres when `db_pool` is given, in memory otherwise.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        let store: Arc<dyn IssueStore> = match &db_pool {
            Some(pool) => Arc::new(PgIssueStore::new(pool.clone())),
            None => Arc::new(InMemoryIssueStore::new()),
        };
        Self::with_store(config, store, db_pool)
    }

    /// State over an explicit store.
    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn IssueStore>,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            issues: IssueService::new(store),
            db_pool,
            config,
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
    fn config_debug_redacts_secrets() {
        let config = AppConfig {
            port: 9000,
            auth_token: Some("tok".into()),
            database_url: Some("postgres://user:pw@db/issues".into()),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("9000"));
        assert!(!debug.contains("tok\""));
        assert!(!debug.contains("pw@db"));
    }

    #[test]
    fn default_state_is_in_memory() {
        let state = AppState::default();
        assert!(state.db_pool.is_none());
        assert_eq!(state.config.port, 8080);
    }
}
