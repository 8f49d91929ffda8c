//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PROFILES_*` environment variables, and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use profile_service::outbound::persistence::PoolConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the profile service binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILES")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server answers from fixtures.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
                )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "PROFILES_BIND_ADDR",
        "PROFILES_DATABASE_URL",
        "PROFILES_POOL_MAX_SIZE",
        "PROFILES_POOL_MIN_IDLE",
        "PROFILES_POOL_TIMEOUT_SECS",
        "PROFILES_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("profile-service")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.pool_config().is_none());
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PROFILES_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "PROFILES_DATABASE_URL",
                Some("postgres://localhost/profiles".to_owned()),
            ),
            ("PROFILES_POOL_MAX_SIZE", Some("4".to_owned())),
            ("PROFILES_POOL_MIN_IDLE", None),
            ("PROFILES_POOL_TIMEOUT_SECS", Some("5".to_owned())),
            ("PROFILES_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let pool = settings.pool_config().expect("database configured");

        assert_eq!(
            settings.bind_addr().expect("parses"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(pool.database_url(), "postgres://localhost/profiles");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(DEFAULT_POOL_MIN_IDLE));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let settings = ServerSettings {
            bind_addr: Some("nowhere".to_owned()),
            database_url: None,
            pool_max_size: None,
            pool_min_idle: None,
            pool_timeout_secs: None,
            run_migrations: false,
        };
        let error = settings.bind_addr().expect_err("not an address");
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidInput);
    }
}
