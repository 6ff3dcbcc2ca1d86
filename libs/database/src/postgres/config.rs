use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Connection pool settings for the siniestros database.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Apply pending migrations on start-up
    pub run_migrations: bool,
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Assemble a URL from discrete parts, as used when `DATABASE_URL` is absent.
    pub fn url_from_parts(host: &str, port: u16, user: &str, password: &str, name: &str) -> String {
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout_secs: 10,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 300,
            run_migrations: true,
            sqlx_logging: false,
        }
    }
}

/// `DATABASE_URL` wins; otherwise the URL is built from `DB_HOST`, `DB_PORT`,
/// `DB_USER`, `DB_PASSWORD` and `DB_NAME`. Pool knobs use the `DB_*` prefix.
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => Self::url_from_parts(
                &env_or_default("DB_HOST", "localhost"),
                env_parse_or("DB_PORT", 5432u16)?,
                &env_or_default("DB_USER", "postgres"),
                &env_or_default("DB_PASSWORD", "postgres"),
                &env_or_default("DB_NAME", "siniestros_viales"),
            ),
        };

        Ok(Self {
            url,
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: env_parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            acquire_timeout_secs: env_parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
            idle_timeout_secs: env_parse_or("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs)?,
            run_migrations: env_parse_or("DB_RUN_MIGRATIONS", defaults.run_migrations)?,
            sqlx_logging: env_parse_or("DB_SQLX_LOGGING", defaults.sqlx_logging)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_default_pool() {
        let config = PostgresConfig::new("postgres://localhost/siniestros");
        assert_eq!(config.url, "postgres://localhost/siniestros");
        assert_eq!(config.max_connections, 20);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_url_from_parts() {
        assert_eq!(
            PostgresConfig::url_from_parts("db", 5433, "app", "secreto", "siniestros"),
            "postgres://app:secreto@db:5433/siniestros"
        );
    }

    #[cfg(feature = "config")]
    mod from_env {
        use super::*;

        const DB_VARS: [&str; 8] = [
            "DATABASE_URL",
            "DB_HOST",
            "DB_PORT",
            "DB_USER",
            "DB_PASSWORD",
            "DB_NAME",
            "DB_MAX_CONNECTIONS",
            "DB_RUN_MIGRATIONS",
        ];

        fn with_db_env(overrides: &[(&'static str, &'static str)], f: impl FnOnce()) {
            let vars: Vec<(&str, Option<&str>)> = DB_VARS
                .iter()
                .map(|key| {
                    let value = overrides.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
                    (*key, value)
                })
                .collect();
            temp_env::with_vars(vars, f);
        }

        #[test]
        fn test_database_url_takes_precedence() {
            with_db_env(
                &[("DATABASE_URL", "postgres://u:p@h:1/x"), ("DB_HOST", "ignored")],
                || {
                    let config = PostgresConfig::from_env().unwrap();
                    assert_eq!(config.url, "postgres://u:p@h:1/x");
                },
            );
        }

        #[test]
        fn test_url_assembled_from_parts() {
            with_db_env(&[("DB_HOST", "pg"), ("DB_NAME", "viales")], || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.url, "postgres://postgres:postgres@pg:5432/viales");
            });
        }

        #[test]
        fn test_pool_overrides_and_flags() {
            with_db_env(
                &[("DB_MAX_CONNECTIONS", "50"), ("DB_RUN_MIGRATIONS", "false")],
                || {
                    let config = PostgresConfig::from_env().unwrap();
                    assert_eq!(config.max_connections, 50);
                    assert!(!config.run_migrations);
                },
            );
        }

        #[test]
        fn test_invalid_number_is_reported() {
            with_db_env(&[("DB_MAX_CONNECTIONS", "muchas")], || {
                let err = PostgresConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
            });
        }
    }
}
