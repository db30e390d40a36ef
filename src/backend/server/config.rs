/**
 * Server Configuration
 *
 * This module handles loading of the server configuration from environment
 * variables and the optional PostgreSQL database connection.
 *
 * # Configuration Sources
 *
 * | Variable | Default | Meaning |
 * |---|---|---|
 * | `SERVER_PORT` | `3070` | Listen port |
 * | `DATABASE_URL` | unset | PostgreSQL URL; in-memory stores when unset |
 * | `ORCAX_ROUTE_PREFIXES` | `/api` | Comma-separated mount points of the API |
 * | `ORCAX_LEDGER_TIMEOUT_MS` | `2000` | Per-ledger query timeout |
 * | `ORCAX_PRESENCE_WINDOW_SECS` | `90` | Idle time before a user drops off the presence list (`0` keeps users until they leave) |
 * | `ORCAX_DEFAULT_WATER` .. `ORCAX_DEFAULT_BARLEY` | `0` | Grants for new user records |
 *
 * # Error Handling
 *
 * Malformed values are configuration errors and stop startup. A missing or
 * unreachable database is not: services fall back to in-memory state.
 */

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use sqlx::PgPool;

use crate::shared::{AssetDefaults, ConfigError, ResolverConfig};

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Everything the server needs besides the database pool
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Normalized mount points, each starting with `/` and without a trailing `/`
    pub route_prefixes: Vec<String>,
    /// `None` keeps joiners listed until they leave
    pub presence_window: Option<Duration>,
    pub resolver: ResolverConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3070,
            route_prefixes: vec!["/api".to_string()],
            presence_window: Some(Duration::from_secs(90)),
            resolver: ResolverConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_or("SERVER_PORT", 3070u16)?;

        let route_prefixes = match std::env::var("ORCAX_ROUTE_PREFIXES") {
            Ok(raw) => parse_prefixes(&raw)?,
            Err(_) => vec!["/api".to_string()],
        };

        let presence_secs = env_or("ORCAX_PRESENCE_WINDOW_SECS", 90u64)?;
        let presence_window = (presence_secs > 0).then(|| Duration::from_secs(presence_secs));

        let defaults = AssetDefaults {
            water: env_or("ORCAX_DEFAULT_WATER", 0.0)?,
            fertilizer: env_or("ORCAX_DEFAULT_FERTILIZER", 0.0)?,
            token: env_or("ORCAX_DEFAULT_TOKEN", 0.0)?,
            potato: env_or("ORCAX_DEFAULT_POTATO", 0.0)?,
            barley: env_or("ORCAX_DEFAULT_BARLEY", 0.0)?,
        };

        let resolver = ResolverConfig::builder()
            .defaults(defaults)
            .ledger_timeout(Duration::from_millis(env_or("ORCAX_LEDGER_TIMEOUT_MS", 2000u64)?))
            .build()?;

        Ok(Self {
            port,
            route_prefixes,
            presence_window,
            resolver,
        })
    }
}

/// Read `key`, falling back to `default` when it is unset
fn env_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: format!("{:?}: {}", raw, e),
        }),
        Err(_) => {
            tracing::debug!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}

/// Parse a comma-separated prefix list into normalized mount points
///
/// `"api, /orcax/ ,/"` becomes `["/api", "/orcax", "/"]`. Duplicates are dropped.
pub fn parse_prefixes(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut prefixes: Vec<String> = Vec::new();

    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let trimmed = part.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", trimmed)
        };
        if !prefixes.contains(&prefix) {
            prefixes.push(prefix);
        }
    }

    if prefixes.is_empty() {
        return Err(ConfigError::MissingValue("ORCAX_ROUTE_PREFIXES"));
    }
    Ok(prefixes)
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if `DATABASE_URL` is not set or connection fails
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Using in-memory stores.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory stores.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
