use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

/// Reads the service configuration from the process environment.
pub fn load() -> Result<Config> {
    from_lookup(|key| env::var(key).ok())
}

/// Builds a [`Config`] from any key lookup. `load` passes the environment.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

    Ok(Config {
        server: ServerConfig {
            port: parse_or(&lookup, "SERVER_PORT", 3000)?,
        },
        database: DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", false)?,
        },
    })
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value {raw:?}: {e}")),
        None => {
            tracing::debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
