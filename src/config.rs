use std::error::Error;
use std::fmt;
use std::time::Duration;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const TABLE: &str = "company_tickets";
const STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Supabase { url: String, key: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub backend: StoreBackend,
    pub table: String,
    pub store_timeout: Duration,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::Invalid { var, value } => write!(f, "{} has invalid value '{}'", var, value),
        }
    }
}

impl Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| HOST.to_string());
        let port = lookup("PORT")
            .and_then(|port| port.parse().ok())
            .unwrap_or(PORT);

        let backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("supabase") => StoreBackend::Supabase {
                url: lookup("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                key: lookup("SUPABASE_KEY").ok_or(ConfigError::Missing("SUPABASE_KEY"))?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let table = lookup("SUPABASE_TABLE").unwrap_or_else(|| TABLE.to_string());

        let store_timeout = match lookup("STORE_TIMEOUT_SECS") {
            None => Duration::from_secs(STORE_TIMEOUT_SECS),
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "STORE_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Config {
            host,
            port,
            backend,
            table,
            store_timeout,
        })
    }
}
