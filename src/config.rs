//! Runtime configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `bookshelf.toml` (or the file named by `BOOKSHELF_CONFIG`), if present
//! 3. `BOOKSHELF_<SECTION>__<KEY>` environment variables,
//!    e.g. `BOOKSHELF_AUTH__API_KEY`

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub shutdown_grace_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthSettings {
    /// Request header carrying the key.
    pub header: String,
    pub api_key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

const ENV_PREFIX: &str = "BOOKSHELF";
const CONFIG_PATH_VAR: &str = "BOOKSHELF_CONFIG";
const DEFAULT_FILE: &str = "bookshelf";

impl Settings {
    /// Loads settings from the process environment.
    pub fn load() -> Result<Self, Error> {
        Self::layered(env::vars().collect())
    }

    /// Layers defaults, the config file and `vars`. `vars` stands in for the
    /// process environment, both for picking the file and for overrides.
    fn layered(vars: Map<String, String>) -> Result<Self, Error> {
        let file = vars.get(CONFIG_PATH_VAR).cloned().unwrap_or_else(|| DEFAULT_FILE.into());
        let config = Self::defaults()?
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("server.shutdown_grace_secs", 5_i64)?
            .set_default("auth.header", "X-API-Key")?
            .set_default("auth.api_key", "secret-key")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
