//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from the environment (`DB_*` and `PATIENT_API_*`) or an
//! optional configuration file. A local `.env` file is consulted only when the
//! process environment does not already name a database host.

use std::ffi::OsString;
use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{DEFAULT_DATE_PATTERN, DateCodec, DatePatternError};
use crate::outbound::persistence::{DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, PoolConfig};

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_NAME: &str = "medical-consulting";
const DEFAULT_PORT: u16 = 5000;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A settings struct failed to load or validate.
    #[error("failed to load {section} settings: {message}")]
    Load {
        section: &'static str,
        message: String,
    },
    /// The configured date format uses unsupported tokens.
    #[error(transparent)]
    DateFormat(#[from] DatePatternError),
    /// The database settings do not form a valid connection URL.
    #[error("invalid database {part}")]
    DatabaseUrl { part: &'static str },
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    /// Server host name.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Login role.
    pub user: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Database name.
    pub name: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
}

impl DatabaseSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_DB_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_DB_PORT)
    }

    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(DEFAULT_DB_USER)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }

    /// PostgreSQL connection URL assembled from the individual settings.
    ///
    /// Credentials and the database name are percent-encoded.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        let invalid = |part: &'static str| SettingsError::DatabaseUrl { part };
        let mut url = Url::parse("postgres://localhost/").map_err(|_| invalid("url"))?;
        url.set_host(Some(self.host())).map_err(|_| invalid("host"))?;
        url.set_port(Some(self.port())).map_err(|()| invalid("port"))?;
        url.set_username(self.user()).map_err(|()| invalid("user"))?;
        url.set_password(self.password.as_deref())
            .map_err(|()| invalid("password"))?;
        url.path_segments_mut()
            .map_err(|()| invalid("name"))?
            .clear()
            .push(self.name());
        Ok(url.into())
    }

    /// Pool configuration for [`database_url`](Self::database_url).
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_MIN_IDLE))))
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PATIENT_API")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Birth date pattern built from `yyyy`, `MM` and `dd`.
    pub date_format: Option<String>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_PATTERN)
    }

    /// Codec for the configured date format.
    pub fn date_codec(&self) -> Result<DateCodec, SettingsError> {
        Ok(DateCodec::new(self.date_format())?)
    }
}

/// Both settings sections.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Load every section from the environment and configuration files.
    ///
    /// Command-line arguments are not consulted; `program` only names the
    /// binary in diagnostics.
    pub fn load(program: &str) -> Result<Self, SettingsError> {
        let args = || [OsString::from(program)];
        let database =
            DatabaseSettings::load_from_iter(args()).map_err(|err| SettingsError::Load {
                section: "database",
                message: err.to_string(),
            })?;
        let server = ServerSettings::load_from_iter(args()).map_err(|err| SettingsError::Load {
            section: "server",
            message: err.to_string(),
        })?;
        Ok(Self { database, server })
    }
}

/// Load `.env` when `DB_HOST` is absent from the process environment.
///
/// Returns whether a file was loaded.
pub fn load_dotenv() -> bool {
    if std::env::var_os("DB_HOST").is_some() {
        debug!("DB_HOST already set; skipping .env");
        return false;
    }
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            true
        }
        Err(err) if err.not_found() => false,
        Err(err) => {
            warn!(error = %err, "failed to read .env");
            false
        }
    }
}
