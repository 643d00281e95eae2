//! Application settings.
//!
//! Sources, later ones winning:
//! 1. `settings.toml` in the working directory (or the file named by
//!    `MESS_SETTINGS`), optional.
//! 2. Environment variables prefixed with `MESS_`, nested with `__`, e.g.
//!    `MESS_CREDENTIALS__ADMIN__PASSWORD`.
//!
//! Missing optional keys fall back to their defaults.

use std::net::{IpAddr, SocketAddr};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const SETTINGS_PATH_VAR: &str = "MESS_SETTINGS";

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: default_port(),
            database: default_database(),
        }
    }
}

impl Server {
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.bind.as_deref().unwrap_or("127.0.0.1").parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub admin: Account,
    pub student: Account,
}

impl From<Credentials> for server::Credentials {
    fn from(value: Credentials) -> Self {
        server::Credentials {
            admin: server::Account {
                username: value.admin.username,
                password: value.admin.password,
            },
            student: server::Account {
                username: value.student.username,
                password: value.student.password,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    pub credentials: Credentials,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database() -> Database {
    Database::Sqlite("mess.db".to_string())
}

fn environment() -> Environment {
    Environment::with_prefix("MESS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| "settings".to_string());
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(&path).required(false))
                .add_source(environment()),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
