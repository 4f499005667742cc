//! Configuration management for the library server

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Which storage adapter backs the API
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Mongo,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Connection string for the document database
    pub url: String,
    pub name: String,
    pub collection: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Command-line overrides, applied on top of every other source
#[derive(Debug, Default, Parser)]
#[command(name = "library-server", version, about = "Library book storage REST API")]
pub struct CliArgs {
    /// Document database connection string
    #[arg(long = "mongo-dsn")]
    pub mongo_dsn: Option<String>,

    /// Port to listen on
    #[arg(long = "rest-port")]
    pub rest_port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Storage backend
    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,
}

impl AppConfig {
    /// Load configuration from defaults, files, environment variables and CLI flags
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Self::defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with prefix LIBRARY_, e.g. LIBRARY_SERVER__PORT
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Legacy container variables
            .set_override_option("database.url", env::var("mongoDSN").ok())?
            .set_override_option("server.port", env::var("restPort").ok())?;

        Self::apply_args(builder, args)?.build()?.try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let server = ServerConfig::default();
        let database = DatabaseConfig::default();
        let logging = LoggingConfig::default();
        builder
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("database.backend", "mongo")?
            .set_default("database.url", database.url)?
            .set_default("database.name", database.name)?
            .set_default("database.collection", database.collection)?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)
    }

    fn apply_args(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        args: &CliArgs,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_override_option("database.url", args.mongo_dsn.clone())?
            .set_override_option("server.port", args.rest_port.map(i64::from))?
            .set_override_option("server.host", args.host.clone())?
            .set_override_option(
                "database.backend",
                args.store.map(|backend| match backend {
                    StoreBackend::Memory => "memory",
                    StoreBackend::Mongo => "mongo",
                }),
            )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongo,
            url: "mongodb://localhost:27017".to_string(),
            name: "WanShiTong".to_string(),
            collection: "library".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
