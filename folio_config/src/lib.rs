use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use folio_models::email_address::EmailAddress;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_VAR: &str = "FOLIO_CONFIG";

/// Prefix of environment variables overriding single config values, e.g.
/// `FOLIO__EMAIL__PASSWORD`.
pub const ENV_PREFIX: &str = "FOLIO";

/// Load the default config, the files listed in `FOLIO_CONFIG` and the
/// `FOLIO__*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Some(extra) = std::env::var_os(CONFIG_PATHS_VAR) {
        paths.extend(std::env::split_paths(&extra));
    }

    load_with_env(&paths, Environment::with_prefix(ENV_PREFIX))
}

/// Load only the given config files, ignoring the environment.
pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    builder(paths)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn load_with_env(paths: &[impl AsRef<Path>], env: Environment) -> anyhow::Result<Config> {
    builder(paths)?
        .add_source(
            env.prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn builder(
    paths: &[impl AsRef<Path>],
) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub form: FormConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: EmailAddress,
    pub sender_name: String,
    pub password: Option<String>,
    pub connection_timeout: Duration,
    pub greeting_timeout: Duration,
    pub socket_timeout: Duration,
}

impl EmailConfig {
    /// The SMTP password, if one is configured. Empty values count as missing.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("sender", &self.sender)
            .field("sender_name", &self.sender_name)
            .field("password", &self.password().map(|_| "[sensitive]"))
            .field("connection_timeout", &self.connection_timeout)
            .field("greeting_timeout", &self.greeting_timeout)
            .field("socket_timeout", &self.socket_timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddress,
    pub fallback_email: EmailAddress,
    pub subject_prefix: String,
    pub verify_timeout: Duration,
    pub send_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct FormConfig {
    pub endpoint: Url,
    pub mailto_subject: String,
    pub mailto_body: String,
}
