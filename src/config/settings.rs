use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection URL; when empty the in-memory store is used
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u32,
}

/// Outbound mail transport configuration.
///
/// `secure = true` means implicit TLS (usually port 465); `false` means
/// STARTTLS upgrade on the submission port (usually 587).
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Fixed sender identity for every outgoing notification
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Recipient of admin-facing notifications
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Base URL embedded in the admin template's call-to-action link
    #[serde(default = "default_console_url")]
    pub console_url: String,
    /// Upper bound on a single transport call, in seconds
    #[serde(default = "default_dispatch_timeout")]
    pub timeout_seconds: u64,
    /// Extra send attempts after the first failure (0 = single attempt)
    #[serde(default)]
    pub retry_attempts: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024 // 2 MiB
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_idle_timeout() -> u32 {
    300
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_sender() -> String {
    "Wavelink Support <support@wavelink.co.ke>".to_string()
}

fn default_admin_email() -> String {
    "admin@wavelink.co.ke".to_string()
}

fn default_console_url() -> String {
    "https://admin.wavelink.co.ke".to_string()
}

fn default_dispatch_timeout() -> u64 {
    30
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "")?
            .set_default("smtp.host", "smtp.gmail.com")?
            .set_default("smtp.port", 587)?
            .set_default("smtp.secure", false)?
            .set_default("notify.timeout_seconds", 30)?
            .set_default("notify.retry_attempts", 0)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER__PORT, DATABASE__URL, SMTP__HOST, NOTIFY__ADMIN_EMAIL, etc.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(","),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: default_pool_size(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            secure: false,
            username: None,
            password: None,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            sender: default_sender(),
            admin_email: default_admin_email(),
            console_url: default_console_url(),
            timeout_seconds: default_dispatch_timeout(),
            retry_attempts: 0,
        }
    }
}
