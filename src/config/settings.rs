use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub localization: LocalizationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Permit name used to select employee recipients
    #[serde(default = "default_employee_event")]
    pub employee_event: String,
    /// Transport backend: "outbox" or "noop"
    #[serde(default = "default_transport")]
    pub transport: String,
    /// Whether the SMS channel accepts messages
    #[serde(default = "default_sms_enabled")]
    pub sms_enabled: bool,
    /// Maximum entries kept by the outbox transport; the oldest are evicted first
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// JSON file with sellers, contractors, employees and statuses
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizationConfig {
    /// JSON object of message overrides merged over the built-in catalog
    pub catalog_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_employee_event() -> String {
    "tsGoodsReturn".to_string()
}

fn default_transport() -> String {
    "outbox".to_string()
}

fn default_sms_enabled() -> bool {
    true
}

fn default_outbox_capacity() -> usize {
    crate::messaging::DEFAULT_OUTBOX_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "goods-return-notification-service".to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8082)?
            .set_default("notification.employee_event", "tsGoodsReturn")?
            .set_default("notification.transport", "outbox")?
            .set_default("notification.sms_enabled", true)?
            .set_default("notification.outbox_capacity", default_outbox_capacity() as i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER__PORT, NOTIFICATION__SMS_ENABLED, DIRECTORY__SEED_FILE, etc.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            notification: NotificationConfig::default(),
            directory: DirectoryConfig::default(),
            localization: LocalizationConfig::default(),
            logging: LoggingConfig::default(),
            otel: OtelConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            employee_event: default_employee_event(),
            transport: default_transport(),
            sms_enabled: default_sms_enabled(),
            outbox_capacity: default_outbox_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}
