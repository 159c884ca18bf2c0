mod settings;

pub use settings::{
    DirectoryConfig, LocalizationConfig, LoggingConfig, NotificationConfig, OtelConfig, ServerConfig, Settings,
};
