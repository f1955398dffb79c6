mod settings;

pub use settings::{DatabaseConfig, NotifyConfig, ServerConfig, Settings, SmtpConfig};
