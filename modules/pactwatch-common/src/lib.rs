pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, DateRule, SmtpConfig, TelegramConfig, DEFAULT_EXPIRY_THRESHOLD_DAYS};
pub use error::PactwatchError;
pub use types::*;
