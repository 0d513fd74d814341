use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing::info;

/// Default lead time for the expiry sweep, in days. Overridable via
/// `PACTWATCH_THRESHOLD_DAYS` and the `check --threshold-days` flag.
pub const DEFAULT_EXPIRY_THRESHOLD_DAYS: i64 = 90;

/// Which expiry-date extraction rule ingestion uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRule {
    /// First date-shaped substring anywhere in the document text.
    #[default]
    First,
    /// Date-shaped substring preceded by an expiry keyword.
    Keyword,
}

/// Application configuration loaded from environment variables.
///
/// Collaborator channels are `None` when unconfigured and stay disabled.
/// Secrets and endpoints live here, never in code constants.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub threshold_days: i64,
    pub date_rule: DateRule,

    // Review service
    pub streamline_url: Option<String>,

    // Notification channels
    pub telegram: Option<TelegramConfig>,
    pub smtp: Option<SmtpConfig>,

    // Analysis assistant
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub to: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let store_path = env::var("PACTWATCH_STORE")
            .unwrap_or_else(|_| "contracts.jsonl".to_string())
            .into();

        let threshold_days = match env::var("PACTWATCH_THRESHOLD_DAYS") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow!("PACTWATCH_THRESHOLD_DAYS must be a whole number of days, got '{raw}'")
            })?,
            Err(_) => DEFAULT_EXPIRY_THRESHOLD_DAYS,
        };

        let date_rule = match env::var("PACTWATCH_DATE_RULE") {
            Ok(raw) => match raw.as_str() {
                "first" => DateRule::First,
                "keyword" => DateRule::Keyword,
                other => {
                    return Err(anyhow!(
                        "PACTWATCH_DATE_RULE must be 'first' or 'keyword', got '{other}'"
                    ))
                }
            },
            Err(_) => DateRule::default(),
        };

        let telegram = match (env::var("TELEGRAM_BOT_TOKEN"), env::var("TELEGRAM_CHAT_ID")) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            (Err(_), Err(_)) => None,
            _ => {
                return Err(anyhow!(
                    "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together"
                ))
            }
        };

        let smtp = match env::var("SMTP_HOST") {
            Ok(host) => {
                let port = env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .map_err(|_| anyhow!("SMTP_PORT must be a port number"))?;
                Some(SmtpConfig {
                    host,
                    port,
                    user: required_with("SMTP_USER", "SMTP_HOST")?,
                    password: required_with("SMTP_PASS", "SMTP_HOST")?,
                    to: required_with("ALERT_EMAIL_TO", "SMTP_HOST")?,
                })
            }
            Err(_) => None,
        };

        Ok(Self {
            store_path,
            threshold_days,
            date_rule,
            streamline_url: env::var("STREAMLINE_URL").ok(),
            telegram,
            smtp,
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
        })
    }

    /// Log which collaborators are configured without echoing secrets.
    pub fn log_redacted(&self) {
        info!(
            store = %self.store_path.display(),
            threshold_days = self.threshold_days,
            date_rule = ?self.date_rule,
            review = self.streamline_url.is_some(),
            telegram = self.telegram.is_some(),
            email = self.smtp.is_some(),
            analyst = self.openai_api_key.is_some(),
            "Configuration loaded"
        );
    }
}

fn required_with(key: &str, because: &str) -> Result<String> {
    env::var(key).map_err(|_| anyhow!("{key} is required when {because} is set"))
}
