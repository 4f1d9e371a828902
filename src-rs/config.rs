use std::path::{Path, PathBuf};

use crate::helpers::{env_opt, env_or, env_parse};
use crate::mail::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use crate::scripture::{DEFAULT_BASE_URL, DEFAULT_BIBLE_ID};

pub const DEFAULT_LOG_FILE: &str = "app.log";
/// Log file value that sends output to stderr instead.
pub const STDERR_LOG: &str = "-";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub verses_file: PathBuf,
    pub state_file: PathBuf,
    pub recipients_file: PathBuf,
    pub log_file: Option<PathBuf>,
    pub api_key: Option<String>,
    pub bible_api_url: String,
    pub bible_id: String,
    pub email_sender: Option<String>,
    pub email_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verses_file: PathBuf::from("verses.txt"),
            state_file: PathBuf::from("verse_state.json"),
            recipients_file: PathBuf::from("email_list.txt"),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            api_key: None,
            bible_api_url: DEFAULT_BASE_URL.to_string(),
            bible_id: DEFAULT_BIBLE_ID.to_string(),
            email_sender: None,
            email_password: None,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            http_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            verses_file: env_opt("DAILY_VERSE_VERSES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.verses_file),
            state_file: env_opt("DAILY_VERSE_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
            recipients_file: env_opt("DAILY_VERSE_RECIPIENTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.recipients_file),
            log_file: env_opt("DAILY_VERSE_LOG_FILE")
                .map(PathBuf::from)
                .or(defaults.log_file),
            api_key: env_opt("API_KEY"),
            bible_api_url: env_or("BIBLE_API_URL", defaults.bible_api_url),
            bible_id: env_or("BIBLE_ID", defaults.bible_id),
            email_sender: env_opt("EMAIL_SENDER"),
            email_password: env_opt("EMAIL_PASSWORD"),
            smtp_host: env_or("SMTP_HOST", defaults.smtp_host),
            smtp_port: env_parse("SMTP_PORT", defaults.smtp_port),
            http_timeout_secs: env_parse("DAILY_VERSE_HTTP_TIMEOUT", defaults.http_timeout_secs),
        }
    }

    /// File to append logs to, or `None` for stderr.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|path| path.as_os_str() != STDERR_LOG)
    }
}
