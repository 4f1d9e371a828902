use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::AppConfig;
use crate::mail::{MailConfig, MailError, SmtpMailer};
use crate::scripture::{BibleApiClient, BibleApiConfig, LookupError};

/// Loads `KEY=value` pairs into the process environment without overriding
/// variables that are already set. `None` searches for `.env` from the
/// working directory upwards. A missing file is `Ok(None)`.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

pub fn env_or(key: &str, fallback: String) -> String {
    env_opt(key).unwrap_or(fallback)
}

pub fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

pub fn env_parse<T: FromStr>(key: &str, fallback: T) -> T {
    match env::var(key) {
        Ok(value) => value.trim().parse::<T>().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// One address per line; blank lines and `#` comments are skipped.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

pub fn load_recipients(path: &Path) -> io::Result<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(parse_recipients(&raw))
}

pub fn build_scripture_client(cfg: &AppConfig) -> Result<BibleApiClient, LookupError> {
    BibleApiClient::new(BibleApiConfig {
        api_key: cfg.api_key.clone(),
        base_url: cfg.bible_api_url.clone(),
        bible_id: cfg.bible_id.clone(),
        timeout_secs: cfg.http_timeout_secs,
    })
}

pub fn build_mailer(cfg: &AppConfig) -> Result<SmtpMailer, MailError> {
    let mut mail_cfg = MailConfig::new(
        cfg.email_sender.clone(),
        cfg.email_password.clone(),
        &cfg.smtp_host,
        cfg.smtp_port,
    )?;
    if cfg.http_timeout_secs > 0 {
        mail_cfg.timeout_secs = cfg.http_timeout_secs;
    }
    SmtpMailer::new(&mail_cfg)
}
