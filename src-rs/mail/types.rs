use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub sender: String,
    pub password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub timeout_secs: u64,
}

impl MailConfig {
    /// Sender and password are required; the relay falls back to Gmail.
    pub fn new(
        sender: Option<String>,
        password: Option<String>,
        smtp_host: &str,
        smtp_port: u16,
    ) -> Result<Self, MailError> {
        let sender = sender
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| MailError::MissingConfig("EMAIL_SENDER".to_string()))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| MailError::MissingConfig("EMAIL_PASSWORD".to_string()))?;
        let smtp_host = if smtp_host.trim().is_empty() {
            DEFAULT_SMTP_HOST.to_string()
        } else {
            smtp_host.trim().to_string()
        };
        let smtp_port = if smtp_port == 0 {
            DEFAULT_SMTP_PORT
        } else {
            smtp_port
        };
        Ok(Self {
            sender: sender.trim().to_string(),
            password,
            smtp_host,
            smtp_port,
            timeout_secs: 30,
        })
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("missing required mail config: {0}")]
    MissingConfig(String),
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("smtp error: {0}")]
    Smtp(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Delivery {
    pub recipient: String,
    pub delivered: bool,
    pub error: Option<String>,
}

pub trait MailTransport: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_sender_and_password() {
        let err = MailConfig::new(None, Some("pw".into()), "", 0).unwrap_err();
        assert!(matches!(err, MailError::MissingConfig(ref k) if k == "EMAIL_SENDER"));

        let err = MailConfig::new(Some("me@example.com".into()), Some(String::new()), "", 0)
            .unwrap_err();
        assert!(matches!(err, MailError::MissingConfig(ref k) if k == "EMAIL_PASSWORD"));
    }

    #[test]
    fn test_config_defaults_relay() {
        let cfg = MailConfig::new(Some(" me@example.com ".into()), Some("pw".into()), " ", 0)
            .unwrap();
        assert_eq!(cfg.sender, "me@example.com");
        assert_eq!(cfg.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(cfg.smtp_port, DEFAULT_SMTP_PORT);
    }
}
