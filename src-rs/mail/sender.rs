use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::types::{Delivery, MailConfig, MailError, MailTransport, OutgoingMail};

/// STARTTLS relay with plain credentials.
pub struct SmtpMailer {
    from: Mailbox,
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(cfg: &MailConfig) -> Result<Self, MailError> {
        let from = parse_mailbox(&cfg.sender)?;
        let transport = SmtpTransport::starttls_relay(&cfg.smtp_host)
            .map_err(|err| MailError::Smtp(err.to_string()))?
            .port(cfg.smtp_port)
            .credentials(Credentials::new(cfg.sender.clone(), cfg.password.clone()))
            .timeout(Some(Duration::from_secs(cfg.timeout_secs)))
            .build();
        Ok(Self { from, transport })
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(&self.from, mail)?;
        self.transport
            .send(&message)
            .map(|_| ())
            .map_err(|err| MailError::Smtp(err.to_string()))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

pub fn build_message(from: &Mailbox, mail: &OutgoingMail) -> Result<Message, MailError> {
    let to = parse_mailbox(&mail.to)?;
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|err| MailError::Build(err.to_string()))
}

/// One attempt per recipient. A failure is recorded and the loop moves on.
pub fn send_to_all(
    transport: &dyn MailTransport,
    recipients: &[String],
    subject: &str,
    body: &str,
) -> Vec<Delivery> {
    recipients
        .iter()
        .map(|recipient| {
            let mail = OutgoingMail {
                to: recipient.clone(),
                subject: subject.to_string(),
                body: body.to_string(),
            };
            match transport.send(&mail) {
                Ok(()) => Delivery {
                    recipient: recipient.clone(),
                    delivered: true,
                    error: None,
                },
                Err(err) => Delivery {
                    recipient: recipient.clone(),
                    delivered: false,
                    error: Some(err.to_string()),
                },
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every mail and fails the addresses listed in `reject`.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub(crate) sent: Mutex<Vec<OutgoingMail>>,
        pub(crate) reject: Vec<String>,
    }

    impl MailTransport for RecordingTransport {
        fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
            if self.reject.contains(&mail.to) {
                return Err(MailError::Smtp(format!("550 mailbox unavailable: {}", mail.to)));
            }
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    #[test]
    fn test_failure_does_not_block_later_recipients() {
        let transport = RecordingTransport {
            reject: vec!["bad@example.com".to_string()],
            ..Default::default()
        };
        let recipients = vec![
            "one@example.com".to_string(),
            "bad@example.com".to_string(),
            "two@example.com".to_string(),
        ];

        let deliveries = send_to_all(&transport, &recipients, "subject", "body");

        assert_eq!(deliveries.len(), 3);
        assert!(deliveries[0].delivered);
        assert!(!deliveries[1].delivered);
        assert!(deliveries[1].error.as_deref().unwrap().contains("550"));
        assert!(deliveries[2].delivered);

        let sent = transport.sent.lock().unwrap();
        let to: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
        assert_eq!(to, vec!["one@example.com", "two@example.com"]);
    }

    #[test]
    fn test_build_message_headers() {
        let from: Mailbox = "sender@example.com".parse().unwrap();
        let mail = OutgoingMail {
            to: "reader@example.com".to_string(),
            subject: "Daily Bible Verse - Monday, January 2, 2006".to_string(),
            body: "Hello!".to_string(),
        };

        let message = build_message(&from, &mail).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: sender@example.com"));
        assert!(raw.contains("To: reader@example.com"));
        assert!(raw.contains("Subject: Daily Bible Verse - Monday, January 2, 2006"));
        assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let from: Mailbox = "sender@example.com".parse().unwrap();
        let mail = OutgoingMail {
            to: "not an address".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        };
        assert!(matches!(
            build_message(&from, &mail),
            Err(MailError::InvalidAddress(_))
        ));
    }
}
