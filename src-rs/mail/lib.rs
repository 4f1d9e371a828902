pub mod compose;
pub mod sender;
pub mod types;

pub use compose::{daily_body, daily_subject, quoted_verse};
pub use sender::{build_message, send_to_all, SmtpMailer};
pub use types::{Delivery, MailConfig, MailError, MailTransport, OutgoingMail, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
