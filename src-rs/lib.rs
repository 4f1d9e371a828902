pub mod config;
pub mod daily;
pub mod helpers;
pub mod result;

#[path = "verses/lib.rs"]
pub mod verses;
#[path = "scripture/lib.rs"]
pub mod scripture;
#[path = "mail/lib.rs"]
pub mod mail;

pub use config::AppConfig;
pub use daily::{DailyVerse, MailSetup, RunOptions};
pub use result::RunReport;
