use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mail::Delivery;
use crate::verses::StateSource;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub date: NaiveDate,
    pub verse: String,
    pub scripture: Option<String>,
    pub cycle_completed: bool,
    pub state_source: StateSource,
    pub persist_error: Option<String>,
    pub lookup_error: Option<String>,
    pub deliveries: Vec<Delivery>,
    pub mail_error: Option<String>,
}

impl RunReport {
    pub fn delivered_count(&self) -> usize {
        self.deliveries.iter().filter(|d| d.delivered).count()
    }

    pub fn failed_count(&self) -> usize {
        self.deliveries.len() - self.delivered_count()
    }
}
