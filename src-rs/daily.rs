use chrono::NaiveDate;
use log::{error, info, warn};

use crate::mail::{daily_body, daily_subject, quoted_verse, send_to_all, Delivery, MailError, MailTransport};
use crate::result::RunReport;
use crate::scripture::{LookupError, ScriptureSource};
use crate::verses::{
    initialize, load_or_initialize, persist, LoadedState, RotationError, RotationState, Selector, StateSource,
    StateStore, VerseSource,
};

pub enum MailSetup {
    Ready {
        transport: Box<dyn MailTransport>,
        recipients: Vec<String>,
    },
    Unavailable(MailError),
    Disabled,
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Write the advanced rotation back to the store.
    pub persist: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { persist: true }
    }
}

pub struct DailyVerse {
    pub verses: Box<dyn VerseSource>,
    pub store: Box<dyn StateStore>,
    pub selector: Selector,
    pub scripture: Result<Box<dyn ScriptureSource>, LookupError>,
    pub mail: MailSetup,
    pub options: RunOptions,
}

impl DailyVerse {
    pub fn new(
        verses: Box<dyn VerseSource>,
        store: Box<dyn StateStore>,
        selector: Selector,
        scripture: Result<Box<dyn ScriptureSource>, LookupError>,
    ) -> Self {
        Self {
            verses,
            store,
            selector,
            scripture,
            mail: MailSetup::Disabled,
            options: RunOptions::default(),
        }
    }

    pub fn with_mail(mut self, mail: MailSetup) -> Self {
        self.mail = mail;
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Only a verse source failure aborts the run; everything after the
    /// selection degrades into the report.
    pub fn run(&mut self, today: NaiveDate) -> Result<RunReport, RotationError> {
        let loaded = self.load()?;
        let state_source = loaded.source;
        let mut state = loaded.state;

        let selection = self.selector.next(&mut state);
        if selection.cycle_completed {
            info!(
                "completed full cycle of {} verses, reshuffled for next round",
                state.len()
            );
        }
        info!("verse of the day: {}", selection.verse);

        let persist_error = if self.options.persist {
            match persist(self.store.as_ref(), &state) {
                Ok(()) => None,
                Err(err) => {
                    error!("{}", err);
                    Some(err.to_string())
                }
            }
        } else {
            info!("dry run, rotation state not persisted");
            None
        };

        let (scripture, lookup_error) = match self.lookup(&selection.verse) {
            Ok(text) => (Some(text), None),
            Err(err) => {
                error!("scripture lookup for {} failed: {}", selection.verse, err);
                (None, Some(err))
            }
        };

        let (deliveries, mail_error) =
            self.dispatch(today, &selection.verse, scripture.as_deref());

        Ok(RunReport {
            date: today,
            verse: selection.verse,
            scripture,
            cycle_completed: selection.cycle_completed,
            state_source,
            persist_error,
            lookup_error,
            deliveries,
            mail_error,
        })
    }

    /// Current rotation without advancing or persisting it.
    pub fn status(&mut self) -> Result<LoadedState, RotationError> {
        self.load()
    }

    /// Starts a new cycle from the current verse list, so edits to the list
    /// take effect. Any persisted rotation is overwritten.
    pub fn reset(&mut self) -> Result<RotationState, RotationError> {
        let state = initialize(self.verses.as_ref(), &mut self.selector).map_err(|err| {
            error!("{}", err);
            err
        })?;
        persist(self.store.as_ref(), &state)?;
        info!(
            "rotation reset, {} verses reshuffled from {}",
            state.len(),
            self.verses.describe()
        );
        Ok(state)
    }

    fn load(&mut self) -> Result<LoadedState, RotationError> {
        let loaded = load_or_initialize(self.store.as_ref(), self.verses.as_ref(), &mut self.selector)
            .map_err(|err| {
                error!("{}", err);
                err
            })?;
        match (&loaded.source, &loaded.discarded) {
            (StateSource::Persisted, _) => info!(
                "loaded rotation state at {}/{}",
                loaded.state.cursor(),
                loaded.state.len()
            ),
            (StateSource::Fresh, Some(reason)) => warn!(
                "discarded persisted rotation state ({}), started fresh from {}",
                reason,
                self.verses.describe()
            ),
            (StateSource::Fresh, None) => info!(
                "no rotation state yet, shuffled {} verses from {}",
                loaded.state.len(),
                self.verses.describe()
            ),
        }
        Ok(loaded)
    }

    fn lookup(&self, reference: &str) -> Result<String, String> {
        match &self.scripture {
            Ok(source) => source.lookup(reference).map_err(|err| err.to_string()),
            Err(err) => Err(format!("scripture client unavailable: {}", err)),
        }
    }

    fn dispatch(
        &self,
        today: NaiveDate,
        reference: &str,
        scripture: Option<&str>,
    ) -> (Vec<Delivery>, Option<String>) {
        let (transport, recipients) = match &self.mail {
            MailSetup::Ready {
                transport,
                recipients,
            } => (transport, recipients),
            MailSetup::Unavailable(err) => {
                error!("mail step skipped: {}", err);
                return (Vec::new(), Some(err.to_string()));
            }
            MailSetup::Disabled => {
                info!("mail step disabled");
                return (Vec::new(), None);
            }
        };
        if recipients.is_empty() {
            warn!("no recipients configured, nothing to send");
            return (Vec::new(), None);
        }

        let subject = daily_subject(today);
        let body = daily_body(&quoted_verse(reference, scripture));
        let deliveries = send_to_all(transport.as_ref(), recipients, &subject, &body);
        for delivery in &deliveries {
            match &delivery.error {
                None => info!("daily verse sent to {}", delivery.recipient),
                Some(err) => error!("could not send daily verse to {}: {}", delivery.recipient, err),
            }
        }
        (deliveries, None)
    }
}
