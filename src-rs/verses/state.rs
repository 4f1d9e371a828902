use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::rotation::Selector;
use super::source::VerseSource;
use super::types::{RotationError, StateError, StateSource};

/// Persisted permutation plus the index of the next unselected verse.
///
/// The legacy field names `verses` and `current_index` are accepted on load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    #[serde(alias = "verses")]
    pub(crate) items: Vec<String>,
    #[serde(alias = "current_index")]
    pub(crate) cursor: usize,
}

impl RotationState {
    pub fn new(items: Vec<String>, cursor: usize) -> Result<Self, StateError> {
        let state = Self { items, cursor };
        state.validate()?;
        Ok(state)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Verses left in the current cycle, including the one under the cursor.
    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.cursor)
    }

    pub fn validate(&self) -> Result<(), StateError> {
        if self.items.is_empty() {
            return Err(StateError::Parse("no items".to_string()));
        }
        if self.cursor >= self.items.len() {
            return Err(StateError::Parse(format!(
                "cursor {} out of range for {} items",
                self.cursor,
                self.items.len()
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string_pretty(self).map_err(|err| StateError::Parse(err.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, StateError> {
        let state: RotationState =
            serde_json::from_str(raw).map_err(|err| StateError::Parse(err.to_string()))?;
        state.validate()?;
        Ok(state)
    }
}

pub trait StateStore {
    /// `Ok(None)` means nothing has been persisted yet.
    fn load(&self) -> Result<Option<RotationState>, StateError>;
    fn save(&self, state: &RotationState) -> Result<(), StateError>;
}

pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<RotationState>, StateError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => RotationState::from_json(&raw).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StateError::Io(err)),
        }
    }

    fn save(&self, state: &RotationState) -> Result<(), StateError> {
        let serialized = state.to_json()?;
        let tmp = tmp_path(&self.path);
        let written = fs::write(&tmp, serialized).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(StateError::Io(err));
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "verse_state.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Keeps the serialized form in memory so malformed content can be injected.
#[derive(Default)]
pub struct MemoryStateStore {
    raw: RwLock<Option<String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: RwLock::new(Some(raw.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.read().ok()?.clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<RotationState>, StateError> {
        match self.raw() {
            Some(raw) => RotationState::from_json(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, state: &RotationState) -> Result<(), StateError> {
        let serialized = state.to_json()?;
        let mut slot = self
            .raw
            .write()
            .map_err(|_| StateError::Io(std::io::Error::other("state lock poisoned")))?;
        *slot = Some(serialized);
        Ok(())
    }
}

#[derive(Debug)]
pub struct LoadedState {
    pub state: RotationState,
    pub source: StateSource,
    /// Why a persisted state was thrown away, if one was.
    pub discarded: Option<StateError>,
}

pub fn load_or_initialize(
    store: &dyn StateStore,
    verses: &dyn VerseSource,
    selector: &mut Selector,
) -> Result<LoadedState, RotationError> {
    let discarded = match store.load() {
        Ok(Some(state)) => {
            return Ok(LoadedState {
                state,
                source: StateSource::Persisted,
                discarded: None,
            })
        }
        Ok(None) => None,
        Err(err) => Some(err),
    };

    Ok(LoadedState {
        state: initialize(verses, selector)?,
        source: StateSource::Fresh,
        discarded,
    })
}

/// Builds a new cycle from the current verse list, ignoring any persisted state.
pub fn initialize(
    verses: &dyn VerseSource,
    selector: &mut Selector,
) -> Result<RotationState, RotationError> {
    let candidates = verses
        .load()
        .map_err(|err| RotationError::InitializationFailed(Box::new(err)))?;
    if candidates.is_empty() {
        return Err(RotationError::InitializationFailed(Box::new(
            RotationError::EmptySource(verses.describe()),
        )));
    }
    Ok(selector.fresh_state(candidates))
}

pub fn persist(store: &dyn StateStore, state: &RotationState) -> Result<(), RotationError> {
    store.save(state).map_err(RotationError::PersistenceFailed)
}
