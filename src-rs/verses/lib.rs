pub mod rotation;
pub mod source;
pub mod state;
pub mod types;

pub use rotation::{RandomShuffler, Selector, Shuffler};
pub use source::{StaticVerses, VerseSource, VerseStore};
pub use state::{initialize, load_or_initialize, persist, FileStateStore, LoadedState, MemoryStateStore, RotationState, StateStore};
pub use types::{RotationError, Selection, StateError, StateSource};
