pub mod clean;
pub mod client;
pub mod types;

pub use clean::clean_passage_html;
pub use client::{extract_passage_text, BibleApiClient, BibleApiConfig, DEFAULT_BASE_URL, DEFAULT_BIBLE_ID};
pub use types::{LookupError, Passage, ScriptureSource, SearchResponse};
