use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: SearchData,
    #[serde(default)]
    pub meta: Option<SearchMeta>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub passages: Vec<Passage>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Passage {
    pub id: String,
    pub bible_id: String,
    pub book_id: String,
    pub chapter_ids: Vec<String>,
    pub content: String,
    pub copyright: String,
    pub org_id: String,
    pub reference: String,
    pub verse_count: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchMeta {
    pub fums_token: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("scripture api key not configured")]
    MissingKey,
    #[error("scripture request failed: {0}")]
    Network(String),
    #[error("scripture service returned http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("could not parse scripture response: {0}")]
    Parse(String),
    #[error("no passage found for {0}")]
    NotFound(String),
}

pub trait ScriptureSource: Send + Sync {
    /// Resolves a reference such as `Isaiah 41:10` to cleaned passage text.
    fn lookup(&self, reference: &str) -> Result<String, LookupError>;
}
