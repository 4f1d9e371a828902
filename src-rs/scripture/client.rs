use std::time::Duration;

use reqwest::blocking::Client;

use super::clean::clean_passage_html;
use super::types::{LookupError, ScriptureSource, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://rest.api.bible";
/// King James Version on api.bible.
pub const DEFAULT_BIBLE_ID: &str = "de4e12af7f28f599-02";

pub struct BibleApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub bible_id: String,
    pub timeout_secs: u64,
}

pub struct BibleApiClient {
    cfg: BibleApiConfig,
    client: Client,
}

impl BibleApiClient {
    pub fn new(mut cfg: BibleApiConfig) -> Result<Self, LookupError> {
        if cfg.base_url.is_empty() {
            cfg.base_url = DEFAULT_BASE_URL.to_string();
        }
        if cfg.bible_id.is_empty() {
            cfg.bible_id = DEFAULT_BIBLE_ID.to_string();
        }
        if cfg.timeout_secs == 0 {
            cfg.timeout_secs = 30;
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|err| LookupError::Network(err.to_string()))?;
        Ok(Self { cfg, client })
    }
}

impl ScriptureSource for BibleApiClient {
    fn lookup(&self, reference: &str) -> Result<String, LookupError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(LookupError::MissingKey)?;

        let resp = self
            .client
            .get(search_endpoint(&self.cfg.base_url, &self.cfg.bible_id))
            .query(&[("query", reference)])
            .header("api-key", api_key)
            .send()
            .map_err(|err| LookupError::Network(err.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|err| LookupError::Network(err.to_string()))?;
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
                body,
            });
        }

        extract_passage_text(&body, reference)
    }
}

pub fn search_endpoint(base_url: &str, bible_id: &str) -> String {
    format!(
        "{}/v1/bibles/{}/search",
        base_url.trim_end_matches('/'),
        bible_id
    )
}

/// Cleans every passage in a search response and joins them with a space.
pub fn extract_passage_text(body: &str, reference: &str) -> Result<String, LookupError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|err| LookupError::Parse(err.to_string()))?;

    let text = parsed
        .data
        .passages
        .iter()
        .map(|passage| clean_passage_html(&passage.content))
        .filter(|cleaned| !cleaned.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return Err(LookupError::NotFound(reference.to_string()));
    }
    Ok(text)
}
