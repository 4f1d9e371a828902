use std::fs;
use std::path::PathBuf;

use super::types::RotationError;

pub trait VerseSource {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Vec<String>, RotationError>;
}

/// Line-oriented verse file. Blank lines are skipped.
pub struct VerseStore {
    path: PathBuf,
}

impl VerseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VerseSource for VerseStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<String>, RotationError> {
        let bytes = fs::read(&self.path).map_err(|source| RotationError::SourceUnavailable {
            origin: self.describe(),
            source,
        })?;
        // stray non-UTF-8 bytes only damage their own line
        let verses = parse_verses(&String::from_utf8_lossy(&bytes));
        if verses.is_empty() {
            return Err(RotationError::EmptySource(self.describe()));
        }
        Ok(verses)
    }
}

/// Fixed in-process verse list.
pub struct StaticVerses {
    verses: Vec<String>,
}

impl StaticVerses {
    pub fn new<I, S>(verses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verses: verses.into_iter().map(Into::into).collect(),
        }
    }
}

impl VerseSource for StaticVerses {
    fn describe(&self) -> String {
        "static verse list".to_string()
    }

    fn load(&self) -> Result<Vec<String>, RotationError> {
        let verses: Vec<String> = self
            .verses
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
            .collect();
        if verses.is_empty() {
            return Err(RotationError::EmptySource(self.describe()));
        }
        Ok(verses)
    }
}

pub fn parse_verses(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}
