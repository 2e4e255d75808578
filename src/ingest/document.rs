//! Corpus document loading
//!
//! The corpus is a JSON document holding songs under a `"Song"` key, or a
//! bare array of song records. Record fields are optional at this layer so
//! that a missing field is reported as an invalid record, not a parse error.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One song as it appears in the corpus document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl CorpusRecord {
    pub fn new(
        artist: impl Into<String>,
        title: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            artist: Some(artist.into()),
            title: Some(title.into()),
            lyrics: Some(lyrics.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusDocument {
    Keyed {
        #[serde(rename = "Song")]
        songs: Vec<CorpusRecord>,
    },
    Bare(Vec<CorpusRecord>),
}

/// Parse a corpus document from JSON text
pub fn parse_corpus(content: &str) -> Result<Vec<CorpusRecord>> {
    let document: CorpusDocument = serde_json::from_str(content).map_err(|e| {
        Error::CorpusFormat(format!(
            "expected {{\"Song\": [...]}} or a list of songs: {}",
            e
        ))
    })?;

    Ok(match document {
        CorpusDocument::Keyed { songs } => songs,
        CorpusDocument::Bare(songs) => songs,
    })
}

/// Read and parse a corpus document from disk
pub fn load_corpus(path: &Path) -> Result<Vec<CorpusRecord>> {
    debug!("Loading corpus from {:?}", path);
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read corpus {}: {}", path.display(), e),
        ))
    })?;
    parse_corpus(&content)
}
