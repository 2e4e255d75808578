//! Validated query requests
//!
//! Inbound artist/title strings are trimmed and checked here, before any
//! lookup runs, so the service itself only sees well-formed requests.

use crate::error::{Error, Result};

/// Request for one specific song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    artist: String,
    title: String,
}

impl SongQuery {
    pub fn new(artist: &str, title: &str) -> Result<Self> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() || title.is_empty() {
            return Err(Error::invalid("Artist and song required"));
        }
        Ok(Self {
            artist: artist.to_string(),
            title: title.to_string(),
        })
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Request scoped to one artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistQuery {
    artist: String,
}

impl ArtistQuery {
    pub fn new(artist: &str) -> Result<Self> {
        let artist = artist.trim();
        if artist.is_empty() {
            return Err(Error::invalid("Artist required"));
        }
        Ok(Self {
            artist: artist.to_string(),
        })
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }
}
