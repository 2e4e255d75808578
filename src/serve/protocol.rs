//! Request/response types for the JSON-lines protocol

use crate::corpus::LibraryEntry;
use crate::error::{Error, ErrorKind, Result};
use crate::query::{ArtistQuery, QueryService, SongLyrics, SongQuery};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// A request line exactly as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRequest {
    pub op: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
}

/// A validated request, ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Health,
    RandomSong,
    Library,
    Artists,
    LookupSong(SongQuery),
    SongsByArtist(ArtistQuery),
    RandomSongByArtist(ArtistQuery),
}

impl TryFrom<RawRequest> for Request {
    type Error = Error;

    fn try_from(raw: RawRequest) -> Result<Self> {
        let artist = || ArtistQuery::new(raw.artist.as_deref().unwrap_or_default());

        match raw.op.as_str() {
            "health" => Ok(Request::Health),
            "random_song" => Ok(Request::RandomSong),
            "library" => Ok(Request::Library),
            "artists" => Ok(Request::Artists),
            "lookup_song" => Ok(Request::LookupSong(SongQuery::new(
                raw.artist.as_deref().unwrap_or_default(),
                raw.song.as_deref().unwrap_or_default(),
            )?)),
            "songs_by_artist" => Ok(Request::SongsByArtist(artist()?)),
            "random_song_by_artist" => Ok(Request::RandomSongByArtist(artist()?)),
            other => Err(Error::invalid(format!("Unknown op: {}", other))),
        }
    }
}

#[derive(Serialize)]
struct ArtistItem<'a> {
    artist: &'a str,
}

#[derive(Serialize)]
struct SongItem<'a> {
    song: &'a str,
}

/// One response line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireResponse {
    pub status: u16,
    pub body: Value,
}

impl WireResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn error(err: &Error) -> Self {
        Self {
            status: err.kind().status(),
            body: json!({ "error": public_message(err) }),
        }
    }
}

/// Message shown to callers; storage internals stay in the logs
fn public_message(err: &Error) -> String {
    match err {
        Error::InvalidArgument(msg) | Error::NotFound(msg) | Error::Conflict(msg) => msg.clone(),
        _ if err.kind() == ErrorKind::Conflict => "Conflict".to_string(),
        _ => "Internal error".to_string(),
    }
}

fn song_body(song: SongLyrics) -> Result<Value> {
    Ok(serde_json::to_value(song)?)
}

fn library_body(entries: &[LibraryEntry]) -> Result<Value> {
    Ok(serde_json::to_value(entries)?)
}

/// Run a validated request against the query service
pub async fn execute(service: &QueryService, request: &Request) -> Result<Value> {
    match request {
        Request::Health => Ok(json!({ "ok": true })),
        Request::RandomSong => song_body(service.random_song().await?),
        Request::Library => library_body(&service.list_library().await?),
        Request::Artists => {
            let names = service.list_artists().await?;
            let items: Vec<ArtistItem> = names.iter().map(|a| ArtistItem { artist: a }).collect();
            Ok(serde_json::to_value(items)?)
        }
        Request::LookupSong(query) => song_body(service.lookup_song(query).await?),
        Request::SongsByArtist(query) => {
            let titles = service.songs_by_artist(query).await?;
            let items: Vec<SongItem> = titles.iter().map(|s| SongItem { song: s }).collect();
            Ok(serde_json::to_value(items)?)
        }
        Request::RandomSongByArtist(query) => {
            song_body(service.random_song_by_artist(query).await?)
        }
    }
}

/// Parse, validate and answer one request line
pub async fn dispatch(service: &QueryService, line: &str) -> WireResponse {
    let raw: RawRequest = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => return WireResponse::error(&Error::invalid(format!("Parse error: {}", e))),
    };

    let request = match Request::try_from(raw) {
        Ok(request) => request,
        Err(e) => return WireResponse::error(&e),
    };

    debug!("Dispatching {:?}", request);
    match execute(service, &request).await {
        Ok(body) => WireResponse::ok(body),
        Err(e) => {
            if e.kind() == ErrorKind::Internal || e.kind() == ErrorKind::IoFailure {
                tracing::error!("Request {:?} failed: {}", request, e);
            }
            WireResponse::error(&e)
        }
    }
}
