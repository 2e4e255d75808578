//! Corpus ingestion pipeline
//!
//! Loads a whole corpus into an empty store in one transaction. A store that
//! already holds songs is left untouched, so re-running at every boot is safe.

mod document;

pub use document::*;

use crate::corpus::{CorpusDb, CorpusTx};
use crate::error::{Error, Result};
use crate::normalize::normalize;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Statistics from a committed ingestion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    pub records_processed: usize,
    pub artists_created: usize,
    pub songs_created: usize,
    pub tokens_written: usize,
}

/// What an ingestion run did
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// The corpus was loaded into an empty store
    Seeded(IngestStats),
    /// The store already had songs; nothing was written
    Skipped { existing_songs: usize },
}

/// Ingest every record, or nothing.
///
/// Records are applied in order. Any invalid record, duplicate song or
/// storage failure aborts the run and discards all of its writes.
pub async fn ingest_corpus(
    db: &CorpusDb,
    records: &[CorpusRecord],
    progress: Option<&ProgressBar>,
) -> Result<IngestOutcome> {
    let mut tx = db.begin().await?;

    let existing_songs = tx.song_count().await?;
    if existing_songs > 0 {
        tx.rollback().await?;
        warn!(
            existing_songs,
            "Corpus already seeded, skipping ingestion"
        );
        return Ok(IngestOutcome::Skipped { existing_songs });
    }

    info!("Ingesting {} corpus records", records.len());

    for (index, record) in records.iter().enumerate() {
        apply_record(&mut tx, index, record).await?;
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    let written = tx.commit().await?;
    let stats = IngestStats {
        records_processed: records.len(),
        artists_created: written.artists_created,
        songs_created: written.songs_created,
        tokens_written: written.tokens_appended,
    };

    info!(
        songs = stats.songs_created,
        artists = stats.artists_created,
        tokens = stats.tokens_written,
        "Corpus seeded"
    );
    Ok(IngestOutcome::Seeded(stats))
}

async fn apply_record(tx: &mut CorpusTx, index: usize, record: &CorpusRecord) -> Result<()> {
    let artist = required(record.artist.as_deref(), "artist", index)?;
    let title = required(record.title.as_deref(), "title", index)?;
    let lyrics = record
        .lyrics
        .as_deref()
        .ok_or_else(|| Error::invalid(format!("record {}: missing lyrics", index)))?;

    let artist_id = tx
        .find_or_create_artist(artist)
        .await
        .map_err(|e| in_record(e, index))?;
    let song_id = tx
        .create_song(title, artist_id)
        .await
        .map_err(|e| in_record(e, index))?;

    let tokens = normalize(lyrics);
    tx.append_tokens(song_id, &tokens)
        .await
        .map_err(|e| in_record(e, index))?;

    debug!(index, artist, title, tokens = tokens.len(), "Ingested record");
    Ok(())
}

fn required<'a>(value: Option<&'a str>, field: &str, index: usize) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(Error::invalid(format!("record {}: blank {}", index, field))),
        None => Err(Error::invalid(format!("record {}: missing {}", index, field))),
    }
}

/// Prefix record-level errors with the failing record's index
fn in_record(err: Error, index: usize) -> Error {
    match err {
        Error::InvalidArgument(msg) => Error::InvalidArgument(format!("record {}: {}", index, msg)),
        Error::Conflict(msg) => Error::Conflict(format!("record {}: {}", index, msg)),
        other => other,
    }
}
