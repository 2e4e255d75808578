//! Serve command implementation

use super::ingest::cmd_ingest;
use crate::config::Config;
use crate::corpus::CorpusDb;
use crate::error::Result;
use crate::ingest::IngestOutcome;
use crate::query::QueryService;
use crate::serve::LineServer;
use std::path::PathBuf;
use tracing::info;

/// Seed the corpus (when enabled), then answer requests on stdio.
///
/// Ingestion finishes before the first request is read, so callers never
/// observe a partially seeded corpus.
pub async fn cmd_serve(
    config: &Config,
    db: CorpusDb,
    seed: bool,
    corpus_override: Option<PathBuf>,
) -> Result<()> {
    if seed && config.ingest.seed_on_serve {
        match cmd_ingest(config, &db, corpus_override).await? {
            IngestOutcome::Seeded(stats) => {
                info!(songs = stats.songs_created, "Seeded corpus before serving")
            }
            IngestOutcome::Skipped { existing_songs } => {
                info!(existing_songs, "Serving existing corpus")
            }
        }
    }

    let server = LineServer::new(QueryService::new(db));
    server.run().await?;
    Ok(())
}
