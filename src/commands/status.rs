//! Status command implementation

use crate::config::Config;
use crate::corpus::{CorpusDb, CorpusStats, IntegrityReport};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub db_path: String,
    pub corpus_path: String,
    pub corpus_exists: bool,
    pub db_stats: CorpusStats,
    pub integrity: IntegrityReport,
}

/// Get system status
pub async fn cmd_status(config: &Config, db: &CorpusDb) -> Result<StatusInfo> {
    info!("Getting status");

    let corpus = config.resolved_corpus_file();

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        db_path: config.paths.db_file.display().to_string(),
        corpus_path: corpus.display().to_string(),
        corpus_exists: corpus.exists(),
        db_stats: db.stats().await?,
        integrity: db.integrity().await?,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 lyricist Status\n");
    println!("Configuration: {}", status.config_path);
    println!("Database: {}", status.db_path);

    let corpus_state = if status.corpus_exists {
        "✓ Found"
    } else {
        "✗ Missing"
    };
    println!("Corpus: {} ({})", status.corpus_path, corpus_state);

    println!("\nDatabase Stats:");
    println!("  Artists: {}", status.db_stats.artist_count);
    println!("  Songs: {}", status.db_stats.song_count);
    println!("  Lyric tokens: {}", status.db_stats.token_count);

    if status.db_stats.song_count == 0 {
        println!("\n⚠ Corpus not seeded - run 'lyricist ingest'");
    }

    println!("\nIntegrity:");
    if status.integrity.is_clean() {
        println!("  ✓ All references resolve");
    } else {
        println!("  ✗ Songs without artist: {}", status.integrity.orphan_songs);
        println!("  ✗ Tokens without song: {}", status.integrity.orphan_tokens);
    }
}
