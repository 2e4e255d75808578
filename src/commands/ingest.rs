//! Ingest command implementation

use crate::config::Config;
use crate::corpus::CorpusDb;
use crate::error::Result;
use crate::ingest::{ingest_corpus, load_corpus, IngestOutcome};
use crate::progress::add_progress_bar;
use indicatif::ProgressStyle;
use std::path::PathBuf;
use tracing::info;

/// Load the corpus file and seed the store if it is empty
pub async fn cmd_ingest(
    config: &Config,
    db: &CorpusDb,
    corpus_override: Option<PathBuf>,
) -> Result<IngestOutcome> {
    let path = corpus_override.unwrap_or_else(|| config.resolved_corpus_file());
    info!("Ingesting corpus from {:?}", path);

    let records = load_corpus(&path)?;

    let pb = add_progress_bar(records.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("songs");

    let outcome = ingest_corpus(db, &records, Some(&pb)).await;
    pb.finish_and_clear();
    outcome
}

/// Print ingestion outcome to console
pub fn print_ingest_outcome(outcome: &IngestOutcome) {
    match outcome {
        IngestOutcome::Seeded(stats) => {
            println!("\n✓ Corpus ingestion complete");
            println!("  Records processed: {}", stats.records_processed);
            println!("  Artists created: {}", stats.artists_created);
            println!("  Songs created: {}", stats.songs_created);
            println!("  Lyric tokens written: {}", stats.tokens_written);
        }
        IngestOutcome::Skipped { existing_songs } => {
            println!(
                "Corpus already seeded ({} songs), skipping ingestion",
                existing_songs
            );
        }
    }
}
