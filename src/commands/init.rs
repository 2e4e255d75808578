//! Init command implementation

use crate::config::Config;
use crate::corpus::CorpusDb;
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::info;

/// Initialize lyricist configuration and database
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<Config> {
    let mut config = Config::default();
    config.init_paths(base_dir);

    if config.paths.config_file.exists() && !force {
        return Err(Error::AlreadyInitialized(
            config.paths.base_dir.display().to_string(),
        ));
    }

    std::fs::create_dir_all(&config.paths.base_dir)?;

    config.validate()?;

    config.save()?;
    info!("Created config at {:?}", config.paths.config_file);

    let db = CorpusDb::connect(&config).await?;
    db.init_schema().await?;
    info!("Created database at {:?}", config.paths.db_file);

    Ok(config)
}

/// Print the post-init summary
pub fn print_init_summary(config: &Config) {
    println!("✓ Initialized lyricist at {:?}", config.paths.base_dir);
    println!("\nConfiguration: {:?}", config.paths.config_file);
    println!("Database: {:?}", config.paths.db_file);
    println!("Corpus: {:?}", config.resolved_corpus_file());
    println!("\nNext steps:");
    println!("  lyricist ingest                      # Load the corpus");
    println!("  lyricist random                      # Play a random song");
    println!("  lyricist song \"Artist\" \"Title\"       # Fetch one song");
}
