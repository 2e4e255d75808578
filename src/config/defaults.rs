//! Default values for configuration

use std::path::PathBuf;

/// Default corpus document, resolved against the config directory when relative
pub fn default_corpus_file() -> PathBuf {
    PathBuf::from("data.json")
}

/// Default SQLite pool size
pub fn default_max_connections() -> u32 {
    5
}

/// Default time to wait on a locked database, in seconds
pub fn default_busy_timeout_secs() -> u64 {
    5
}

/// Default: seed the corpus before `serve` starts answering
pub fn default_seed_on_serve() -> bool {
    true
}

/// Database file name inside the base directory
pub const DB_FILE_NAME: &str = "lyrics.db";

/// Config file name inside the base directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
