//! lyricist: lyric corpus ingestion and query core for a lyric-guessing game.
//!
//! A JSON corpus of songs is normalized into word tokens and stored in SQLite
//! (artists, songs and ordered lyric tokens). The query layer serves random
//! songs, exact lookups and listings to the CLI and to a JSON-lines dispatcher
//! on stdio.

pub mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod progress;
pub mod query;
pub mod serve;

pub use config::Config;
pub use error::{Error, Result};
