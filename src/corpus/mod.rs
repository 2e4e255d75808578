//! Corpus storage using SQLite
//!
//! The corpus store is the only component that writes artists, songs and
//! lyric tokens. Writes go through [`CorpusTx`] so an ingestion run commits
//! as one unit; reads go straight to the pool.
//!
//! Case-insensitive matching is done on keys folded in Rust by [`fold_key`],
//! so behaviour does not depend on SQLite collations.

mod schema;

pub use schema::*;

use crate::config::{Config, DatabaseConfig};
use crate::error::{is_lock_contention, is_unique_violation, Error, Result};
use crate::normalize::is_valid_token;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{FromRow, QueryBuilder, Sqlite, Transaction};
use std::path::Path;
use tracing::{debug, info};

pub type ArtistId = i64;
pub type SongId = i64;

/// Rows per multi-value INSERT when appending tokens
const TOKEN_BATCH: usize = 256;

/// Case-folded key used for every artist/title comparison
pub fn fold_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// An artist row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub created_at: String,
}

/// A song row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist_id: ArtistId,
    pub created_at: String,
}

/// A song joined with its artist's name
#[derive(Debug, Clone, FromRow)]
pub struct SongWithArtist {
    pub song_id: SongId,
    pub title: String,
    pub artist: String,
}

/// One entry of the library listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub artist: String,
    pub title: String,
}

/// Row counts for the whole corpus
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusStats {
    pub artist_count: usize,
    pub song_count: usize,
    pub token_count: usize,
}

/// Dangling references found in the corpus
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Songs whose artist row is missing
    pub orphan_songs: usize,
    /// Lyric tokens whose song row is missing
    pub orphan_tokens: usize,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.orphan_songs == 0 && self.orphan_tokens == 0
    }
}

/// Rows written through one [`CorpusTx`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WriteStats {
    pub artists_created: usize,
    pub songs_created: usize,
    pub tokens_appended: usize,
}

/// Corpus database handle
#[derive(Clone)]
pub struct CorpusDb {
    pool: SqlitePool,
}

impl CorpusDb {
    /// Connect to the corpus database described by the config
    pub async fn connect(config: &Config) -> Result<Self> {
        Self::connect_with(&config.paths.db_file, &config.database).await
    }

    /// Connect and make sure the schema exists
    pub async fn open(config: &Config) -> Result<Self> {
        let db = Self::connect(config).await?;
        db.ensure_schema().await?;
        Ok(db)
    }

    /// Create database with path directly (without full config)
    pub async fn new(db_path: &Path) -> Result<Self> {
        let db = Self::connect_with(db_path, &DatabaseConfig::default()).await?;
        db.ensure_schema().await?;
        Ok(db)
    }

    async fn connect_with(db_path: &Path, settings: &DatabaseConfig) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(settings.busy_timeout())
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        debug!("Connecting to SQLite database at {:?}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Initialize the database schema
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing corpus schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Check if database is initialized
    pub async fn is_initialized(&self) -> Result<bool> {
        let result: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM sqlite_master WHERE type='table' AND name='lyrics'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(result.is_some())
    }

    async fn ensure_schema(&self) -> Result<()> {
        if !self.is_initialized().await? {
            self.init_schema().await?;
        }
        Ok(())
    }

    /// Start an all-or-nothing write unit
    pub async fn begin(&self) -> Result<CorpusTx> {
        Ok(CorpusTx {
            tx: self.pool.begin().await?,
            stats: WriteStats::default(),
        })
    }

    // ===== Artist reads =====

    /// Find an artist by case-insensitive name
    pub async fn find_artist(&self, name: &str) -> Result<Option<Artist>> {
        let artist = sqlx::query_as::<_, Artist>(
            "SELECT id, name, created_at FROM artists WHERE name_key = ?",
        )
        .bind(fold_key(name))
        .fetch_optional(&self.pool)
        .await?;
        Ok(artist)
    }

    /// List every artist in creation order
    pub async fn list_artists(&self) -> Result<Vec<Artist>> {
        let artists =
            sqlx::query_as::<_, Artist>("SELECT id, name, created_at FROM artists ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(artists)
    }

    // ===== Song reads =====

    /// Find an artist's song by case-insensitive title
    pub async fn find_song(&self, artist_id: ArtistId, title: &str) -> Result<Option<Song>> {
        let song = sqlx::query_as::<_, Song>(
            "SELECT id, title, artist_id, created_at FROM songs WHERE artist_id = ? AND title_key = ?",
        )
        .bind(artist_id)
        .bind(fold_key(title))
        .fetch_optional(&self.pool)
        .await?;
        Ok(song)
    }

    /// Songs owned by an artist, in ingestion order
    pub async fn artist_songs(&self, artist_id: ArtistId) -> Result<Vec<Song>> {
        let songs = sqlx::query_as::<_, Song>(
            "SELECT id, title, artist_id, created_at FROM songs WHERE artist_id = ? ORDER BY id",
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(songs)
    }

    /// Every song id in the corpus
    pub async fn song_ids(&self) -> Result<Vec<SongId>> {
        let ids = sqlx::query_scalar("SELECT id FROM songs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    /// Song ids owned by an artist
    pub async fn artist_song_ids(&self, artist_id: ArtistId) -> Result<Vec<SongId>> {
        let ids = sqlx::query_scalar("SELECT id FROM songs WHERE artist_id = ? ORDER BY id")
            .bind(artist_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    /// Song title plus artist name for one song
    pub async fn song_with_artist(&self, song_id: SongId) -> Result<Option<SongWithArtist>> {
        let song = sqlx::query_as::<_, SongWithArtist>(
            r#"
            SELECT s.id AS song_id, s.title AS title, a.name AS artist
            FROM songs s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.id = ?
            "#,
        )
        .bind(song_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(song)
    }

    /// One entry per song, in ingestion order
    pub async fn list_library(&self) -> Result<Vec<LibraryEntry>> {
        let entries = sqlx::query_as::<_, LibraryEntry>(
            r#"
            SELECT a.name AS artist, s.title AS title
            FROM songs s
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Number of songs in the corpus
    pub async fn song_count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    // ===== Token reads =====

    /// Tokens of a song in their original lyric order
    pub async fn tokens(&self, song_id: SongId) -> Result<Vec<String>> {
        let tokens = sqlx::query_scalar("SELECT token FROM lyrics WHERE song_id = ? ORDER BY position")
            .bind(song_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tokens)
    }

    // ===== Statistics =====

    /// Get global statistics
    pub async fn stats(&self) -> Result<CorpusStats> {
        let artist_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
            .fetch_one(&self.pool)
            .await?;

        let song_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;

        let token_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lyrics")
            .fetch_one(&self.pool)
            .await?;

        Ok(CorpusStats {
            artist_count: artist_count as usize,
            song_count: song_count as usize,
            token_count: token_count as usize,
        })
    }

    /// Count dangling song → artist and token → song references
    pub async fn integrity(&self) -> Result<IntegrityReport> {
        let orphan_songs: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM songs s
            LEFT JOIN artists a ON a.id = s.artist_id
            WHERE a.id IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let orphan_tokens: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM lyrics l
            LEFT JOIN songs s ON s.id = l.song_id
            WHERE s.id IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(IntegrityReport {
            orphan_songs: orphan_songs as usize,
            orphan_tokens: orphan_tokens as usize,
        })
    }
}

/// Transactional writer over the corpus
///
/// Nothing written here is visible to readers until [`CorpusTx::commit`].
/// Dropping the writer without committing rolls every write back.
pub struct CorpusTx {
    tx: Transaction<'static, Sqlite>,
    stats: WriteStats,
}

impl CorpusTx {
    /// Number of songs visible inside this transaction
    pub async fn song_count(&mut self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| write_error(e, || "corpus is being seeded concurrently".to_string()))?;
        Ok(count as usize)
    }

    /// Return the id of the artist matching `name` case-insensitively,
    /// creating the artist when none exists
    pub async fn find_or_create_artist(&mut self, name: &str) -> Result<ArtistId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid("artist name must not be blank"));
        }
        let key = fold_key(name);

        let existing: Option<ArtistId> =
            sqlx::query_scalar("SELECT id FROM artists WHERE name_key = ?")
                .bind(&key)
                .fetch_optional(&mut *self.tx)
                .await?;
        if let Some(id) = existing {
            return Ok(id);
        }

        let result = sqlx::query("INSERT INTO artists (name, name_key, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(&key)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| write_error(e, || format!("artist '{}' already exists", name)))?;

        self.stats.artists_created += 1;
        let id = result.last_insert_rowid();
        debug!(artist_id = id, name, "Created artist");
        Ok(id)
    }

    /// Create a song owned by `artist_id`
    pub async fn create_song(&mut self, title: &str, artist_id: ArtistId) -> Result<SongId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid("song title must not be blank"));
        }

        let artist: Option<ArtistId> = sqlx::query_scalar("SELECT id FROM artists WHERE id = ?")
            .bind(artist_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        if artist.is_none() {
            return Err(Error::invalid(format!("unknown artist id {}", artist_id)));
        }

        let key = fold_key(title);
        let duplicate: Option<SongId> =
            sqlx::query_scalar("SELECT id FROM songs WHERE title_key = ? AND artist_id = ?")
                .bind(&key)
                .bind(artist_id)
                .fetch_optional(&mut *self.tx)
                .await?;
        if duplicate.is_some() {
            return Err(Error::conflict(format!(
                "song '{}' already exists for artist id {}",
                title, artist_id
            )));
        }

        let result = sqlx::query(
            "INSERT INTO songs (title, title_key, artist_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(&key)
        .bind(artist_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| write_error(e, || format!("song '{}' already exists", title)))?;

        self.stats.songs_created += 1;
        let id = result.last_insert_rowid();
        debug!(song_id = id, artist_id, title, "Created song");
        Ok(id)
    }

    /// Append tokens to a song, keeping their order after any existing tokens
    pub async fn append_tokens(&mut self, song_id: SongId, tokens: &[String]) -> Result<usize> {
        let song: Option<SongId> = sqlx::query_scalar("SELECT id FROM songs WHERE id = ?")
            .bind(song_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        if song.is_none() {
            return Err(Error::invalid(format!("unknown song id {}", song_id)));
        }

        if let Some(bad) = tokens.iter().find(|t| !is_valid_token(t)) {
            return Err(Error::invalid(format!(
                "token {:?} is empty or not alphanumeric",
                bad
            )));
        }

        if tokens.is_empty() {
            return Ok(0);
        }

        let start: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(position) + 1, 0) FROM lyrics WHERE song_id = ?")
                .bind(song_id)
                .fetch_one(&mut *self.tx)
                .await?;

        for (batch_index, batch) in tokens.chunks(TOKEN_BATCH).enumerate() {
            let base = start + (batch_index * TOKEN_BATCH) as i64;
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("INSERT INTO lyrics (song_id, position, token) ");
            builder.push_values(batch.iter().enumerate(), |mut row, (offset, token)| {
                row.push_bind(song_id)
                    .push_bind(base + offset as i64)
                    .push_bind(token.as_str());
            });
            builder
                .build()
                .execute(&mut *self.tx)
                .await
                .map_err(|e| write_error(e, || format!("token positions for song {} overlap", song_id)))?;
        }

        self.stats.tokens_appended += tokens.len();
        Ok(tokens.len())
    }

    /// Rows written so far
    pub fn stats(&self) -> WriteStats {
        self.stats
    }

    /// Make every write visible
    pub async fn commit(self) -> Result<WriteStats> {
        self.tx
            .commit()
            .await
            .map_err(|e| write_error(e, || "corpus is being seeded concurrently".to_string()))?;
        Ok(self.stats)
    }

    /// Discard every write
    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

/// Map constraint and lock failures to `Conflict`; a racing writer produces either
fn write_error(err: sqlx::Error, conflict: impl FnOnce() -> String) -> Error {
    if is_unique_violation(&err) {
        Error::Conflict(conflict())
    } else if is_lock_contention(&err) {
        Error::Conflict(format!("{} (store locked by another writer)", conflict()))
    } else {
        Error::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    async fn setup_test_db() -> (CorpusDb, TempDir) {
        let tmp = TempDir::new().unwrap();
        let db = CorpusDb::new(&tmp.path().join("test.db")).await.unwrap();
        (db, tmp)
    }

    fn words(raw: &str) -> Vec<String> {
        raw.split(' ').map(String::from).collect()
    }

    #[test]
    fn test_fold_key() {
        assert_eq!(fold_key("  The Beatles "), "the beatles");
        assert_eq!(fold_key("ÉDITH"), "édith");
    }

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.db");
        let db = CorpusDb::new(&path).await.unwrap();
        assert!(db.is_initialized().await.unwrap());
        db.init_schema().await.unwrap();

        let reopened = CorpusDb::new(&path).await.unwrap();
        assert_eq!(reopened.song_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_artist_reused_case_insensitively() {
        let (db, _tmp) = setup_test_db().await;

        let mut tx = db.begin().await.unwrap();
        let first = tx.find_or_create_artist("Queen").await.unwrap();
        let second = tx.find_or_create_artist("  QUEEN ").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(tx.stats().artists_created, 1);
        tx.commit().await.unwrap();

        let artist = db.find_artist("queen").await.unwrap().unwrap();
        assert_eq!(artist.name, "Queen");
        assert_eq!(db.list_artists().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_artist_rejected() {
        let (db, _tmp) = setup_test_db().await;
        let mut tx = db.begin().await.unwrap();
        let err = tx.find_or_create_artist("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_create_song_validation() {
        let (db, _tmp) = setup_test_db().await;
        let mut tx = db.begin().await.unwrap();
        let artist = tx.find_or_create_artist("Queen").await.unwrap();

        let err = tx.create_song(" ", artist).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = tx.create_song("Bohemian Rhapsody", artist + 100).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        tx.create_song("Bohemian Rhapsody", artist).await.unwrap();
        let err = tx.create_song("bohemian RHAPSODY", artist).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_same_title_for_different_artists() {
        let (db, _tmp) = setup_test_db().await;
        let mut tx = db.begin().await.unwrap();
        let a = tx.find_or_create_artist("Artist A").await.unwrap();
        let b = tx.find_or_create_artist("Artist B").await.unwrap();
        tx.create_song("Hello", a).await.unwrap();
        tx.create_song("Hello", b).await.unwrap();
        let stats = tx.commit().await.unwrap();
        assert_eq!(stats.songs_created, 2);
    }

    #[tokio::test]
    async fn test_conflict_leaves_store_unchanged() {
        let (db, _tmp) = setup_test_db().await;

        let mut tx = db.begin().await.unwrap();
        let artist = tx.find_or_create_artist("Queen").await.unwrap();
        tx.create_song("Innuendo", artist).await.unwrap();
        let err = tx.create_song("INNUENDO", artist).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        drop(tx);

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.artist_count, 0);
        assert_eq!(stats.song_count, 0);
    }

    #[tokio::test]
    async fn test_competing_writer_gets_conflict() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.database.busy_timeout_secs = 1;
        let first = CorpusDb::open(&config).await.unwrap();
        let second = CorpusDb::open(&config).await.unwrap();

        let mut holder = first.begin().await.unwrap();
        holder.find_or_create_artist("Queen").await.unwrap();

        let mut contender = second.begin().await.unwrap();
        assert_eq!(contender.song_count().await.unwrap(), 0);
        let err = contender.find_or_create_artist("ABBA").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        drop(contender);

        holder.commit().await.unwrap();
        let names: Vec<String> = second
            .list_artists()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Queen"]);
    }

    #[tokio::test]
    async fn test_tokens_keep_order_across_appends() {
        let (db, _tmp) = setup_test_db().await;

        let mut tx = db.begin().await.unwrap();
        let artist = tx.find_or_create_artist("Queen").await.unwrap();
        let song = tx.create_song("We Will Rock You", artist).await.unwrap();
        tx.append_tokens(song, &words("we will we will")).await.unwrap();
        tx.append_tokens(song, &words("rock you")).await.unwrap();
        tx.commit().await.unwrap();

        let tokens = db.tokens(song).await.unwrap();
        assert_eq!(tokens, words("we will we will rock you"));
    }

    #[tokio::test]
    async fn test_large_token_stream_spans_batches() {
        let (db, _tmp) = setup_test_db().await;
        let input: Vec<String> = (0..(TOKEN_BATCH * 2 + 7)).map(|i| format!("w{}", i)).collect();

        let mut tx = db.begin().await.unwrap();
        let artist = tx.find_or_create_artist("Long").await.unwrap();
        let song = tx.create_song("Epic", artist).await.unwrap();
        assert_eq!(tx.append_tokens(song, &input).await.unwrap(), input.len());
        tx.commit().await.unwrap();

        assert_eq!(db.tokens(song).await.unwrap(), input);
    }

    #[tokio::test]
    async fn test_append_tokens_validation() {
        let (db, _tmp) = setup_test_db().await;
        let mut tx = db.begin().await.unwrap();

        let err = tx.append_tokens(42, &words("hello")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let artist = tx.find_or_create_artist("Queen").await.unwrap();
        let song = tx.create_song("Song", artist).await.unwrap();
        let bad = vec!["fine".to_string(), "not-fine".to_string()];
        let err = tx.append_tokens(song, &bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(tx.append_tokens(song, &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reads_and_integrity() {
        let (db, _tmp) = setup_test_db().await;

        let mut tx = db.begin().await.unwrap();
        let queen = tx.find_or_create_artist("Queen").await.unwrap();
        let abba = tx.find_or_create_artist("ABBA").await.unwrap();
        let s1 = tx.create_song("Innuendo", queen).await.unwrap();
        let s2 = tx.create_song("Waterloo", abba).await.unwrap();
        let s3 = tx.create_song("Mustapha", queen).await.unwrap();
        tx.append_tokens(s1, &words("a b")).await.unwrap();
        tx.append_tokens(s2, &words("c")).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(db.song_ids().await.unwrap(), vec![s1, s2, s3]);
        assert_eq!(db.artist_song_ids(queen).await.unwrap(), vec![s1, s3]);

        let titles: Vec<String> = db
            .artist_songs(queen)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Innuendo", "Mustapha"]);

        let found = db.find_song(abba, "WATERLOO").await.unwrap().unwrap();
        assert_eq!(found.id, s2);
        assert!(db.find_song(queen, "Waterloo").await.unwrap().is_none());

        let joined = db.song_with_artist(s2).await.unwrap().unwrap();
        assert_eq!(joined.artist, "ABBA");
        assert_eq!(joined.title, "Waterloo");

        let library = db.list_library().await.unwrap();
        assert_eq!(library.len(), 3);
        assert_eq!(
            library[1],
            LibraryEntry {
                artist: "ABBA".to_string(),
                title: "Waterloo".to_string()
            }
        );

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.artist_count, 2);
        assert_eq!(stats.song_count, 3);
        assert_eq!(stats.token_count, 3);
        assert!(db.integrity().await.unwrap().is_clean());
    }
}
