//! SQLite schema definition

/// SQL schema for the corpus database
///
/// `name_key` and `title_key` hold case-folded copies used for uniqueness
/// and lookups. Token order is carried by `position`, never by row id.
pub const SCHEMA_SQL: &str = r#"
-- Artists: one row per case-insensitive name
CREATE TABLE IF NOT EXISTS artists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(trim(name)) > 0),
    name_key TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Songs: unique per (folded title, artist)
CREATE TABLE IF NOT EXISTS songs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
    title_key TEXT NOT NULL,
    artist_id INTEGER NOT NULL REFERENCES artists(id),
    created_at TEXT NOT NULL,
    UNIQUE(title_key, artist_id)
);

-- Lyrics: ordered token stream per song
CREATE TABLE IF NOT EXISTS lyrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    song_id INTEGER NOT NULL REFERENCES songs(id),
    position INTEGER NOT NULL,
    token TEXT NOT NULL CHECK (length(token) > 0),
    UNIQUE(song_id, position)
);

-- Indexes for lookups
CREATE INDEX IF NOT EXISTS idx_songs_artist ON songs(artist_id);
CREATE INDEX IF NOT EXISTS idx_lyrics_song ON lyrics(song_id, position);
"#;
