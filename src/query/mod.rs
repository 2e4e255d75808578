//! Read-only query service for the game
//!
//! Artist and title matching is case-insensitive (see [`crate::corpus::fold_key`]).
//! Random picks are drawn at call time from the current set of song ids.
//! That is a full scan, O(n) per call, which is fine for corpora of tens of
//! thousands of songs; a larger corpus would want an indexed random key.

mod request;

pub use request::*;

use crate::corpus::{CorpusDb, LibraryEntry, SongId};
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A playable song: artist, title and ordered lyric tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongLyrics {
    pub artist: String,
    pub song: String,
    pub lyrics: Vec<String>,
}

/// Pick one item with equal probability
pub fn pick_uniform<T: Copy, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Option<T> {
    items.choose(rng).copied()
}

/// Query service over the corpus store
#[derive(Clone)]
pub struct QueryService {
    db: CorpusDb,
}

impl QueryService {
    pub fn new(db: CorpusDb) -> Self {
        Self { db }
    }

    /// A uniformly random song from the whole corpus
    pub async fn random_song(&self) -> Result<SongLyrics> {
        let ids = self.db.song_ids().await?;
        let id = pick_uniform(&ids, &mut rand::thread_rng())
            .ok_or_else(|| Error::not_found("No songs found"))?;
        self.load_song(id).await
    }

    /// The song matching artist and title, ignoring case
    pub async fn lookup_song(&self, query: &SongQuery) -> Result<SongLyrics> {
        debug!(artist = query.artist(), title = query.title(), "Looking up song");
        let artist = self
            .db
            .find_artist(query.artist())
            .await?
            .ok_or_else(|| Error::not_found("Song not found"))?;
        let song = self
            .db
            .find_song(artist.id, query.title())
            .await?
            .ok_or_else(|| Error::not_found("Song not found"))?;

        Ok(SongLyrics {
            artist: artist.name,
            lyrics: self.db.tokens(song.id).await?,
            song: song.title,
        })
    }

    /// Titles of an artist's songs, in ingestion order
    pub async fn songs_by_artist(&self, query: &ArtistQuery) -> Result<Vec<String>> {
        let artist = self
            .db
            .find_artist(query.artist())
            .await?
            .ok_or_else(|| Error::not_found("Songs not found"))?;
        let songs = self.db.artist_songs(artist.id).await?;
        Ok(songs.into_iter().map(|s| s.title).collect())
    }

    /// Every artist name
    pub async fn list_artists(&self) -> Result<Vec<String>> {
        let artists = self.db.list_artists().await?;
        if artists.is_empty() {
            return Err(Error::not_found("Artists not found"));
        }
        Ok(artists.into_iter().map(|a| a.name).collect())
    }

    /// One entry per song
    pub async fn list_library(&self) -> Result<Vec<LibraryEntry>> {
        let library = self.db.list_library().await?;
        if library.is_empty() {
            return Err(Error::not_found("Songs not found"));
        }
        Ok(library)
    }

    /// A uniformly random song by one artist
    pub async fn random_song_by_artist(&self, query: &ArtistQuery) -> Result<SongLyrics> {
        let artist = self
            .db
            .find_artist(query.artist())
            .await?
            .ok_or_else(|| Error::not_found("Artist not found"))?;
        let ids = self.db.artist_song_ids(artist.id).await?;
        let id = pick_uniform(&ids, &mut rand::thread_rng())
            .ok_or_else(|| Error::not_found("No songs found for this artist"))?;
        self.load_song(id).await
    }

    async fn load_song(&self, id: SongId) -> Result<SongLyrics> {
        let song = self
            .db
            .song_with_artist(id)
            .await?
            .ok_or_else(|| Error::not_found("Song not found"))?;
        Ok(SongLyrics {
            artist: song.artist,
            song: song.title,
            lyrics: self.db.tokens(song.song_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ingest::{ingest_corpus, CorpusRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use tempfile::TempDir;

    async fn setup_service(records: &[CorpusRecord]) -> (QueryService, CorpusDb, TempDir) {
        let tmp = TempDir::new().unwrap();
        let db = CorpusDb::new(&tmp.path().join("test.db")).await.unwrap();
        if !records.is_empty() {
            ingest_corpus(&db, records, None).await.unwrap();
        }
        (QueryService::new(db.clone()), db, tmp)
    }

    fn corpus() -> Vec<CorpusRecord> {
        vec![
            CorpusRecord::new("Test Artist", "Test Song", "Hello - world!!"),
            CorpusRecord::new("Test Artist", "Another Song", "la la-la"),
            CorpusRecord::new("Queen", "Innuendo", "While the sun hangs in the sky"),
        ]
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let (service, _db, _tmp) =
            setup_service(&[CorpusRecord::new("Test Artist", "Test Song", "Hello - world!!")])
                .await;

        let query = SongQuery::new("test artist", "TEST SONG").unwrap();
        let song = service.lookup_song(&query).await.unwrap();
        assert_eq!(
            song,
            SongLyrics {
                artist: "Test Artist".to_string(),
                song: "Test Song".to_string(),
                lyrics: vec!["Hello".to_string(), "world".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let (service, _db, _tmp) = setup_service(&corpus()).await;

        let wrong_title = SongQuery::new("Queen", "Bohemian Rhapsody").unwrap();
        let err = service.lookup_song(&wrong_title).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let wrong_artist = SongQuery::new("Nobody", "Innuendo").unwrap();
        let err = service.lookup_song(&wrong_artist).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_songs_by_artist() {
        let (service, _db, _tmp) = setup_service(&corpus()).await;

        let titles = service
            .songs_by_artist(&ArtistQuery::new("TEST artist").unwrap())
            .await
            .unwrap();
        assert_eq!(titles, vec!["Test Song", "Another Song"]);

        let err = service
            .songs_by_artist(&ArtistQuery::new("nonexistent").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_listings() {
        let (service, _db, _tmp) = setup_service(&corpus()).await;

        assert_eq!(
            service.list_artists().await.unwrap(),
            vec!["Test Artist", "Queen"]
        );

        let library = service.list_library().await.unwrap();
        assert_eq!(library.len(), 3);
        assert_eq!(library[2].artist, "Queen");
        assert_eq!(library[2].title, "Innuendo");
    }

    #[tokio::test]
    async fn test_empty_corpus_is_not_found() {
        let (service, _db, _tmp) = setup_service(&[]).await;

        assert_eq!(
            service.random_song().await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.list_artists().await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.list_library().await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_random_song_by_artist_stays_within_artist() {
        let (service, _db, _tmp) = setup_service(&corpus()).await;
        let query = ArtistQuery::new("test artist").unwrap();

        for _ in 0..20 {
            let song = service.random_song_by_artist(&query).await.unwrap();
            assert_eq!(song.artist, "Test Artist");
            assert!(song.song == "Test Song" || song.song == "Another Song");
        }

        let err = service
            .random_song_by_artist(&ArtistQuery::new("Nobody").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_random_song_by_artist_without_songs() {
        let (service, db, _tmp) = setup_service(&[]).await;
        let mut tx = db.begin().await.unwrap();
        tx.find_or_create_artist("Lonely").await.unwrap();
        tx.commit().await.unwrap();

        let err = service
            .random_song_by_artist(&ArtistQuery::new("lonely").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("No songs found for this artist"));
    }

    #[tokio::test]
    async fn test_random_song_covers_corpus_evenly() {
        let (service, _db, _tmp) = setup_service(&corpus()).await;
        let draws = 1200;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..draws {
            let song = service.random_song().await.unwrap();
            *counts.entry(song.song).or_default() += 1;
        }

        assert_eq!(counts.len(), 3);
        for (title, count) in counts {
            // expected 400 each; bounds are about six standard deviations wide
            assert!((300..=500).contains(&count), "{} drawn {} times", title, count);
        }
    }

    #[test]
    fn test_pick_uniform_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = [10, 20, 30, 40, 50, 60];
        let mut counts = [0usize; 6];

        for _ in 0..60_000 {
            let picked = pick_uniform(&items, &mut rng).unwrap();
            counts[picked / 10 - 1] += 1;
        }

        for count in counts {
            assert!((9_400..=10_600).contains(&count), "count {}", count);
        }
        assert_eq!(pick_uniform::<i32, _>(&[], &mut rng), None);
    }
}
