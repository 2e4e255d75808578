//! Query commands implementation

use crate::corpus::LibraryEntry;
use crate::error::Result;
use crate::query::{ArtistQuery, QueryService, SongLyrics, SongQuery};
use tracing::info;

/// Random song, optionally restricted to one artist
pub async fn cmd_random(service: &QueryService, artist: Option<&str>) -> Result<SongLyrics> {
    match artist {
        Some(name) => {
            let query = ArtistQuery::new(name)?;
            info!("Picking a random song by {}", query.artist());
            service.random_song_by_artist(&query).await
        }
        None => {
            info!("Picking a random song");
            service.random_song().await
        }
    }
}

/// Fetch one song by artist and title
pub async fn cmd_song(service: &QueryService, artist: &str, title: &str) -> Result<SongLyrics> {
    let query = SongQuery::new(artist, title)?;
    service.lookup_song(&query).await
}

/// List an artist's song titles
pub async fn cmd_songs(service: &QueryService, artist: &str) -> Result<Vec<String>> {
    let query = ArtistQuery::new(artist)?;
    service.songs_by_artist(&query).await
}

/// List every artist
pub async fn cmd_artists(service: &QueryService) -> Result<Vec<String>> {
    service.list_artists().await
}

/// List every song with its artist
pub async fn cmd_library(service: &QueryService) -> Result<Vec<LibraryEntry>> {
    service.list_library().await
}

fn song_line(artist: &str, title: &str) -> String {
    format!("{} - {}", artist, title)
}

/// Print a song and its lyric tokens
pub fn print_song(song: &SongLyrics) {
    println!("\n🎵 {}\n", song_line(&song.artist, &song.song));
    if song.lyrics.is_empty() {
        println!("(no lyrics)");
    } else {
        println!("{}", song.lyrics.join(" "));
    }
    println!("\n{} tokens", song.lyrics.len());
}

/// Print a list of song titles
pub fn print_titles(artist: &str, titles: &[String]) {
    println!("\n🎤 Songs by {}\n", artist);
    for title in titles {
        println!("• {}", title);
    }
}

/// Print every artist
pub fn print_artists(artists: &[String]) {
    println!("\n🎤 Artists ({})\n", artists.len());
    for name in artists {
        println!("• {}", name);
    }
}

/// Print the library listing
pub fn print_library(entries: &[LibraryEntry]) {
    println!("\n📚 Library ({} songs)\n", entries.len());
    for entry in entries {
        println!("• {}", song_line(&entry.artist, &entry.title));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusDb;
    use crate::error::ErrorKind;
    use crate::ingest::{ingest_corpus, CorpusRecord};
    use tempfile::TempDir;

    async fn setup_service() -> (QueryService, TempDir) {
        let tmp = TempDir::new().unwrap();
        let db = CorpusDb::new(&tmp.path().join("test.db")).await.unwrap();
        let records = vec![
            CorpusRecord::new("Test Artist", "Test Song", "Hello - world!!"),
            CorpusRecord::new("Queen", "Innuendo", "While the sun hangs"),
        ];
        ingest_corpus(&db, &records, None).await.unwrap();
        (QueryService::new(db), tmp)
    }

    #[tokio::test]
    async fn test_cmd_song_validates_before_lookup() {
        let (service, _tmp) = setup_service().await;

        let err = cmd_song(&service, "", "x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let song = cmd_song(&service, " queen ", "innuendo").await.unwrap();
        assert_eq!(song.lyrics, vec!["While", "the", "sun", "hangs"]);
    }

    #[tokio::test]
    async fn test_cmd_random_with_and_without_artist() {
        let (service, _tmp) = setup_service().await;

        let song = cmd_random(&service, Some("QUEEN")).await.unwrap();
        assert_eq!(song.song, "Innuendo");

        let any = cmd_random(&service, None).await.unwrap();
        assert!(any.song == "Innuendo" || any.song == "Test Song");

        let err = cmd_random(&service, Some("  ")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_song_line_is_ascii_separated() {
        let line = song_line("Queen", "Innuendo");
        assert_eq!(line, "Queen - Innuendo");
        assert!(line.is_ascii());
    }

    #[tokio::test]
    async fn test_cmd_listings() {
        let (service, _tmp) = setup_service().await;
        assert_eq!(cmd_artists(&service).await.unwrap().len(), 2);
        assert_eq!(cmd_library(&service).await.unwrap().len(), 2);
        assert_eq!(
            cmd_songs(&service, "test artist").await.unwrap(),
            vec!["Test Song"]
        );
    }
}
