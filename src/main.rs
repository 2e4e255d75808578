//! lyricist CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use lyricist::{
    commands::{
        cmd_artists, cmd_ingest, cmd_init, cmd_library, cmd_random, cmd_serve, cmd_song,
        cmd_songs, cmd_status, print_artists, print_ingest_outcome, print_init_summary,
        print_library, print_song, print_status, print_titles,
    },
    config::Config,
    corpus::CorpusDb,
    error::Result,
    progress::LogWriterFactory,
    query::QueryService,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lyricist")]
#[command(version, about = "Lyric corpus and query engine for a lyric-guessing game", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize lyricist configuration and database
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Load the corpus file into an empty database
    Ingest {
        /// Corpus file to load instead of the configured one
        #[arg(long, env = "LYRICIST_CORPUS")]
        corpus: Option<PathBuf>,
    },

    /// Pick a random song
    Random {
        /// Only pick among this artist's songs
        #[arg(short, long)]
        artist: Option<String>,
    },

    /// Show one song's lyrics
    Song {
        /// Artist name (case-insensitive)
        artist: String,
        /// Song title (case-insensitive)
        title: String,
    },

    /// List an artist's songs
    Songs {
        /// Artist name (case-insensitive)
        artist: String,
    },

    /// List all artists
    Artists,

    /// List every song with its artist
    Library,

    /// Show system status
    Status,

    /// Answer JSON requests on stdio, one per line
    Serve {
        /// Skip corpus seeding before serving
        #[arg(long)]
        no_seed: bool,

        /// Corpus file to seed from instead of the configured one
        #[arg(long, env = "LYRICIST_CORPUS")]
        corpus: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(LogWriterFactory::default()))
        .with(filter)
        .init();

    // Handle init command specially (doesn't need existing config)
    if matches!(cli.command, Commands::Init { .. }) {
        return handle_init(cli).await;
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "lyricist", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = cli.config.clone().unwrap_or_else(Config::default_config_path);
    let config = Config::load(&config_path)?;
    let db = CorpusDb::open(&config).await?;
    let json = cli.json;

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Ingest { corpus } => {
            let outcome = cmd_ingest(&config, &db, corpus).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_ingest_outcome(&outcome);
            }
        }

        Commands::Random { artist } => {
            let service = QueryService::new(db);
            let song = cmd_random(&service, artist.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&song)?);
            } else {
                print_song(&song);
            }
        }

        Commands::Song { artist, title } => {
            let service = QueryService::new(db);
            let song = cmd_song(&service, &artist, &title).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&song)?);
            } else {
                print_song(&song);
            }
        }

        Commands::Songs { artist } => {
            let service = QueryService::new(db);
            let titles = cmd_songs(&service, &artist).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&titles)?);
            } else {
                print_titles(artist.trim(), &titles);
            }
        }

        Commands::Artists => {
            let service = QueryService::new(db);
            let artists = cmd_artists(&service).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&artists)?);
            } else {
                print_artists(&artists);
            }
        }

        Commands::Library => {
            let service = QueryService::new(db);
            let entries = cmd_library(&service).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_library(&entries);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &db).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }

        Commands::Serve { no_seed, corpus } => {
            cmd_serve(&config, db, !no_seed, corpus).await?;
        }
    }

    Ok(())
}

async fn handle_init(cli: Cli) -> Result<()> {
    let Commands::Init { force } = cli.command else {
        unreachable!()
    };

    // A .toml path names the config file itself, anything else its directory
    let base_dir = match cli.config {
        Some(path) if path.extension().is_some_and(|e| e == "toml") => path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(Config::default_base_dir),
        Some(path) => path,
        None => Config::default_base_dir(),
    };

    let config = cmd_init(Some(base_dir), force).await?;

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "base_dir": config.paths.base_dir,
                "config_file": config.paths.config_file,
                "db_file": config.paths.db_file,
            })
        );
    } else {
        print_init_summary(&config);
    }

    Ok(())
}
