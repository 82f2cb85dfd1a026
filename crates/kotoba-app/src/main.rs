use std::io::Write;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use kotoba_app::profile::{init_data_dirs, load_config, resolve_profile, save_config};
use kotoba_app::{AppClient, AppController, VocabService};
use kotoba_config::Config;
use kotoba_store::EntryFilter;
use kotoba_types::{
    AddOutcome, AppEvent, JlptLevel, LargeLexiconStatus, LexiconEntry, VocabularyDraft,
    VocabularyEntry,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "kotoba", about = "Japanese vocabulary lookup and collection")]
struct Cli {
    /// JSON config profile (defaults to ./kotoba.json, then environment)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the core and large dictionaries
    Search {
        query: String,
    },

    /// Save a word to the personal collection
    Add {
        #[arg(long)]
        word: String,
        #[arg(long)]
        romaji: String,
        #[arg(long)]
        hiragana: Option<String>,
        #[arg(long)]
        katakana: Option<String>,
        /// May be repeated
        #[arg(long = "meaning")]
        meanings: Vec<String>,
        /// May be repeated
        #[arg(long = "pos")]
        parts_of_speech: Vec<String>,
        #[arg(long)]
        jlpt: Option<JlptLevel>,
        #[arg(long)]
        source: Option<String>,
    },

    /// List the personal collection, newest first
    List {
        /// Only entries matching this text
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        jlpt: Option<JlptLevel>,
        #[arg(long)]
        source: Option<String>,
    },

    /// Remove a word from the personal collection
    Delete {
        id: Uuid,
    },

    /// Download and load the large dictionary
    Fetch,

    /// Show whether the large dictionary is downloaded and loaded
    Status,

    /// Write the effective configuration to a profile file
    InitConfig {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let profile = resolve_profile(cli.config.as_deref());
    let config = load_config(profile.as_deref())?;
    init_tracing(&config);
    match &profile {
        Some(path) => tracing::info!("Loaded config profile {}", path.display()),
        None => tracing::info!("No config profile, using defaults and environment"),
    }

    if let Command::InitConfig { path } = &cli.command {
        save_config(path, &config)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    init_data_dirs(&config)?;
    let service = VocabService::from_config(&config)?;

    let controller = AppController::new(config.channel_capacity);
    let mut tasks = controller.spawn_tasks(service);
    let client = controller.client();

    let result = tokio::select! {
        result = run_command(&client, cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            Ok(())
        }
    };

    controller.shutdown();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Task exited with error: {e}"),
            Err(e) => tracing::error!("Task panicked: {e}"),
        }
    }

    result
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

async fn run_command(client: &AppClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Search { query } => {
            ensure_large_loaded(client).await?;
            client.send(AppEvent::Search(query)).await?;
            let results = reply(client, |event| match event {
                AppEvent::SearchResults { results, .. } => Some(results),
                _ => None,
            })
            .await?;
            print_results(&results);
        }
        Command::Add {
            word,
            romaji,
            hiragana,
            katakana,
            meanings,
            parts_of_speech,
            jlpt,
            source,
        } => {
            let draft = VocabularyDraft {
                hiragana,
                katakana,
                meanings,
                parts_of_speech,
                jlpt_level: jlpt,
                source,
                ..VocabularyDraft::new(word, romaji)
            };
            client.send(AppEvent::AddEntry(draft)).await?;
            let outcome = reply(client, |event| match event {
                AppEvent::EntryAdded(outcome) => Some(outcome),
                _ => None,
            })
            .await?;
            match outcome {
                AddOutcome::Accepted(entry) => println!("Added {} ({})", entry.headword, entry.id),
                AddOutcome::RejectedAsDuplicate { existing } => {
                    println!("Already in your collection ({existing})")
                }
            }
        }
        Command::List {
            query,
            jlpt,
            source,
        } => {
            let filter = EntryFilter {
                query,
                jlpt_level: jlpt,
                source,
            };
            client.send(AppEvent::ListEntries).await?;
            let entries = reply(client, |event| match event {
                AppEvent::Entries(entries) => Some(entries),
                _ => None,
            })
            .await?;
            let entries: Vec<_> = entries.into_iter().filter(|e| filter.matches(e)).collect();
            print_entries(&entries);
        }
        Command::Delete { id } => {
            client.send(AppEvent::DeleteEntry(id)).await?;
            let entries = reply(client, |event| match event {
                AppEvent::Entries(entries) => Some(entries),
                _ => None,
            })
            .await?;
            println!("{} words remain", entries.len());
        }
        Command::Fetch => {
            client.send(AppEvent::FetchLargeLexicon).await?;
            loop {
                match client.recv().await? {
                    AppEvent::FetchProgress(fraction) => {
                        eprint!("\rDownloading... {:>3.0}%", fraction * 100.0);
                        let _ = std::io::stderr().flush();
                    }
                    AppEvent::Error(message) => {
                        eprintln!();
                        bail!(message);
                    }
                    AppEvent::LargeLexiconStatus(status) => {
                        eprintln!();
                        print_status(status);
                        break;
                    }
                    _ => {}
                }
            }
        }
        Command::Status => {
            client.send(AppEvent::QueryLargeLexiconStatus).await?;
            print_status(query_status(client).await?);
        }
        Command::InitConfig { .. } => {}
    }

    Ok(())
}

/// Wait for the reply `pick` accepts; an error event ends the wait
async fn reply<T>(
    client: &AppClient,
    mut pick: impl FnMut(AppEvent) -> Option<T>,
) -> anyhow::Result<T> {
    loop {
        match client.recv().await? {
            AppEvent::Error(message) => bail!(message),
            event => {
                if let Some(value) = pick(event) {
                    return Ok(value);
                }
            }
        }
    }
}

async fn query_status(client: &AppClient) -> anyhow::Result<LargeLexiconStatus> {
    reply(client, |event| match event {
        AppEvent::LargeLexiconStatus(status) => Some(status),
        _ => None,
    })
    .await
}

/// Load a downloaded large dictionary before searching; failures fall back to core only
async fn ensure_large_loaded(client: &AppClient) -> anyhow::Result<()> {
    client.send(AppEvent::QueryLargeLexiconStatus).await?;
    if query_status(client).await? != LargeLexiconStatus::DownloadedNotLoaded {
        return Ok(());
    }

    client.send(AppEvent::LoadLargeLexicon).await?;
    loop {
        match client.recv().await? {
            AppEvent::Error(message) => {
                tracing::warn!("Searching core dictionary only: {message}");
            }
            AppEvent::LargeLexiconStatus(_) => return Ok(()),
            _ => {}
        }
    }
}

fn print_results(results: &[LexiconEntry]) {
    if results.is_empty() {
        println!("No results");
        return;
    }
    for entry in results {
        let reading = entry.reading().unwrap_or(entry.romaji.as_str());
        let level = entry.jlpt_level.map(|l| format!(" [{l}]")).unwrap_or_default();
        println!(
            "{} ({}){}: {}",
            entry.display_word(),
            reading,
            level,
            entry.meanings.join("; ")
        );
    }
}

fn print_entries(entries: &[VocabularyEntry]) {
    if entries.is_empty() {
        println!("No saved words");
        return;
    }
    for entry in entries {
        println!(
            "{}  {} ({})  {}  added {}",
            entry.id,
            entry.display_word(),
            entry.romaji,
            entry.meanings.join("; "),
            entry.date_added.format("%Y-%m-%d")
        );
    }
}

fn print_status(status: LargeLexiconStatus) {
    match status {
        LargeLexiconStatus::NotDownloaded => println!("Large dictionary: not downloaded"),
        LargeLexiconStatus::DownloadedNotLoaded => {
            println!("Large dictionary: downloaded, not loaded")
        }
        LargeLexiconStatus::Loaded(count) => {
            println!("Large dictionary: loaded ({count} entries)")
        }
    }
}
