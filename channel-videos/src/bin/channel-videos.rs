use channel_videos::{ApiKey, ProviderConfig, VideoProvider, YouTubeClient, fallback};
use clap::{Parser, Subcommand};
use eyre::Context;
use serde::Serialize;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "channel-videos")]
#[command(author, version, about = "List a YouTube channel's videos the way the portfolio does")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of the channel's videos, Shorts excluded
    Page {
        /// Continuation token from a previous page
        #[arg(long)]
        token: Option<String>,

        /// Videos per page
        #[arg(short, long, default_value = "9")]
        size: usize,
    },

    /// Print a single video
    Video {
        /// YouTube video id
        id: String,
    },

    /// Print the bundled pre-rendering snapshot (no network access)
    Snapshot,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = YouTubeClient::new(ApiKey::from_env(), reqwest::Client::new());
    let provider = VideoProvider::new(client, ProviderConfig::default());
    tracing::debug!(channel_id = %provider.config().channel_id, "listing channel");

    match cli.command {
        Commands::Page { token, size } => {
            let page = provider.get_videos(token.as_deref(), size).await;
            if let Some(reason) = page.fallback_reason() {
                tracing::warn!(%reason, "serving demo videos");
            }
            print_json(&page.into_inner())
        }
        Commands::Video { id } => match provider.get_video_by_id(&id).await {
            Some(video) => print_json(&video),
            None => eyre::bail!("video {id} not found (or no API key configured)"),
        },
        Commands::Snapshot => print_json(&fallback::static_snapshot(jiff::Timestamp::now())),
    }
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output as JSON")?;
    println!("{json}");
    Ok(())
}
