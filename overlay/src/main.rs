//! Overlay projection demo
//!
//! Run with: cargo run -p hdt-overlay -- <snapshot.json> [decks.json] [--settings overlay.toml]
//!
//! Without `--settings` the stored per-user settings are used.
//!
//! Loads a game snapshot (and optionally the deck context), projects one
//! frame against a 1920x1080 headless host and prints it.

use std::fs;
use std::path::{Path, PathBuf};

use hdt_core::config::{default_settings_path, resolve_settings};
use hdt_core::{DeckContext, GameStateView};
use hdt_overlay::layout::{ElementMetrics, HostRect};
use hdt_overlay::platform::HeadlessHost;
use hdt_overlay::{OverlayProjector, OverlaySession};
use hdt_types::OverlaySettings;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum SnapshotError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let contents = fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| SnapshotError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If HDT_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("HDT_LOG_PATH") {
        if let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path) {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

struct Args {
    snapshot: PathBuf,
    decks: Option<PathBuf>,
    settings: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut positional = Vec::new();
    let mut settings = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => settings = Some(PathBuf::from(args.next()?)),
            _ => positional.push(PathBuf::from(arg)),
        }
    }
    let mut positional = positional.into_iter();
    Some(Args {
        snapshot: positional.next()?,
        decks: positional.next(),
        settings,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let Some(args) = parse_args() else {
        tracing::error!(
            "Usage: hdt-overlay <snapshot.json> [decks.json] [--settings overlay.toml]"
        );
        std::process::exit(1);
    };

    let game: GameStateView = match load_json(&args.snapshot) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load snapshot");
            std::process::exit(1);
        }
    };

    let decks = match &args.decks {
        Some(path) => match load_json::<DeckContext>(path) {
            Ok(decks) => decks,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load deck context, using none");
                DeckContext::default()
            }
        },
        None => DeckContext::default(),
    };

    if args.settings.is_none() {
        if let Some(path) = default_settings_path() {
            tracing::info!(path = %path.display(), "Using stored settings");
        }
    }
    let settings = match resolve_settings(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load settings, using defaults");
            OverlaySettings::default()
        }
    };

    let host = HeadlessHost::new(HostRect::new(0.0, 0.0, 1920.0, 1080.0));
    let session = OverlaySession::new(OverlayProjector::new(), Box::new(host));
    let metrics = ElementMetrics::default();

    // Tick once so the layout has settings to work from, then lay out
    let result = async {
        session
            .tick(&game, &settings, &decks, &metrics, false)
            .await?;
        let topmost = session.on_host_moved().await?;
        tracing::info!(?topmost, "Host window attached");
        session
            .tick(&game, &settings, &decks, &metrics, true)
            .await
    }
    .await;

    if let Some(state) = session.wait_topmost().await {
        tracing::info!(?state, "Topmost retry finished");
    }

    match result {
        Ok(frame) => println!("{:#?}", frame),
        Err(e) => {
            tracing::error!(error = %e, "Projection failed");
            std::process::exit(1);
        }
    }
}
