//! Lunaria - Entry Point
//!
//! Demo binary for the moon-phase engine: resolves configuration, builds a
//! terminal display surface, runs one orchestration pass (remote with local
//! fallback, or local-only when offline) and prints the resulting lunar
//! card. With `--watch` the engine instead runs its connectivity loop,
//! driven by online/offline commands read from stdin.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;
use tokio::sync::watch;

use lunaria::core::config::EngineConfig;
use lunaria::core::error::{MoonError, Result};
use lunaria::display::terminal::TerminalSurface;
use lunaria::engine::orchestrator::MoonPhaseEngine;
use lunaria::remote::client::AstronomyClient;

#[derive(Parser)]
#[command(name = "lunaria", about = "Moon-phase display engine")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Location passed to the astronomy provider
    #[arg(long)]
    location: Option<String>,

    /// Display language (ru or lt)
    #[arg(long)]
    lang: Option<String>,

    /// Skip the remote fetch and use the local calculation only
    #[arg(long)]
    offline: bool,

    /// Keep running and react to connectivity changes entered on stdin
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("lunaria=info")
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::new(),
    };
    if let Some(location) = args.location {
        config.location = location;
    }
    if let Some(lang) = &args.lang {
        config.language = lang.parse()?;
    }
    config.validate().map_err(MoonError::InvalidConfig)?;

    // Remote source is optional - the engine degrades to local calculation
    let source = config
        .resolved_api_key()
        .map(|key| AstronomyClient::new(key, config.api_base_url.clone()));
    if source.is_none() {
        tracing::warn!("LUNARIA_API_KEY not set - running with local calculation only");
    }

    let surface = Arc::new(TerminalSurface::new());
    let engine = Arc::new(MoonPhaseEngine::new(config, source, Arc::clone(&surface)));

    let rt = Runtime::new()?;
    if args.watch {
        rt.block_on(watch_loop(engine, surface, !args.offline))?;
    } else {
        rt.block_on(engine.initialize(!args.offline));
        surface.print_card();
    }
    Ok(())
}

/// Drive the engine's connectivity loop, with transitions entered on stdin.
///
/// The runtime has no portable connectivity signal, so the watch channel is
/// fed by hand: `online` and `offline` emulate the browser events, `show`
/// prints the current card, `quit` exits.
async fn watch_loop(
    engine: Arc<MoonPhaseEngine<AstronomyClient, TerminalSurface>>,
    surface: Arc<TerminalSurface>,
    online: bool,
) -> Result<()> {
    let (tx, rx) = watch::channel(online);
    let runner = Arc::clone(&engine);
    let handle = tokio::spawn(async move { runner.run(rx).await });

    println!("Commands: online | offline | show | quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "online" => {
                let _ = tx.send(true);
            }
            "offline" => {
                let _ = tx.send(false);
            }
            "show" | "s" => surface.print_card(),
            "quit" | "q" => break,
            "" => {}
            other => println!("unknown command: {}", other),
        }
    }

    // Closing the channel ends the engine loop
    drop(tx);
    let _ = handle.await;
    surface.print_card();
    Ok(())
}
