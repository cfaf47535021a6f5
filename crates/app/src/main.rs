mod replay;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use vanibill_capture::{
    CaptureConfig, CaptureSession, FallbackTranscriber, HttpFallbackTranscriber, NullFallback,
    ScriptedEngine,
};
use vanibill_foundation::ShutdownHandler;
use vanibill_server::build_router;

#[derive(Parser, Debug)]
#[command(name = "vanibill", about = "Voice-driven billing command pipeline")]
struct Cli {
    /// Address for the HTTP command endpoint.
    #[arg(long, env = "VANIBILL_LISTEN", default_value = "127.0.0.1:8734")]
    listen: SocketAddr,

    /// Fallback transcription service URL; omitted disables the fallback path.
    #[arg(long, env = "VANIBILL_FALLBACK_URL")]
    fallback_url: Option<String>,

    /// Language hint handed to the recognition engine.
    #[arg(long, env = "VANIBILL_LANGUAGE", default_value = "hi-IN")]
    language: String,

    /// Seconds to wait for a finalized transcript before fallback upload.
    #[arg(long, default_value_t = 5)]
    fallback_timeout_secs: u64,

    /// Replay a transcript script file through the capture pipeline
    /// (one utterance per line) instead of waiting for a live engine.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Delay between replayed utterances, in milliseconds.
    #[arg(long, default_value_t = 250)]
    replay_delay_ms: u64,
}

fn init_logging() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "vanibill.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(guard);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::info!("Starting VaniBill");

    let shutdown = Arc::new(ShutdownHandler::new().install().await);

    // --- HTTP command endpoint ---
    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    tracing::info!("Command endpoint listening on http://{}", cli.listen);

    let server_shutdown = Arc::clone(&shutdown);
    let server_handle = tokio::spawn(async move {
        let result = axum::serve(listener, build_router())
            .with_graceful_shutdown(async move { server_shutdown.wait().await })
            .await;
        if let Err(e) = result {
            tracing::error!("HTTP server failed: {}", e);
        }
    });

    // --- Optional transcript replay through the capture pipeline ---
    let mut replay_tasks = Vec::new();
    if let Some(script_path) = &cli.replay {
        let lines = replay::load_script(script_path)?;
        tracing::info!(
            "Replaying {} utterances from {}",
            lines.len(),
            script_path.display()
        );

        let fallback: Box<dyn FallbackTranscriber> = match &cli.fallback_url {
            Some(url) => Box::new(HttpFallbackTranscriber::new(url.clone())),
            None => Box::new(NullFallback),
        };

        let (engine, engine_rx) =
            ScriptedEngine::new(lines, Duration::from_millis(cli.replay_delay_ms));
        // No low-level recorder in replay mode; the chunk stream stays empty.
        let (_chunk_tx, chunk_rx) = mpsc::channel(16);
        let (action_tx, mut action_rx) = mpsc::channel(64);

        let config = CaptureConfig {
            language: cli.language.clone(),
            fallback_timeout: Duration::from_secs(cli.fallback_timeout_secs),
        };

        let (session, handle) =
            CaptureSession::new(engine, engine_rx, chunk_rx, fallback, action_tx, config);
        replay_tasks.push(tokio::spawn(session.run()));
        replay_tasks.push(tokio::spawn(async move {
            // The action stream is the whole downstream contract; the
            // billing engine would consume it here.
            while let Some(action) = action_rx.recv().await {
                match serde_json::to_string(&action) {
                    Ok(json) => tracing::info!(target: "actions", "{}", json),
                    Err(e) => tracing::error!("failed to encode action: {}", e),
                }
            }
        }));

        handle.start().await?;
        // Keep the handle alive until shutdown so the session task stays up.
        let replay_shutdown = Arc::clone(&shutdown);
        replay_tasks.push(tokio::spawn(async move {
            replay_shutdown.wait().await;
            let _ = handle.stop().await;
        }));
    }

    shutdown.wait().await;
    tracing::info!("Beginning graceful shutdown");

    let _ = server_handle.await;
    for task in replay_tasks {
        task.abort();
    }
    tracing::info!("Shutdown complete");
    Ok(())
}
