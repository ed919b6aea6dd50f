//! Solace application binary - composition root.
//!
//! Ties the workspace crates into a single executable:
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML (plus env overrides)
//! 3. Initialize tracing
//! 4. Dispatch to the chat REPL or the admin document commands

mod cli;
mod render;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use solace_chat::{HttpChatBackend, RejectReason, SessionEngine, SubmitOutcome};
use solace_core::config::SolaceConfig;
use solace_ingest::{HttpDocumentStore, IngestionWorkflow, UploadCandidate, UploadOutcome};

use cli::{CliArgs, Command, DocsCommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = SolaceConfig::load_or_default(&config_file).with_env_overrides();

    // Tracing. Priority: RUST_LOG env > --log-level flag > config file value.
    let level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.log.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    tracing::info!("Starting Solace v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let timeout = Duration::from_secs(config.backend.request_timeout_secs);

    match args.command {
        Command::Chat => run_chat(&config, timeout).await,
        Command::Docs { command } => match command {
            DocsCommand::Upload { path } => run_upload(&config, timeout, &path).await,
            DocsCommand::List => run_list(&config, timeout).await,
        },
    }
}

/// Interactive chat loop over stdin.
async fn run_chat(
    config: &SolaceConfig,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = HttpChatBackend::new(&config.backend.base_url, timeout)?;
    let engine = SessionEngine::new(Arc::new(backend), config.chat.user_id.clone());

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if engine.transcript_len() == 0 {
        stdout
            .write_all(format!("{}\n\n", render::WELCOME_BANNER).as_bytes())
            .await?;
    }

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let input = line.trim();
        if input == "exit" || input == "quit" {
            break;
        }

        match engine.submit(input).await {
            SubmitOutcome::Rejected(RejectReason::Empty) => continue,
            SubmitOutcome::Rejected(RejectReason::Busy) => {
                stdout
                    .write_all(b"Still waiting for the previous reply.\n")
                    .await?;
            }
            SubmitOutcome::Answered => {
                if let Some(turn) = engine.transcript().last() {
                    stdout
                        .write_all(format!("{}\n", render::render_turn(turn)).as_bytes())
                        .await?;
                }
            }
            SubmitOutcome::Failed(reason) => {
                // The engine already appended the apology turn.
                if let Some(turn) = engine.transcript().last() {
                    stdout
                        .write_all(format!("{}\n", render::render_turn(turn)).as_bytes())
                        .await?;
                }
                stdout
                    .write_all(format!("[error] {}\n", reason).as_bytes())
                    .await?;
            }
        }
    }

    Ok(())
}

/// Upload one file through the ingestion workflow.
async fn run_upload(
    config: &SolaceConfig,
    timeout: Duration,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.backend.require_admin_token()?;
    let store = HttpDocumentStore::new(&config.backend.base_url, token, timeout)?;
    let workflow = IngestionWorkflow::new(Arc::new(store));

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or("path has no filename component")?;

    workflow.select_file(UploadCandidate::new(name.clone(), bytes));
    match workflow.upload().await {
        UploadOutcome::Succeeded => {
            println!("{}: {}", name, workflow.status());
            println!("\n{}", render::render_documents(&workflow.documents()));
            Ok(())
        }
        UploadOutcome::Failed(reason) => {
            println!("{}: Error: {}", name, reason);
            println!("Accepted types: {}", render::ACCEPTED_EXTENSIONS);
            Err(reason.into())
        }
        // Unreachable: a candidate was staged and nothing else runs.
        UploadOutcome::NoCandidate | UploadOutcome::Busy => Ok(()),
    }
}

/// Print the stored-document table.
async fn run_list(
    config: &SolaceConfig,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.backend.require_admin_token()?;
    let store = HttpDocumentStore::new(&config.backend.base_url, token, timeout)?;
    let workflow = IngestionWorkflow::new(Arc::new(store));

    workflow.refresh().await;
    println!("{}", render::render_documents(&workflow.documents()));
    Ok(())
}
