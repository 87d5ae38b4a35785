mod cli;
mod commands;
mod display;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vakalath_store::{FileStorage, SnapshotConfig, SnapshotStore};
use vakalath_sync::{
    AuthProvider, DraftSession, HttpRemoteStore, MemoryRemoteStore, RemoteDraftStore, StaticAuth,
    SyncConfig,
};

use crate::cli::{Cli, Command, ShellLine, split_line};
use crate::commands::{Mode, Session};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("vakalath v{}", env!("CARGO_PKG_VERSION"));
    let session = open_session(&cli)?;

    let result = match cli.command {
        Command::Shell => shell(&session).await,
        command => commands::execute(&session, command, Mode::OneShot).await,
    };
    if session.has_pending_save() {
        info!("changes kept locally; run `vakalath save` to push them now");
    }
    session.close();
    session.wait_for_writes().await;
    result
}

fn open_session(cli: &Cli) -> Result<Session> {
    let snapshot = SnapshotConfig::new(&cli.data_dir);
    let storage = FileStorage::open(&snapshot.dir)
        .with_context(|| format!("opening data dir {}", snapshot.dir.display()))?;
    let snapshots = SnapshotStore::with_key(storage, snapshot.key);

    let config = SyncConfig::default().with_debounce(Duration::from_secs(cli.debounce_secs));
    let remote: Arc<dyn RemoteDraftStore> = match &cli.remote_url {
        Some(url) => Arc::new(
            HttpRemoteStore::new(url).with_context(|| format!("invalid remote URL `{url}`"))?,
        ),
        None => {
            warn!("no remote URL configured, remote saves last only for this process");
            Arc::new(MemoryRemoteStore::new())
        }
    };
    let auth: Arc<dyn AuthProvider> = Arc::new(StaticAuth(cli.user.clone()));

    Ok(DraftSession::open(
        snapshots,
        remote,
        auth,
        &config,
        Handle::current(),
    ))
}

/// Read commands from stdin until EOF or `exit`.
///
/// Runs on the async runtime so the debounce timer keeps firing between lines.
/// Writes already started are awaited on exit and a save still pending is
/// flushed.
async fn shell(session: &Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("vakalath> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        let words = match split_line(&line) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some(_) => {}
        }
        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                e.print().ok();
                continue;
            }
        };
        if let Err(e) = commands::execute(session, parsed.command, Mode::Shell).await {
            eprintln!("error: {e:#}");
        }
    }

    let pending = session.has_pending_save();
    session.close();
    session.wait_for_writes().await;
    if pending {
        match session.save_now().await {
            Ok(at) => info!(updated_at = %at, "pending changes saved on exit"),
            Err(e) => warn!(error = %e, "pending changes not saved on exit"),
        }
    }
    Ok(())
}
