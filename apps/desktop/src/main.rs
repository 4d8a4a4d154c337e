use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    render_state, AppFlow, ConnectivityMonitor, FilmView, FlowState, HttpTransport, SessionState,
};
use shared::domain::Identity;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use render::TerminalView;

#[derive(Parser, Debug)]
#[command(about = "Sign in, list your films, and keep an eye on the connection")]
struct Args {
    /// Film service base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Settings file (defaults to ./filmoteka.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Submit the first sign-in form with this name (needs --email).
    #[arg(long, requires = "email")]
    name: Option<String>,
    #[arg(long, requires = "name")]
    email: Option<String>,
    #[arg(long)]
    probe_interval_ms: Option<u64>,
    /// Report successful probes slower than this as a slow network.
    #[arg(long)]
    slow_probe_ms: Option<u64>,
    /// Exit once films or an error are shown instead of watching connectivity.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = config::load_settings(args.config.as_deref())?;
    if let Some(v) = args.base_url {
        config.base_url = v;
    }
    if let Some(ms) = args.probe_interval_ms {
        config.probe_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = args.slow_probe_ms {
        config.slow_probe_threshold = Some(Duration::from_millis(ms));
    }

    let transport =
        Arc::new(HttpTransport::new(&config).context("invalid film service configuration")?);
    info!(base_url = transport.base_url(), "film service configured");

    let monitor = ConnectivityMonitor::new(transport.clone(), &config).spawn();
    let mut status = monitor.subscribe();
    let status_task = tokio::spawn(async move {
        loop {
            match status.recv().await {
                Ok(failure) => println!("{}", TerminalView.connectivity_error(&failure)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "status surface fell behind connectivity reports")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut prefilled = match (args.name, args.email) {
        (Some(name), Some(email)) => {
            Some(Identity::new(name, email).context("invalid --name/--email")?)
        }
        _ => None,
    };

    let mut flow = AppFlow::new(transport, SessionState::new());
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut state = flow.start().await.clone();

    loop {
        for node in render_state(&TerminalView, &state, flow.last_auth_error()) {
            println!("{node}");
        }
        if state != FlowState::ShowingAuth {
            break;
        }

        let identity = match prefilled.take() {
            Some(identity) => identity,
            None => match prompt_identity(&mut input).await? {
                Some(identity) => identity,
                None => {
                    info!("input closed before sign-in");
                    break;
                }
            },
        };
        state = flow.submit(identity).await?.clone();
    }

    if state.is_terminal() && !args.once {
        info!("watching connectivity, press Ctrl-C to exit");
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl-C")?;
    }

    monitor.shutdown().await;
    if let Err(error) = status_task.await {
        warn!(%error, "status task ended abnormally");
    }
    Ok(())
}

/// Reads name and email lines until they form a valid identity.
/// `None` when stdin is closed.
async fn prompt_identity(input: &mut Lines<BufReader<Stdin>>) -> Result<Option<Identity>> {
    loop {
        let Some(name) = prompt(input, "Name: ").await? else {
            return Ok(None);
        };
        let Some(email) = prompt(input, "Email: ").await? else {
            return Ok(None);
        };
        match Identity::new(name, email) {
            Ok(identity) => return Ok(Some(identity)),
            Err(error) => println!("! {error}"),
        }
    }
}

async fn prompt(input: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(input.next_line().await?)
}
