use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::Event;
use tokio::sync::{mpsc, watch};

use crypto_heatmap::config::Config;
use crypto_heatmap::event::AppEvent;
use crypto_heatmap::feed::{spawn_poller, MarketDataClient};
use crypto_heatmap::input::{parse_key, UiCommand};
use crypto_heatmap::ui::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install rustls crypto provider"))?;

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Check config/default.toml and HEATMAP_ENDPOINT");
            std::process::exit(1);
        }
    };

    // Log to file so it doesn't interfere with the TUI
    let log_file = std::fs::File::create(&config.logging.file)
        .with_context(|| format!("failed to create log file {}", config.logging.file))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        endpoint = %config.feed.endpoint,
        poll_interval_ms = config.feed.poll_interval_ms,
        "Starting crypto-heatmap"
    );

    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let client = Arc::new(
        MarketDataClient::new(&config.feed.endpoint, config.feed.request_timeout())
            .context("failed to build HTTP client")?,
    );
    let poller = spawn_poller(client, config.feed.poll_interval(), app_tx);

    let ctrl_c_shutdown = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received");
        let _ = ctrl_c_shutdown.send(true);
    });

    let mut terminal = ratatui::init();
    let mut app_state = AppState::new(&config.feed.endpoint, config.heatmap.clone());
    app_state.push_log(format!("crypto-heatmap started | {}", config.feed.endpoint));

    let result = run_ui(
        &mut terminal,
        &mut app_state,
        &mut app_rx,
        &shutdown_tx,
        &shutdown_rx,
        Duration::from_millis(config.ui.refresh_rate_ms),
    );

    ratatui::restore();
    poller.shutdown().await;
    tracing::info!("Shutdown complete");
    result?;
    println!("Goodbye! Check {} for details.", config.logging.file);
    Ok(())
}

fn run_ui(
    terminal: &mut ratatui::DefaultTerminal,
    app_state: &mut AppState,
    app_rx: &mut mpsc::Receiver<AppEvent>,
    shutdown_tx: &watch::Sender<bool>,
    shutdown_rx: &watch::Receiver<bool>,
    refresh: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app_state))?;

        // Handle input (non-blocking with timeout)
        if crossterm::event::poll(refresh)? {
            if let Event::Key(key) = crossterm::event::read()? {
                match parse_key(&key) {
                    Some(UiCommand::Quit) => {
                        tracing::info!("User quit");
                        let _ = shutdown_tx.send(true);
                        break;
                    }
                    Some(UiCommand::ClearDisplay) => app_state.clear_display(),
                    None => {}
                }
            }
        }

        while let Ok(evt) = app_rx.try_recv() {
            app_state.apply(evt);
        }

        if *shutdown_rx.borrow() {
            break;
        }
    }
    Ok(())
}
