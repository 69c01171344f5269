use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::error::AppError;
use crate::event::{AppEvent, FeedStatus};

use super::rest::MarketDataClient;
use super::state::{Applied, MarketState};
use super::types::Payload;

/// Owns the periodic fetch task. Dropping the handle stops polling and
/// aborts any request still in flight.
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signal the task and wait for it to exit.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Poller task ended abnormally");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Fetch once immediately, then every `interval`, publishing results to `app_tx`.
pub fn spawn_poller(
    client: Arc<MarketDataClient>,
    interval: Duration,
    app_tx: mpsc::Sender<AppEvent>,
) -> PollerHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run_poller(client, interval, app_tx, shutdown_rx));
    PollerHandle {
        shutdown_tx,
        task: Some(task),
    }
}

async fn run_poller(
    client: Arc<MarketDataClient>,
    interval: Duration,
    app_tx: mpsc::Sender<AppEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut state = MarketState::new();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: JoinSet<(u64, Result<Payload, AppError>)> = JoinSet::new();
    let mut next_seq: u64 = 0;

    tracing::info!(
        endpoint = client.endpoint(),
        interval_ms = interval.as_millis() as u64,
        "Market data poller started"
    );

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                next_seq += 1;
                let seq = next_seq;
                let client = client.clone();
                in_flight.spawn(async move { (seq, client.fetch().await) });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                let (seq, outcome) = match joined {
                    Ok(done) => done,
                    Err(e) => {
                        tracing::error!(error = %e, "Fetch task failed");
                        continue;
                    }
                };
                let failure = outcome.as_ref().err().map(|e| e.to_string());

                let events = match state.apply(seq, outcome) {
                    Applied::Published(series) => {
                        let status = if series.is_empty() {
                            FeedStatus::Empty
                        } else {
                            FeedStatus::Live { assets: series.len() }
                        };
                        vec![AppEvent::FeedStatus(status), AppEvent::HeatmapUpdate(series)]
                    }
                    Applied::Retained => vec![AppEvent::FeedStatus(FeedStatus::Failing {
                        error: failure.unwrap_or_default(),
                    })],
                    Applied::Stale => vec![AppEvent::LogMessage(format!(
                        "[WARN] Dropped out-of-order response #{}",
                        seq
                    ))],
                };

                let mut closed = false;
                for event in events {
                    if app_tx.send(event).await.is_err() {
                        closed = true;
                        break;
                    }
                }
                if closed {
                    tracing::info!("Event receiver closed, stopping poller");
                    break;
                }
            }
        }
    }

    in_flight.abort_all();
    tracing::info!(last_seq = next_seq, "Market data poller stopped");
}
