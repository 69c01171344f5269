use crate::error::AppError;
use crate::model::metric::{normalize, Metric};
use crate::model::series::HeatmapSeries;

use super::types::Payload;

/// Result of applying one fetch outcome to [`MarketState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Latest data was replaced; the series must be sent downstream.
    Published(HeatmapSeries),
    /// Fetch failed; previous data is kept and nothing is published.
    Retained,
    /// Response older than one already applied; dropped.
    Stale,
}

/// Owner of the "latest data" list. Only the poll task mutates it.
#[derive(Debug, Default)]
pub struct MarketState {
    latest: Vec<Metric>,
    last_applied_seq: Option<u64>,
}

impl MarketState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> &[Metric] {
        &self.latest
    }

    pub fn last_applied_seq(&self) -> Option<u64> {
        self.last_applied_seq
    }

    /// Apply the outcome of fetch number `seq`.
    ///
    /// Only successful outcomes advance the applied sequence, so a failure
    /// never blocks an older but still newer-than-current response.
    pub fn apply(&mut self, seq: u64, outcome: Result<Payload, AppError>) -> Applied {
        if self.last_applied_seq.is_some_and(|last| seq <= last) {
            tracing::debug!(seq, last = ?self.last_applied_seq, "Discarding out-of-order response");
            return Applied::Stale;
        }

        match outcome {
            Ok(Payload::Records(records)) => {
                self.latest = normalize(&records);
                tracing::debug!(seq, records = records.len(), metrics = self.latest.len(), "Applied market data");
            }
            Ok(Payload::Empty) | Ok(Payload::Invalid) => {
                tracing::warn!(seq, "API returned empty or invalid data");
                self.latest.clear();
            }
            Err(e) => {
                tracing::error!(seq, error = %e, "Error fetching market data");
                return Applied::Retained;
            }
        }

        self.last_applied_seq = Some(seq);
        Applied::Published(HeatmapSeries::from_metrics(&self.latest))
    }
}
