use crate::feed::types::RawRecord;

/// Per-symbol figures derived from one raw OHLCV record.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub symbol: String,
    pub price: f64,
    /// Approximation: `volume * close`, not circulating-supply capitalization.
    pub market_cap: f64,
    /// Percent change from open to close.
    pub price_change: f64,
}

impl Metric {
    /// Returns `None` when any derived figure is not finite (e.g. `open == 0`).
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let price = raw.close;
        let market_cap = raw.volume * raw.close;
        let price_change = (raw.close - raw.open) / raw.open * 100.0;

        if !(price.is_finite() && market_cap.is_finite() && price_change.is_finite()) {
            return None;
        }

        Some(Self {
            symbol: raw.symbol.clone(),
            price,
            market_cap,
            price_change,
        })
    }
}

/// Maps every record to a [`Metric`], preserving input order and dropping
/// records whose figures are not finite.
pub fn normalize(records: &[RawRecord]) -> Vec<Metric> {
    records
        .iter()
        .filter_map(|raw| {
            let metric = Metric::from_raw(raw);
            if metric.is_none() {
                tracing::warn!(
                    symbol = %raw.symbol,
                    open = raw.open,
                    close = raw.close,
                    volume = raw.volume,
                    "Dropping record with non-finite metrics"
                );
            }
            metric
        })
        .collect()
}
