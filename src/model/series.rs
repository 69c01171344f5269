use crate::error::AppError;
use crate::model::metric::Metric;

/// Three index-aligned sequences handed from the feed to the heatmap,
/// ordered by descending market cap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapSeries {
    symbols: Vec<String>,
    sizes: Vec<f64>,
    colors: Vec<f64>,
}

impl HeatmapSeries {
    pub fn new(symbols: Vec<String>, sizes: Vec<f64>, colors: Vec<f64>) -> Result<Self, AppError> {
        if symbols.len() != sizes.len() || symbols.len() != colors.len() {
            return Err(AppError::MisalignedSeries {
                symbols: symbols.len(),
                sizes: sizes.len(),
                colors: colors.len(),
            });
        }
        Ok(Self {
            symbols,
            sizes,
            colors,
        })
    }

    /// Sorts by market cap, largest first. Equal caps keep their input order.
    pub fn from_metrics(metrics: &[Metric]) -> Self {
        let mut sorted: Vec<&Metric> = metrics.iter().collect();
        sorted.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));

        Self {
            symbols: sorted.iter().map(|m| m.symbol.clone()).collect(),
            sizes: sorted.iter().map(|m| m.market_cap).collect(),
            colors: sorted.iter().map(|m| m.price_change).collect(),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    pub fn colors(&self) -> &[f64] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// `(symbol, size, color)` rows in series order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.symbols
            .iter()
            .zip(&self.sizes)
            .zip(&self.colors)
            .map(|((symbol, size), color)| (symbol.as_str(), *size, *color))
    }
}
