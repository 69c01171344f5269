pub mod block;

use std::collections::HashMap;

use crate::config::HeatmapConfig;
use crate::model::series::HeatmapSeries;

pub use block::{block_color, format_label, normalized_size, HeatmapBlock, Rgba};

/// Smoothed visual values for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub symbol: String,
    pub size: f64,
    pub color_value: f64,
}

/// Keeps per-symbol display state across updates and derives blocks from it.
///
/// States are stored one per series position; `index` maps a symbol to its
/// first slot, which is what the next update smooths against.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    cfg: HeatmapConfig,
    states: Vec<DisplayState>,
    index: HashMap<String, usize>,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self::new(HeatmapConfig::default())
    }
}

impl HeatmapRenderer {
    pub fn new(cfg: HeatmapConfig) -> Self {
        Self {
            cfg,
            states: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn states(&self) -> &[DisplayState] {
        &self.states
    }

    pub fn get(&self, symbol: &str) -> Option<&DisplayState> {
        self.index.get(symbol).map(|&i| &self.states[i])
    }

    /// True once any non-empty series has been applied.
    pub fn is_seeded(&self) -> bool {
        !self.states.is_empty()
    }

    /// Blend `series` into the display state, one state per position. An empty
    /// series is ignored and the previous state is kept. Symbols absent from
    /// `series` are dropped.
    ///
    /// Returns whether the state changed.
    pub fn update(&mut self, series: &HeatmapSeries) -> bool {
        if series.is_empty() {
            return false;
        }

        let keep = self.cfg.smoothing;
        let take = 1.0 - keep;
        let mut states = Vec::with_capacity(series.len());
        let mut index = HashMap::with_capacity(series.len());

        for (symbol, size, color) in series.iter() {
            let next = match self.get(symbol) {
                Some(prev) => DisplayState {
                    symbol: symbol.to_string(),
                    size: prev.size * keep + size * take,
                    color_value: prev.color_value * keep + color * take,
                },
                None => DisplayState {
                    symbol: symbol.to_string(),
                    size,
                    color_value: color,
                },
            };
            index.entry(symbol.to_string()).or_insert(states.len());
            states.push(next);
        }

        self.states = states;
        self.index = index;
        true
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.index.clear();
    }

    /// Drawable blocks in display order.
    pub fn blocks(&self) -> Vec<HeatmapBlock> {
        let (min, max) = self
            .states
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.size), hi.max(s.size))
            });

        self.states
            .iter()
            .map(|s| HeatmapBlock {
                symbol: s.symbol.clone(),
                size_px: normalized_size(s.size, min, max, &self.cfg),
                color: block_color(s.color_value, &self.cfg),
                label: format_label(s.color_value),
            })
            .collect()
    }
}
