use std::fmt;

use crate::config::HeatmapConfig;

pub const GAIN_RGB: (u8, u8, u8) = (0, 200, 0);
pub const LOSS_RGB: (u8, u8, u8) = (200, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Composite over a black background.
    pub fn over_black(&self) -> (u8, u8, u8) {
        let scale = |c: u8| (c as f64 * self.a).round().clamp(0.0, 255.0) as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A drawable heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapBlock {
    pub symbol: String,
    /// Edge length in pixels, within `[min_px, max_px]`.
    pub size_px: f64,
    pub color: Rgba,
    /// Smoothed percent change, e.g. `"10.00%"`.
    pub label: String,
}

/// Linear map of `size` from `[min, max]` onto `[min_px, max_px]`.
///
/// When the domain collapses (`max == min`, which includes a single block)
/// or is not finite, `degenerate_px` is returned.
pub fn normalized_size(size: f64, min: f64, max: f64, cfg: &HeatmapConfig) -> f64 {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || !size.is_finite() {
        return cfg.degenerate_px;
    }
    let t = ((size - min) / span).clamp(0.0, 1.0);
    t * (cfg.max_px - cfg.min_px) + cfg.min_px
}

/// Green for gains, red for losses. Alpha grows from 0.5 by
/// `|color_value| / color_domain_pct` and saturates at 1.0, i.e. at half the
/// color domain.
pub fn block_color(color_value: f64, cfg: &HeatmapConfig) -> Rgba {
    let (r, g, b) = if color_value >= 0.0 { GAIN_RGB } else { LOSS_RGB };
    let intensity = (color_value.abs() / cfg.color_domain_pct).min(0.5);
    let a = (0.5 + intensity).clamp(0.5, 1.0);
    Rgba { r, g, b, a }
}

pub fn format_label(color_value: f64) -> String {
    format!("{:.2}%", color_value)
}
