use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crypto_heatmap::config::HeatmapConfig;
use crypto_heatmap::event::AppEvent;
use crypto_heatmap::heatmap::{HeatmapBlock, Rgba};
use crypto_heatmap::model::series::HeatmapSeries;
use crypto_heatmap::ui::heatmap_grid::{cell_size, layout_blocks};
use crypto_heatmap::ui::{self, AppState};

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn block(symbol: &str, size_px: f64) -> HeatmapBlock {
    HeatmapBlock {
        symbol: symbol.to_string(),
        size_px,
        color: Rgba {
            r: 0,
            g: 200,
            b: 0,
            a: 1.0,
        },
        label: "0.00%".to_string(),
    }
}

#[test]
fn render_loading_placeholder_before_first_update() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
    let state = AppState::new("http://localhost/ohlcv", HeatmapConfig::default());

    terminal
        .draw(|frame| ui::render(frame, &state))
        .expect("render should succeed");

    let text = buffer_text(&terminal);
    assert!(text.contains("Loading data..."));
    assert!(text.contains("WAITING"));
}

#[test]
fn render_blocks_with_symbol_and_label() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
    let mut state = AppState::new("http://localhost/ohlcv", HeatmapConfig::default());
    let series = HeatmapSeries::new(
        vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
        vec![2000.0, 1000.0],
        vec![10.0, -3.5],
    )
    .unwrap();
    state.apply(AppEvent::HeatmapUpdate(series));

    terminal
        .draw(|frame| ui::render(frame, &state))
        .expect("render should succeed");

    let text = buffer_text(&terminal);
    assert!(text.contains("Crypto Market Performance"));
    assert!(text.contains("BTCUSDT"));
    assert!(text.contains("10.00%"));
    assert!(text.contains("ETHUSDT"));
    assert!(text.contains("-3.50%"));
    assert!(text.contains("updates: 1"));
    assert!(!text.contains("Loading data..."));
}

#[test]
fn cell_size_maps_pixel_range() {
    assert_eq!(cell_size(50.0), (10, 2));
    assert_eq!(cell_size(150.0), (30, 6));
    assert_eq!(cell_size(250.0), (50, 10));
}

#[test]
fn layout_wraps_rows_and_drops_overflow() {
    let blocks = vec![
        block("A", 250.0),
        block("B", 150.0),
        block("C", 150.0),
        block("D", 50.0),
        block("E", 250.0),
    ];
    let area = Rect::new(1, 1, 82, 16);
    let placed = layout_blocks(&blocks, area);

    // A (50x10) and B (30x6) share the first row; C wraps below A.
    assert_eq!(placed[0], (0, Rect::new(1, 1, 50, 10)));
    assert_eq!(placed[1], (1, Rect::new(51, 1, 30, 6)));
    assert_eq!(placed[2], (2, Rect::new(1, 11, 30, 6)));
    assert_eq!(placed[3], (3, Rect::new(31, 11, 10, 2)));
    // E would need 10 more rows below row 11.
    assert_eq!(placed.len(), 4);
    for (_, rect) in &placed {
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
    }
}

#[test]
fn layout_handles_empty_area() {
    let blocks = vec![block("A", 50.0)];
    assert!(layout_blocks(&blocks, Rect::new(0, 0, 0, 10)).is_empty());
}
