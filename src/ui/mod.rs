pub mod dashboard;
pub mod heatmap_grid;

use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::config::HeatmapConfig;
use crate::event::{AppEvent, FeedStatus};
use crate::heatmap::HeatmapRenderer;

use dashboard::{KeybindBar, LogPanel, StatusBar};
use heatmap_grid::HeatmapGrid;

const MAX_LOG_MESSAGES: usize = 200;

pub struct AppState {
    pub endpoint: String,
    pub renderer: HeatmapRenderer,
    pub clear_on_empty: bool,
    pub feed_status: Option<FeedStatus>,
    /// Asset count of the most recently published series.
    pub assets: usize,
    pub last_update: Option<DateTime<Utc>>,
    pub update_count: u64,
    pub log_messages: Vec<String>,
}

impl AppState {
    pub fn new(endpoint: &str, heatmap: HeatmapConfig) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            clear_on_empty: heatmap.clear_on_empty,
            renderer: HeatmapRenderer::new(heatmap),
            feed_status: None,
            assets: 0,
            last_update: None,
            update_count: 0,
            log_messages: Vec::new(),
        }
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn clear_display(&mut self) {
        self.renderer.clear();
        self.push_log("Display cleared".to_string());
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::HeatmapUpdate(series) => {
                self.update_count += 1;
                self.assets = series.len();
                self.last_update = Some(Utc::now());
                if series.is_empty() && self.clear_on_empty {
                    self.renderer.clear();
                } else {
                    self.renderer.update(&series);
                }
            }
            AppEvent::FeedStatus(status) => {
                match &status {
                    FeedStatus::Live { assets } => {
                        if !matches!(self.feed_status, Some(FeedStatus::Live { .. })) {
                            self.push_log(format!("Feed live ({} assets)", assets));
                        }
                    }
                    FeedStatus::Empty => {
                        self.push_log("[WARN] API returned empty or invalid data.".to_string());
                    }
                    FeedStatus::Failing { error } => {
                        self.push_log(format!("[ERR] Error fetching data: {}", error));
                    }
                }
                self.feed_status = Some(status);
            }
            AppEvent::LogMessage(msg) => {
                self.push_log(msg);
            }
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // heatmap
            Constraint::Length(6), // system log
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            endpoint: &state.endpoint,
            feed_status: state.feed_status.as_ref(),
            assets: state.assets,
            updates: state.update_count,
            last_update: state.last_update,
        },
        outer[0],
    );

    let blocks = state.renderer.blocks();
    frame.render_widget(HeatmapGrid::new(&blocks), outer[1]);

    frame.render_widget(LogPanel::new(&state.log_messages), outer[2]);

    frame.render_widget(KeybindBar, outer[3]);
}
