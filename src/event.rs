use crate::model::series::HeatmapSeries;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    Live { assets: usize },
    Empty,
    Failing { error: String },
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    HeatmapUpdate(HeatmapSeries),
    FeedStatus(FeedStatus),
    LogMessage(String),
}
