pub mod config;
pub mod error;
pub mod event;
pub mod feed;
pub mod heatmap;
pub mod input;
pub mod model;
pub mod ui;
