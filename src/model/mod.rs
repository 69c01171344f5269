pub mod metric;
pub mod series;
