use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("misaligned heatmap series: {symbols} symbols, {sizes} sizes, {colors} colors")]
    MisalignedSeries {
        symbols: usize,
        sizes: usize,
        colors: usize,
    },
}
