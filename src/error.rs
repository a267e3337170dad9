use thiserror::Error;

/// All errors surfaced by the library.
///
/// Numerical oddities (non-convergence, a negative alpha) are not errors;
/// they are reported in `TrainReport` / `EvidenceReport` and logged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    #[error("eigendecomposition failed: {0}")]
    Eigen(String),

    /// Every parameter is zero, so `alpha = gamma / |W|²` is undefined.
    #[error("squared weight norm is zero; cannot update alpha")]
    ZeroWeightNorm,
}

pub type Result<T> = std::result::Result<T, Error>;
