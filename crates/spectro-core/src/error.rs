use thiserror::Error;

/// Validation failures reported by the compositor and its configuration layer.
///
/// None of these are fatal: the operation that produced one is skipped and the
/// previous state stays in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectroError {
    #[error("invalid line rate {0} [0 <= lineRate < 50 lines/sec]")]
    InvalidLineRate(f64),
    #[error("malformed color map: {0}")]
    MalformedColorMap(String),
    #[error("unknown direction '{0}', expected up|down|left|right")]
    UnknownDirection(String),
    #[error("unknown scan mode '{0}', expected waterfall|rasterscan")]
    UnknownScanMode(String),
}
