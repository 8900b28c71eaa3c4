use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing/empty text, out-of-range ratio. Rejected before any backend call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Backend timeout, connection failure, or an unusable response. Retryable.
    #[error("preprocessing unavailable: {0}")]
    PreprocessingUnavailable(String),

    /// A backend response that violates the wire contract (misaligned arrays,
    /// index gaps). Should not occur; aborts the request.
    #[error("computation fault: {0}")]
    ComputationFault(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::PreprocessingUnavailable(format!("backend timed out: {err}"))
        } else if err.is_connect() {
            Error::PreprocessingUnavailable(format!("backend unreachable: {err}"))
        } else if err.is_decode() {
            Error::PreprocessingUnavailable(format!("malformed backend payload: {err}"))
        } else {
            Error::PreprocessingUnavailable(err.to_string())
        }
    }
}
