/// Errors raised while building scales, parsing colors or reading feeds.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid domain [{min}, {max}]: bounds must be finite with min < max")]
    InvalidDomain { min: f64, max: f64 },

    #[error("Invalid color “{0}”")]
    InvalidColor(String),

    #[error("Malformed feed: {0}")]
    Feed(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
