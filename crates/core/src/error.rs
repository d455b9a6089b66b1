/// Result alias that carries the custom [`VisualiserError`] type.
pub type Result<T> = std::result::Result<T, VisualiserError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum VisualiserError {
    /// Free-form failure with a readable message.
    #[error("{0}")]
    Message(String),
    /// User supplied data (custom arrays, speeds, config values) that cannot
    /// be used. The previous valid state is always kept when this is raised.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested algorithm is not part of the instrumented set.
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl VisualiserError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        Self::InvalidInput(msg.into())
    }
}
