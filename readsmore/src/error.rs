use thiserror::Error;

/// Errors raised by a [`TruncationController`](crate::TruncationController).
#[derive(Debug, Error)]
pub enum Error {
    /// A toggle was created but could not be found to bind its handler.
    #[error("toggle '{id}' is not attached to the document")]
    ToggleMissing { id: String },

    /// No managed element at this index.
    #[error("no managed element at index {0}")]
    UnknownElement(usize),

    /// The element fits within its limit and never received a toggle.
    #[error("element {0} was not truncated")]
    NotTruncated(usize),

    #[error("controller is already initialized")]
    AlreadyInitialized,

    #[error("controller is not initialized")]
    NotInitialized,

    /// The options object could not be parsed.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
