use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum OvoApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Unknown provider operation: {0}")]
    UnknownOperation(String),
    #[error("Operation {operation} takes {expected} path parameters, but {supplied} were supplied")]
    ParameterCountMismatch { operation: String, expected: usize, supplied: usize },
    #[error("OVO service unavailable. {0}")]
    TransportError(String),
    #[error("Could not decode OVO response: {0}")]
    DecodeError(String),
}

impl OvoApiError {
    /// The message-catalog keyword used when this error is rendered to an end user.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::UnknownOperation(_) | Self::ParameterCountMismatch { .. } => "ovo_unidentified_request",
            Self::TransportError(_) => "ovo_unavailable_service",
            Self::Initialization(_) | Self::DecodeError(_) => "ovo_unknown_error",
        }
    }
}
