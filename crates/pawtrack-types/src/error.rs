use thiserror::Error;

/// Errors from the remote document store.
///
/// Every variant is non-fatal to the application: the sync engine reacts
/// by flagging offline and keeping the cached local state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors from the assistant collaborator.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("empty response from model")]
    EmptyResponse,
}

/// Errors from backup export/import.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backup file is not a JSON object: {0}")]
    Malformed(String),
}

/// Errors from image decoding/downscaling.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported or corrupt image: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("not a data URI")]
    NotADataUri,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "unexpected status 500: boom");
    }

    #[test]
    fn assistant_error_display() {
        let err = AssistantError::Provider {
            message: "timeout".into(),
        };
        assert!(err.to_string().contains("timeout"));
    }
}
