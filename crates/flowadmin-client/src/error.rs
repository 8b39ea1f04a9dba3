use thiserror::Error;

/// Errors returned by [`crate::AdminClient`].
///
/// Callers treat [`ClientError::Unauthorized`] as "session is gone" and
/// everything else as a failed operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered `401`. Expired and invalid tokens are not told apart.
    #[error("not authorized")]
    Unauthorized,

    /// Non-2xx response other than `401`, with the server's message if it sent one.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A file selected for upload could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// The server's free-text message, when the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
