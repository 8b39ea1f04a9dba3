use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised by the on-disk session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Local validation failures. The `Display` text is the message shown to
/// the operator, so each variant carries a distinct sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name is required")]
    MissingName,

    #[error("Product slug is required")]
    MissingSlug,

    #[error("Select at least one flavour")]
    NoFlavours,

    #[error("Add at least one pack size")]
    NoPackSizes,

    #[error("At least one pack size is required")]
    LastPackSizeRow,

    #[error("Pack size row {0} does not exist")]
    NoSuchPackSizeRow(usize),

    #[error("Unknown flavour: {0}")]
    UnknownFlavour(String),

    #[error("Please fill in required fields")]
    IncompleteReview,

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
}
