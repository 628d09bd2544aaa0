//! Domain error types.

/// Top-level error type for emacross.
#[derive(Debug, thiserror::Error)]
pub enum EmacrossError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("malformed series for {instrument}: {reason}")]
    MalformedSeries { instrument: String, reason: String },

    #[error("bars for {instrument} are not newest-first at index {index}")]
    InvalidDateOrder { instrument: String, index: usize },

    #[error("indicator error: {reason}")]
    Indicator { reason: String },

    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&EmacrossError> for std::process::ExitCode {
    fn from(err: &EmacrossError) -> Self {
        let code: u8 = match err {
            EmacrossError::Io(_) => 1,
            EmacrossError::ConfigParse { .. }
            | EmacrossError::ConfigMissing { .. }
            | EmacrossError::ConfigInvalid { .. } => 2,
            EmacrossError::Data { .. } => 3,
            EmacrossError::MalformedSeries { .. }
            | EmacrossError::InvalidDateOrder { .. }
            | EmacrossError::Indicator { .. } => 4,
            EmacrossError::InvalidOrder { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
