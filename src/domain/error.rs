//! Domain error types.

/// Top-level error type for ribbontrader.
#[derive(Debug, thiserror::Error)]
pub enum RibbonError {
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

    #[error("no data for {code}")]
    NoData { code: String },

    #[error("insufficient data for {code}: have {bars} bars, need {minimum}")]
    InsufficientData {
        code: String,
        bars: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RibbonError> for std::process::ExitCode {
    fn from(err: &RibbonError) -> Self {
        let code: u8 = match err {
            RibbonError::Io(_) => 1,
            RibbonError::ConfigParse { .. }
            | RibbonError::ConfigMissing { .. }
            | RibbonError::ConfigInvalid { .. } => 2,
            RibbonError::Data { .. }
            | RibbonError::NoData { .. }
            | RibbonError::InsufficientData { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
