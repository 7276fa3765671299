use std::path::PathBuf;

/// Failure to obtain a usable corpus. Always fatal for construction.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("movies corpus not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported corpus format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("record {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("record {row}: field `{field}` has invalid value {value:?}")]
    InvalidField { row: usize, field: &'static str, value: String },
}

/// Rejected construction-time settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid n-gram range ({min}, {max})")]
    NgramRange { min: usize, max: usize },

    #[error("max_features must be greater than zero")]
    ZeroMaxFeatures,
}
