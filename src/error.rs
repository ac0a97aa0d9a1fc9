use thiserror::Error;

/// Main error type for the varsift crate
#[derive(Error, Debug)]
pub enum VarsiftError {
    /// Malformed threshold expression or field key in a filter configuration
    #[error("invalid filter syntax in '{expression}': {reason}")]
    InvalidFilterSyntax { expression: String, reason: String },

    /// A configured list index exceeds the length of the resolved INFO field.
    /// This is a filter/data mismatch, not a per-record anomaly, and aborts
    /// the whole run.
    #[error("index {index} out of range for INFO field '{key}' with {len} value(s) (record at line {line})")]
    IndexOutOfRange {
        key: String,
        index: usize,
        len: usize,
        line: u64,
    },

    /// The input VCF is of a version/source combination varsift has no
    /// default filter table for
    #[error("unrecognised VCF input (fileformat: {}, source: {})",
        .version.as_deref().unwrap_or("unknown"),
        .tool.as_deref().unwrap_or("unknown"))]
    UnrecognizedFormat {
        version: Option<String>,
        tool: Option<String>,
    },

    /// A VCF data line that cannot be parsed into a variant record
    #[error("malformed VCF record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// JSON serialization errors (run summaries)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors (filter settings files)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for varsift operations
pub type Result<T> = std::result::Result<T, VarsiftError>;
