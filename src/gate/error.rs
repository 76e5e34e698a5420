use thiserror::Error;

/// Failure to load a gate or metrics file. Validation itself never fails.
#[derive(Debug, Error)]
pub enum GateFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
