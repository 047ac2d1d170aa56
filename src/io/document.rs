use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Failure reading one of the YAML input documents
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read document '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse document '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Document '{}' has no entry for {}", .path.display(), .missing.join(", "))]
    Incomplete { path: PathBuf, missing: Vec<String> },
}

/// Read and deserialize a YAML document
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
