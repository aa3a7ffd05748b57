//! Shared YAML/JSON loading.
//!
//! All file-backed reference data (catalogs, peer tables, engine config)
//! is read through these functions so that every parse failure carries the
//! offending path.

use std::path::Path;

use crate::error::{CatalogError, CatalogResult};

fn read_to_string(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io(e)
        }
    })
}

/// Load a YAML file into a strongly-typed struct.
pub fn load_yaml_typed<T: serde::de::DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let content = read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| CatalogError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a JSON file into a strongly-typed struct.
pub fn load_json_typed<T: serde::de::DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CatalogError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a YAML or JSON file, dispatching on the extension.
pub fn load_typed<T: serde::de::DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("yaml" | "yml") => load_yaml_typed(path),
        Some("json") => load_json_typed(path),
        _ => Err(CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Compute SHA-256 hex digest of raw bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    result.iter().map(|b| format!("{b:02x}")).collect()
}
