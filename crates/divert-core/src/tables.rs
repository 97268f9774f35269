//! Loading of static keyed tables (failure catalog, aircraft profiles, airports).

use crate::error::{DivertError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and deserialize a JSON table from disk.
pub fn read_json_table<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| DivertError::TableIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}
