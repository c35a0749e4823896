//! Whole-file JSON read/write helpers.

use std::fs;
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{Result, VoiceDeskError};

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| VoiceDeskError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a value as pretty JSON, creating parent directories as needed.
///
/// Non-ASCII text (currency symbols, names) is written as-is.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

/// Load a JSON file, creating it with `T::default()` when it does not exist.
pub fn load_or_init<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    if !path.exists() {
        log::info!("Creating {} with an empty default", path.display());
        let value = T::default();
        save_json(path, &value)?;
        return Ok(value);
    }
    read_json(path)
}

/// Load a JSON file, falling back to `T::default()` with a warning when it
/// does not exist.
pub fn load_or_default<T>(path: &Path, what: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::warn!("{} file not found at {}, using an empty template", what, path.display());
        return Ok(T::default());
    }
    read_json(path)
}

/// Append a record to a JSON array file (created as `[]` if missing).
///
/// Returns the number of records in the file after the append.
pub fn append_to_array(path: &Path, record: Value) -> Result<usize> {
    let mut records: Vec<Value> = load_or_init(path)?;
    records.push(record);
    save_json(path, &records)?;
    Ok(records.len())
}
