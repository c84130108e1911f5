use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Read a flat catalog file.
///
/// Returns `None` when the file does not exist. Keys are taken verbatim:
/// catalog keys are source-language sentences, so a `.` inside one is not a
/// nesting separator.
pub fn read_catalog(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Some(Map::new()));
    }

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => bail!("Root of catalog file must be an object: {}", path.display()),
    }
}
