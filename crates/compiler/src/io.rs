use crate::error::{CompilerError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| CompilerError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| CompilerError::json(path, e))
}

/// Pretty JSON (2-space indent, non-ASCII kept verbatim), written atomically.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| CompilerError::json(path, e))?;
    write_atomic(path, &bytes)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| CompilerError::io(dir, e))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let tmp = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("report"),
        std::process::id()
    ));

    {
        let mut file = File::create(&tmp).map_err(|e| CompilerError::io(&tmp, e))?;
        file.write_all(bytes)
            .map_err(|e| CompilerError::io(&tmp, e))?;
        file.sync_all().map_err(|e| CompilerError::io(&tmp, e))?;
    }

    fs::rename(&tmp, path).map_err(|e| CompilerError::io(path, e))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
