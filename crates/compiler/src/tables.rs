use crate::error::{CompilerError, Result};
use crate::io;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// key -> display text for one language
pub type Table = BTreeMap<String, String>;

/// language code -> table
pub type TableSet = BTreeMap<String, Table>;

const TABLE_EXTENSION: &str = "json";

/// Load every `<lang>.json` in `dir` (non-recursive).
///
/// The first malformed file aborts the whole load.
pub fn load_tables(dir: impl AsRef<Path>) -> Result<TableSet> {
    let dir = dir.as_ref();
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| CompilerError::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_table_file(path))
        .collect();
    files.sort();

    let mut tables = TableSet::new();
    for path in files {
        let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
            log::warn!("Skipping table with non UTF-8 name {}", path.display());
            continue;
        };
        let table = load_table(&path)?;
        log::debug!("Loaded {} keys for '{lang}'", table.len());
        tables.insert(lang.to_string(), table);
    }

    log::info!("Loaded {} language tables from {}", tables.len(), dir.display());
    Ok(tables)
}

/// Load and clean a single table file.
pub fn load_table(path: &Path) -> Result<Table> {
    let data: Value = io::read_json(path)?;
    let Value::Object(map) = data else {
        return Err(CompilerError::TableFormat {
            path: path.to_path_buf(),
        });
    };
    Ok(map
        .into_iter()
        .map(|(key, value)| (key, coerce_value(value)))
        .collect())
}

/// Write `<dir>/<lang>.json` for every table.
pub fn write_tables(dir: impl AsRef<Path>, tables: &TableSet) -> Result<()> {
    let dir = dir.as_ref();
    io::ensure_dir(dir)?;
    for (lang, table) in tables {
        io::write_json(&dir.join(format!("{lang}.{TABLE_EXTENSION}")), table)?;
    }
    log::info!("Wrote {} language tables to {}", tables.len(), dir.display());
    Ok(())
}

/// Union of all keys across all languages.
pub fn all_keys(tables: &TableSet) -> BTreeSet<&str> {
    tables
        .values()
        .flat_map(|table| table.keys().map(String::as_str))
        .collect()
}

fn is_table_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == TABLE_EXTENSION)
}

fn coerce_value(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}
