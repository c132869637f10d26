//! Reconciliation of UI markup bindings against nodes and tables.

use crate::codec::is_managed;
use crate::config::ScanOptions;
use crate::error::{CompilerError, Result};
use crate::nodes::{node_keys, Node};
use crate::report::{KeyListReport, UiKeysReport, UiReports};
use crate::scanner::MarkupScanner;
use crate::tables::{all_keys, TableSet};
use crate::GENERATOR_VERSION;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extracts quoted values of binding attributes from raw markup text.
#[derive(Debug, Clone)]
pub struct BindingExtractor {
    pattern: Regex,
}

impl BindingExtractor {
    pub fn new<I, S>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = attributes
            .into_iter()
            .map(|attr| regex::escape(attr.as_ref()))
            .collect();
        if names.is_empty() {
            return Err(CompilerError::invalid_config(
                "at least one binding attribute is required",
            ));
        }
        let source = format!(
            r#"(?:{})\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
            names.join("|")
        );
        let pattern = Regex::new(&source)
            .map_err(|e| CompilerError::invalid_config(format!("binding pattern: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn from_options(options: &ScanOptions) -> Result<Self> {
        options.validate()?;
        Self::new(&options.attributes)
    }

    /// Distinct trimmed non-empty values bound in `text`.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        self.pattern
            .captures_iter(text)
            .filter(|caps| caps.get(0).is_some_and(|m| starts_attribute(text, m.start())))
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|value| value.as_str().trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Union of bound values across `files`; unreadable files contribute nothing.
    pub fn extract_files(&self, files: &[PathBuf]) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for path in files {
            match fs::read(path) {
                Ok(bytes) => keys.extend(self.extract(&String::from_utf8_lossy(&bytes))),
                Err(e) => log::warn!("Skipping unreadable markup {}: {e}", path.display()),
            }
        }
        keys
    }
}

/// The attribute name at `start` is not the tail of a longer name.
fn starts_attribute(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .map_or(true, |prev| !(prev.is_alphanumeric() || prev == '_' || prev == '-'))
}

/// Scan `roots` for bound keys and reconcile them against nodes and tables.
pub fn scan_ui<P: AsRef<Path>>(
    nodes: &[Node],
    tables: &TableSet,
    roots: &[P],
    options: &ScanOptions,
) -> Result<UiReports> {
    let extractor = BindingExtractor::from_options(options)?;
    let files = MarkupScanner::new(roots, options.clone()).scan();
    let referenced = extractor.extract_files(&files);
    log::info!(
        "Found {} distinct bound keys in {} files",
        referenced.len(),
        files.len()
    );
    Ok(reconcile_ui(nodes, tables, &referenced))
}

/// Three-way diff between nodes, tables and UI-referenced keys.
pub fn reconcile_ui(nodes: &[Node], tables: &TableSet, referenced: &BTreeSet<String>) -> UiReports {
    let node_keys = node_keys(nodes);
    let ui_keys: BTreeSet<&str> = referenced
        .iter()
        .map(String::as_str)
        .filter(|key| is_managed(key))
        .collect();

    let ui_missing_in_nodes = collect(ui_keys.iter().filter(|key| !node_keys.contains(*key)));
    let nodes_unused_in_ui = collect(node_keys.iter().filter(|key| !ui_keys.contains(*key)));
    let legacy_orphan = collect(all_keys(tables).iter().filter(|key| {
        is_managed(key) && !node_keys.contains(*key) && !ui_keys.contains(*key)
    }));

    if !ui_missing_in_nodes.is_empty() {
        log::warn!(
            "{} UI keys have no node: {}",
            ui_missing_in_nodes.len(),
            ui_missing_in_nodes.join(", ")
        );
    }

    UiReports {
        ui_keys: UiKeysReport {
            version: GENERATOR_VERSION.to_string(),
            count: referenced.len(),
            g_count: ui_keys.len(),
            keys: referenced.iter().cloned().collect(),
        },
        ui_missing_in_nodes: KeyListReport::new(ui_missing_in_nodes),
        nodes_unused_in_ui: KeyListReport::new(nodes_unused_in_ui),
        legacy_orphan: KeyListReport::new(legacy_orphan),
    }
}

fn collect<S: AsRef<str>>(keys: impl IntoIterator<Item = S>) -> Vec<String> {
    keys.into_iter().map(|key| key.as_ref().to_string()).collect()
}
