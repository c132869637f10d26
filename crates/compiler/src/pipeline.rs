//! File-level operations: load every input, compute, then write outputs.
//!
//! Inputs are fully loaded and every report computed before the first file
//! is written, so a malformed input never leaves a partial report set.

use crate::config::ScanOptions;
use crate::error::Result;
use crate::generate::{nodes_to_skeleton, patch};
use crate::nodes::{build_node_index, NodeIndex};
use crate::report::{UiReports, ValidationReports};
use crate::tables::{load_tables, write_tables};
use crate::ui_usage::scan_ui;
use crate::validate::validate;
use std::path::Path;

/// `i18n-to-nodes`: derive and save the node index.
pub fn extract_nodes(i18n_dir: impl AsRef<Path>, out: impl AsRef<Path>) -> Result<NodeIndex> {
    let tables = load_tables(i18n_dir)?;
    let index = NodeIndex::new(build_node_index(&tables));
    index.save(out)?;
    Ok(index)
}

/// `nodes-to-skeleton`: write empty tables for `langs`.
pub fn generate_skeleton<S: AsRef<str>>(
    nodes_path: impl AsRef<Path>,
    langs: &[S],
    out_dir: impl AsRef<Path>,
) -> Result<usize> {
    let index = NodeIndex::load(nodes_path)?;
    let skeleton = nodes_to_skeleton(&index.nodes, langs);
    write_tables(out_dir, &skeleton)?;
    Ok(index.nodes.len())
}

/// `validate`: write the missing/orphan reports and the Markdown summary.
pub fn validate_tables(
    nodes_path: impl AsRef<Path>,
    i18n_dir: impl AsRef<Path>,
    report_dir: impl AsRef<Path>,
) -> Result<ValidationReports> {
    let index = NodeIndex::load(nodes_path)?;
    let tables = load_tables(i18n_dir)?;
    let reports = validate(&index.nodes, &tables);
    reports.write(report_dir)?;
    Ok(reports)
}

/// `patch`: write every language table filled to full node coverage.
pub fn patch_tables(
    nodes_path: impl AsRef<Path>,
    i18n_dir: impl AsRef<Path>,
    base_lang: &str,
    out_dir: impl AsRef<Path>,
) -> Result<usize> {
    let index = NodeIndex::load(nodes_path)?;
    let tables = load_tables(i18n_dir)?;
    let patched = patch(&index.nodes, &tables, base_lang)?;
    write_tables(out_dir, &patched)?;
    Ok(patched.len())
}

/// `scan-ui`: write the four UI reconciliation reports.
pub fn scan_ui_usage<P: AsRef<Path>>(
    nodes_path: impl AsRef<Path>,
    i18n_dir: impl AsRef<Path>,
    scan_paths: &[P],
    options: &ScanOptions,
    report_dir: impl AsRef<Path>,
) -> Result<UiReports> {
    let index = NodeIndex::load(nodes_path)?;
    let tables = load_tables(i18n_dir)?;
    let reports = scan_ui(&index.nodes, &tables, scan_paths, options)?;
    reports.write(report_dir)?;
    Ok(reports)
}
