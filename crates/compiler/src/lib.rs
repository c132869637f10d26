//! # Grammar i18n Compiler
//!
//! Keeps grammar nodes, per-language translation tables and UI markup
//! bindings in sync.
//!
//! ## Pipeline
//!
//! ```text
//! i18n/*.json
//!     │
//!     ├──> Table Loader
//!     │      └─> { lang: { key: text } }
//!     │
//!     ├──> Node Index Builder (g.* keys, codec, tags)
//!     │      └─> nodes.json
//!     │
//!     ├──> Validate (nodes vs tables)
//!     │      └─> missing_keys.json, orphan_keys.json
//!     │
//!     ├──> Scan UI (nodes vs tables vs markup bindings)
//!     │      └─> ui_keys.json, ui_missing_in_nodes.json, ...
//!     │
//!     └──> Skeleton / Patch
//!            └─> i18n/<lang>.json
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use grammar_i18n_compiler::{build_node_index, load_tables, validate};
//!
//! fn main() -> grammar_i18n_compiler::Result<()> {
//!     let tables = load_tables("i18n")?;
//!     let nodes = build_node_index(&tables);
//!     let reports = validate(&nodes, &tables);
//!
//!     println!("{} nodes, {} orphans", reports.missing.node_count, reports.orphan.orphan_count);
//!     Ok(())
//! }
//! ```

mod codec;
mod config;
mod error;
mod gate;
mod generate;
mod io;
mod nodes;
mod pipeline;
mod report;
mod scanner;
mod tables;
mod ui_usage;
mod validate;

/// Version stamp written into every report.
pub const GENERATOR_VERSION: &str = "grammar-i18n-compiler/1.0";

pub use codec::{grammar_to_key, is_managed, key_to_grammar, KEY_PREFIX};
pub use config::{
    ScanOptions, DEFAULT_BINDING_ATTRIBUTES, DEFAULT_IGNORED_DIRS, DEFAULT_MARKUP_EXTENSIONS,
};
pub use error::{CompilerError, Result};
pub use gate::{evaluate as evaluate_gate, evaluate_dir as evaluate_gate_dir, GateOutcome};
pub use generate::{nodes_to_skeleton, patch};
pub use nodes::{build_node_index, infer_tags, Node, NodeIndex, BASE_TAG, NODE_INDEX_VERSION};
pub use pipeline::{
    extract_nodes, generate_skeleton, patch_tables, scan_ui_usage, validate_tables,
};
pub use report::{
    KeyListReport, MissingReport, OrphanReport, UiKeysReport, UiReports, ValidationReports,
    DIFF_SUMMARY_FILE, LEGACY_ORPHAN_FILE, MISSING_KEYS_FILE, NODES_UNUSED_IN_UI_FILE,
    ORPHAN_KEYS_FILE, UI_KEYS_FILE, UI_MISSING_IN_NODES_FILE,
};
pub use scanner::MarkupScanner;
pub use tables::{load_table, load_tables, write_tables, Table, TableSet};
pub use ui_usage::{reconcile_ui, scan_ui, BindingExtractor};
pub use validate::validate;
