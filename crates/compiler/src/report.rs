//! Report artifacts written by `validate` and `scan-ui`.

use crate::error::Result;
use crate::io;
use crate::GENERATOR_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const MISSING_KEYS_FILE: &str = "missing_keys.json";
pub const ORPHAN_KEYS_FILE: &str = "orphan_keys.json";
pub const DIFF_SUMMARY_FILE: &str = "diff_summary.md";
pub const UI_KEYS_FILE: &str = "ui_keys.json";
pub const UI_MISSING_IN_NODES_FILE: &str = "ui_missing_in_nodes.json";
pub const NODES_UNUSED_IN_UI_FILE: &str = "nodes_unused_in_ui.json";
pub const LEGACY_ORPHAN_FILE: &str = "legacy_orphan_keys.json";

fn generator_version() -> String {
    GENERATOR_VERSION.to_string()
}

/// Node keys absent from each language table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingReport {
    #[serde(default = "generator_version")]
    pub version: String,
    #[serde(default)]
    pub missing_by_lang: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub node_count: usize,
}

impl MissingReport {
    pub fn total_missing(&self) -> usize {
        self.missing_by_lang.values().map(Vec::len).sum()
    }
}

/// Managed table keys that have no node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanReport {
    #[serde(default = "generator_version")]
    pub version: String,
    #[serde(default)]
    pub orphan_keys: Vec<String>,
    #[serde(default)]
    pub orphan_count: usize,
}

/// Every distinct value bound in scanned markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiKeysReport {
    #[serde(default = "generator_version")]
    pub version: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub g_count: usize,
    #[serde(default)]
    pub keys: Vec<String>,
}

/// Generic `{version, count, keys}` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyListReport {
    #[serde(default = "generator_version")]
    pub version: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub keys: Vec<String>,
}

impl KeyListReport {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            version: generator_version(),
            count: keys.len(),
            keys,
        }
    }
}

/// Outputs of the table-completeness diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReports {
    pub missing: MissingReport,
    pub orphan: OrphanReport,
}

impl ValidationReports {
    pub fn write(&self, report_dir: impl AsRef<Path>) -> Result<()> {
        let dir = report_dir.as_ref();
        io::ensure_dir(dir)?;
        io::write_json(&dir.join(MISSING_KEYS_FILE), &self.missing)?;
        io::write_json(&dir.join(ORPHAN_KEYS_FILE), &self.orphan)?;
        io::write_text(&dir.join(DIFF_SUMMARY_FILE), &self.render_summary())?;
        Ok(())
    }

    pub fn render_summary(&self) -> String {
        let mut md = String::new();
        md.push_str("# Grammar ↔ i18n Validation Report\n\n");
        md.push_str(&format!("- Node keys: {}\n", self.missing.node_count));
        md.push_str(&format!("- Orphan keys: {}\n\n", self.orphan.orphan_count));
        md.push_str("## Missing keys by language\n");
        for (lang, missing) in &self.missing.missing_by_lang {
            md.push_str(&format!("- {lang}: {}\n", missing.len()));
        }
        md
    }
}

/// Outputs of the UI-usage diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiReports {
    pub ui_keys: UiKeysReport,
    pub ui_missing_in_nodes: KeyListReport,
    pub nodes_unused_in_ui: KeyListReport,
    pub legacy_orphan: KeyListReport,
}

impl UiReports {
    pub fn write(&self, report_dir: impl AsRef<Path>) -> Result<()> {
        let dir = report_dir.as_ref();
        io::ensure_dir(dir)?;
        io::write_json(&dir.join(UI_KEYS_FILE), &self.ui_keys)?;
        io::write_json(&dir.join(UI_MISSING_IN_NODES_FILE), &self.ui_missing_in_nodes)?;
        io::write_json(&dir.join(NODES_UNUSED_IN_UI_FILE), &self.nodes_unused_in_ui)?;
        io::write_json(&dir.join(LEGACY_ORPHAN_FILE), &self.legacy_orphan)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_lists_each_language() {
        let reports = ValidationReports {
            missing: MissingReport {
                version: generator_version(),
                missing_by_lang: BTreeMap::from([
                    ("en".to_string(), vec![]),
                    ("zh".to_string(), vec!["g.sys.ok".to_string()]),
                ]),
                node_count: 1,
            },
            orphan: OrphanReport {
                version: generator_version(),
                orphan_keys: vec![],
                orphan_count: 0,
            },
        };

        assert_eq!(
            reports.render_summary(),
            "# Grammar ↔ i18n Validation Report\n\n\
             - Node keys: 1\n\
             - Orphan keys: 0\n\n\
             ## Missing keys by language\n\
             - en: 0\n\
             - zh: 1\n"
        );
    }

    #[test]
    fn key_list_report_serializes_expected_shape() {
        let report = KeyListReport::new(vec!["g.sys.unknown".to_string()]);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "version": GENERATOR_VERSION,
                "count": 1,
                "keys": ["g.sys.unknown"],
            })
        );
    }

    #[test]
    fn partial_reports_default_missing_fields() {
        let report: MissingReport = serde_json::from_str("{}").unwrap();
        assert_eq!(report.total_missing(), 0);
    }
}
