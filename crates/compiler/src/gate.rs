//! Build gate over finished reports.

use crate::error::Result;
use crate::io;
use crate::report::{
    KeyListReport, MissingReport, OrphanReport, MISSING_KEYS_FILE, ORPHAN_KEYS_FILE,
    UI_MISSING_IN_NODES_FILE,
};
use std::path::Path;

/// Pass/fail decision plus the lines to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub failures: Vec<String>,
    pub orphan_count: usize,
}

impl GateOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    pub fn render(&self) -> String {
        let mut lines = self.failures.clone();
        if self.passed() {
            lines.push("[OK] Grammar ↔ i18n gates passed.".to_string());
        }
        lines.push(format!(
            "[INFO] i18n orphan keys (legacy allowed): {}",
            self.orphan_count
        ));
        lines.join("\n")
    }
}

/// Fail on UI keys without nodes or on any missing translation.
/// Orphans are reported, never failed on.
pub fn evaluate(
    ui_missing: &KeyListReport,
    missing: &MissingReport,
    orphan: &OrphanReport,
) -> GateOutcome {
    let mut failures = Vec::new();
    if ui_missing.count != 0 {
        failures.push(format!(
            "[FAIL] UI keys missing in nodes.json: {}",
            ui_missing.count
        ));
    }
    let missing_total = missing.total_missing();
    if missing_total != 0 {
        failures.push(format!(
            "[FAIL] Missing i18n translations for node keys (sum over langs): {missing_total}"
        ));
    }
    GateOutcome {
        failures,
        orphan_count: orphan.orphan_count,
    }
}

/// Read the three gate inputs from `report_dir` and evaluate them.
pub fn evaluate_dir(report_dir: impl AsRef<Path>) -> Result<GateOutcome> {
    let dir = report_dir.as_ref();
    let ui_missing: KeyListReport = io::read_json(&dir.join(UI_MISSING_IN_NODES_FILE))?;
    let missing: MissingReport = io::read_json(&dir.join(MISSING_KEYS_FILE))?;
    let orphan: OrphanReport = io::read_json(&dir.join(ORPHAN_KEYS_FILE))?;
    Ok(evaluate(&ui_missing, &missing, &orphan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn write_reports(dir: &Path, ui_missing: &str, missing: &str, orphan: &str) {
        fs::write(dir.join(UI_MISSING_IN_NODES_FILE), ui_missing).unwrap();
        fs::write(dir.join(MISSING_KEYS_FILE), missing).unwrap();
        fs::write(dir.join(ORPHAN_KEYS_FILE), orphan).unwrap();
    }

    #[test]
    fn passes_with_orphans_only() {
        let temp = tempdir().unwrap();
        write_reports(
            temp.path(),
            r#"{"version": "v", "count": 0, "keys": []}"#,
            r#"{"version": "v", "missing_by_lang": {"en": [], "zh": []}, "node_count": 3}"#,
            r#"{"version": "v", "orphan_keys": ["g.legacy.a"], "orphan_count": 1}"#,
        );

        let outcome = evaluate_dir(temp.path()).unwrap();

        assert!(outcome.passed());
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            outcome.render(),
            "[OK] Grammar ↔ i18n gates passed.\n[INFO] i18n orphan keys (legacy allowed): 1"
        );
    }

    #[test]
    fn fails_on_ui_missing_and_missing_translations() {
        let temp = tempdir().unwrap();
        write_reports(
            temp.path(),
            r#"{"count": 2, "keys": ["g.a.b", "g.c.d"]}"#,
            r#"{"missing_by_lang": {"en": ["g.x.y"], "zh": ["g.x.y", "g.x.z"]}}"#,
            r#"{}"#,
        );

        let outcome = evaluate_dir(temp.path()).unwrap();

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(
            outcome.failures,
            vec![
                "[FAIL] UI keys missing in nodes.json: 2",
                "[FAIL] Missing i18n translations for node keys (sum over langs): 3",
            ]
        );
        assert!(outcome
            .render()
            .ends_with("[INFO] i18n orphan keys (legacy allowed): 0"));
    }

    #[test]
    fn missing_report_file_is_an_error() {
        let temp = tempdir().unwrap();
        assert!(evaluate_dir(temp.path()).is_err());
    }
}
