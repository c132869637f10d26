use crate::codec::is_managed;
use crate::nodes::{node_keys, Node};
use crate::report::{MissingReport, OrphanReport, ValidationReports};
use crate::tables::{all_keys, TableSet};
use crate::GENERATOR_VERSION;
use std::collections::BTreeMap;

/// Table-completeness diff between the node index and every language table.
///
/// Orphans are informational; they never make the result a failure.
pub fn validate(nodes: &[Node], tables: &TableSet) -> ValidationReports {
    let node_keys = node_keys(nodes);

    let missing_by_lang: BTreeMap<String, Vec<String>> = tables
        .iter()
        .map(|(lang, table)| {
            let missing: Vec<String> = node_keys
                .iter()
                .filter(|key| !table.contains_key(**key))
                .map(|key| key.to_string())
                .collect();
            if !missing.is_empty() {
                log::info!("'{lang}' is missing {} node keys", missing.len());
            }
            (lang.clone(), missing)
        })
        .collect();

    let orphan_keys: Vec<String> = all_keys(tables)
        .into_iter()
        .filter(|key| is_managed(key) && !node_keys.contains(key))
        .map(str::to_string)
        .collect();

    ValidationReports {
        missing: MissingReport {
            version: GENERATOR_VERSION.to_string(),
            missing_by_lang,
            node_count: node_keys.len(),
        },
        orphan: OrphanReport {
            version: GENERATOR_VERSION.to_string(),
            orphan_count: orphan_keys.len(),
            orphan_keys,
        },
    }
}
