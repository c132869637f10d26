use crate::error::{CompilerError, Result};
use crate::nodes::Node;
use crate::tables::{Table, TableSet};

/// Empty-valued tables for brand-new languages.
pub fn nodes_to_skeleton<S: AsRef<str>>(nodes: &[Node], langs: &[S]) -> TableSet {
    langs
        .iter()
        .map(|lang| {
            let table: Table = nodes
                .iter()
                .map(|node| (node.key.clone(), String::new()))
                .collect();
            (lang.as_ref().to_string(), table)
        })
        .collect()
}

/// Fill every language table up to full node coverage.
///
/// Absent keys take the base language's value, or `""` when the base lacks
/// it too. Existing entries, including keys without a node, are untouched.
pub fn patch(nodes: &[Node], tables: &TableSet, base_lang: &str) -> Result<TableSet> {
    let base = tables
        .get(base_lang)
        .ok_or_else(|| CompilerError::UnknownBaseLang(base_lang.to_string()))?;

    let mut out = tables.clone();
    for (lang, table) in out.iter_mut() {
        let mut added = 0usize;
        for node in nodes {
            if table.contains_key(&node.key) {
                continue;
            }
            let fallback = base.get(&node.key).cloned().unwrap_or_default();
            table.insert(node.key.clone(), fallback);
            added += 1;
        }
        if added > 0 {
            log::info!("Patched {added} keys into '{lang}' from '{base_lang}'");
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nodes(keys: &[&str]) -> Vec<Node> {
        keys.iter().map(|k| Node::from_key(k).unwrap()).collect()
    }

    fn table(pairs: &[(&str, &str)]) -> Table {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn skeleton_has_every_node_key_empty() {
        let skeleton = nodes_to_skeleton(&nodes(&["g.sys.ok", "g.shop.buy"]), &["fr", "de"]);

        assert_eq!(skeleton.len(), 2);
        for lang in ["fr", "de"] {
            assert_eq!(
                skeleton[lang],
                table(&[("g.shop.buy", ""), ("g.sys.ok", "")])
            );
        }
    }

    #[test]
    fn patch_falls_back_to_base_then_empty() {
        let nodes = nodes(&["g.sys.ok", "g.sys.cancel"]);
        let mut tables = TableSet::new();
        tables.insert("en".into(), table(&[("g.sys.ok", "OK")]));
        tables.insert(
            "zh".into(),
            table(&[("g.sys.cancel", "取消"), ("g.legacy.thing", "旧")]),
        );

        let patched = patch(&nodes, &tables, "en").unwrap();

        assert_eq!(
            patched["en"],
            table(&[("g.sys.ok", "OK"), ("g.sys.cancel", "")])
        );
        assert_eq!(
            patched["zh"],
            table(&[
                ("g.sys.cancel", "取消"),
                ("g.legacy.thing", "旧"),
                ("g.sys.ok", "OK"),
            ])
        );
    }

    #[test]
    fn patch_is_idempotent_and_never_overwrites() {
        let nodes = nodes(&["g.sys.ok", "g.term.faith"]);
        let mut tables = TableSet::new();
        tables.insert("en".into(), table(&[("g.sys.ok", "OK"), ("g.term.faith", "Faith")]));
        tables.insert("jp".into(), table(&[("g.sys.ok", "")]));

        let once = patch(&nodes, &tables, "en").unwrap();
        let twice = patch(&nodes, &once, "en").unwrap();

        assert_eq!(once, twice);
        assert_eq!(once["jp"]["g.sys.ok"], "");
        assert_eq!(once["jp"]["g.term.faith"], "Faith");
    }

    #[test]
    fn unknown_base_language_is_rejected() {
        let err = patch(&nodes(&["g.sys.ok"]), &TableSet::new(), "en").unwrap_err();
        assert!(matches!(err, CompilerError::UnknownBaseLang(ref lang) if lang == "en"));
    }
}
