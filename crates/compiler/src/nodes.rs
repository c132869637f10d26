//! Canonical node index derived from translation tables.

use crate::codec::{is_managed, key_to_grammar};
use crate::error::Result;
use crate::io;
use crate::tables::{all_keys, TableSet};
use crate::GENERATOR_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Format stamp of the node index file.
pub const NODE_INDEX_VERSION: &str = "gbook-node-index/1.0";

/// Tag carried by every node.
pub const BASE_TAG: &str = "ui";

/// Ordered (prefix, tag) pairs; first match wins.
const DOMAIN_TAGS: &[(&str, &str)] = &[
    ("g.rite.", "rite"),
    ("g.term.", "term"),
    ("g.bank.", "bank"),
    ("g.shop.", "shop"),
    ("g.sys.", "sys"),
    ("g.site.", "site"),
    ("g.confess.", "confess"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub key: String,
    pub grammar: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl Node {
    /// Build a node for `key`, failing if the key has no grammar form.
    pub fn from_key(key: &str) -> Result<Self> {
        Ok(Self {
            key: key.to_string(),
            grammar: key_to_grammar(key)?,
            tags: infer_tags(key),
            notes: String::new(),
        })
    }
}

/// Serialized snapshot of the node list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIndex {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub generated_by: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl NodeIndex {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            version: NODE_INDEX_VERSION.to_string(),
            generated_by: GENERATOR_VERSION.to_string(),
            nodes,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let index: Self = io::read_json(path)?;
        if index.version != NODE_INDEX_VERSION {
            log::warn!(
                "{}: unexpected node index version '{}' (expected '{}')",
                path.display(),
                index.version,
                NODE_INDEX_VERSION
            );
        }
        log::info!("Loaded {} nodes from {}", index.nodes.len(), path.display());
        Ok(index)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        io::write_json(path.as_ref(), self)
    }

    pub fn keys(&self) -> BTreeSet<&str> {
        node_keys(&self.nodes)
    }
}

/// Heuristic tags: the base tag plus at most one domain tag.
pub fn infer_tags(key: &str) -> Vec<String> {
    let mut tags = vec![BASE_TAG.to_string()];
    if let Some((_, tag)) = DOMAIN_TAGS
        .iter()
        .find(|(prefix, _)| key.starts_with(prefix))
    {
        tags.push((*tag).to_string());
    }
    tags
}

/// Derive the sorted node list from every managed key in `tables`.
///
/// Keys the codec rejects are dropped without failing the build.
pub fn build_node_index(tables: &TableSet) -> Vec<Node> {
    let keys: BTreeSet<&str> = all_keys(tables)
        .into_iter()
        .filter(|key| is_managed(key))
        .collect();

    let mut nodes = Vec::with_capacity(keys.len());
    for key in keys {
        match Node::from_key(key) {
            Ok(node) => nodes.push(node),
            Err(err) => log::debug!("Skipping malformed key: {err}"),
        }
    }
    log::info!("Derived {} nodes from {} languages", nodes.len(), tables.len());
    nodes
}

pub fn node_keys(nodes: &[Node]) -> BTreeSet<&str> {
    nodes.iter().map(|node| node.key.as_str()).collect()
}
