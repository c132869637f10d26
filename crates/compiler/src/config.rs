use crate::error::{CompilerError, Result};
use crate::io;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directory names never descended into while scanning markup.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    // VCS
    ".git",
    ".hg",
    ".svn",
    // dependencies
    "node_modules",
    "bower_components",
    ".venv",
    "__pycache__",
    // caches / builds
    ".cache",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".parcel-cache",
    ".turbo",
    "target",
    "build",
    "dist",
    "out",
    "coverage",
];

/// Extensions of files that may carry binding attributes.
pub const DEFAULT_MARKUP_EXTENSIONS: &[&str] = &[
    "html", "htm", "xhtml", "js", "mjs", "cjs", "jsx", "ts", "tsx", "vue", "svelte",
];

/// Attributes whose quoted value names a translation key.
pub const DEFAULT_BINDING_ATTRIBUTES: &[&str] =
    &["data-i18n", "data-i18n-placeholder", "data-binding"];

/// Configuration for the UI markup scan.
///
/// Loaded from an explicit JSON file or built from defaults. Unknown fields
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanOptions {
    /// Directory names skipped anywhere below a scan root
    pub ignore_dirs: Vec<String>,

    /// File extensions (without dot, case-insensitive) treated as markup
    pub extensions: Vec<String>,

    /// Binding attribute names to extract values from
    pub attributes: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_dirs: to_owned(DEFAULT_IGNORED_DIRS),
            extensions: to_owned(DEFAULT_MARKUP_EXTENSIONS),
            attributes: to_owned(DEFAULT_BINDING_ATTRIBUTES),
        }
    }
}

impl ScanOptions {
    /// Read options from a JSON file; absent fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let options: Self = io::read_json(path.as_ref())?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.ignore_dirs, dirs);
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let normalized = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_lowercase());
        extend_unique(&mut self.extensions, normalized);
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.attributes, attributes);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.attributes.is_empty() {
            return Err(CompilerError::invalid_config(
                "at least one binding attribute is required",
            ));
        }
        if let Some(bad) = self.attributes.iter().find(|attr| !is_attribute_name(attr)) {
            return Err(CompilerError::invalid_config(format!(
                "invalid binding attribute name: {bad:?}"
            )));
        }
        Ok(())
    }

    pub(crate) fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|ignored| ignored == name)
    }

    pub(crate) fn is_markup_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn extend_unique<I, S>(target: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for item in items {
        let item = item.into();
        if !item.is_empty() && !target.contains(&item) {
            target.push(item);
        }
    }
}
