use crate::config::ScanOptions;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Scanner for finding markup files below a set of roots
pub struct MarkupScanner {
    roots: Vec<PathBuf>,
    options: Arc<ScanOptions>,
}

impl MarkupScanner {
    pub fn new<I, P>(roots: I, options: ScanOptions) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            roots: roots
                .into_iter()
                .map(|root| root.as_ref().to_path_buf())
                .collect(),
            options: Arc::new(options),
        }
    }

    /// Markup files under every root, de-duplicated by resolved path and sorted.
    ///
    /// Roots that do not exist are skipped. A root naming a file is always
    /// included, whatever its extension.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = BTreeSet::new();

        for root in &self.roots {
            if root.as_os_str().is_empty() || !root.exists() {
                log::debug!("Skipping missing scan root {}", root.display());
                continue;
            }
            if root.is_file() {
                files.insert(resolve(root));
                continue;
            }
            self.walk(root, &mut files);
        }

        log::info!("Found {} markup files", files.len());
        files.into_iter().collect()
    }

    fn walk(&self, root: &Path, files: &mut BTreeSet<PathBuf>) {
        let scope_root = root.to_path_buf();
        let options = Arc::clone(&self.options);
        let mut builder = WalkBuilder::new(root);
        builder.standard_filters(false);
        builder.filter_entry(move |entry| {
            !MarkupScanner::is_ignored_scope(entry.path(), &scope_root, &options)
        });

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if !self.is_markup_file(path) {
                        continue;
                    }
                    files.insert(resolve(path));
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }
    }

    fn is_markup_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.options.is_markup_extension(ext))
    }

    fn is_ignored_scope(path: &Path, root: &Path, options: &ScanOptions) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };
        let mut components = relative.components().peekable();
        while let Some(component) = components.next() {
            // the last component is the entry itself; only directories count
            if components.peek().is_none() && !path.is_dir() {
                break;
            }
            if let Component::Normal(name) = component {
                if options.is_ignored_dir(&name.to_string_lossy()) {
                    return true;
                }
            }
        }
        false
    }
}

fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
