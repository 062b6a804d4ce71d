//! Template store lookup.
//!
//! The store holds one subtree per framework (`<root>/react`, `<root>/vue`),
//! each with its package manifest template at `package.json.hbs`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::options::Framework;

/// Well-known location of the package manifest template inside a framework subtree.
pub const PACKAGE_MANIFEST_TEMPLATE: &str = "package.json.hbs";

/// Read-only template store.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Subtree holding a framework's templates.
    pub fn framework_dir(&self, framework: Framework) -> PathBuf {
        self.root.join(framework.as_str())
    }

    pub fn package_manifest_template(&self, framework: Framework) -> PathBuf {
        self.framework_dir(framework).join(PACKAGE_MANIFEST_TEMPLATE)
    }

    /// Frameworks with a subtree present in the store.
    pub fn frameworks(&self) -> Vec<Framework> {
        if !self.exists() {
            warn!("Template store does not exist: {:?}", self.root);
            return Vec::new();
        }

        Framework::ALL
            .into_iter()
            .filter(|f| self.framework_dir(*f).is_dir())
            .collect()
    }

    /// Names of top-level store entries that are not a known framework.
    pub fn unknown_entries(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| Framework::from_str(name).is_none())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_store_empty_dir() {
        let temp = tempdir().unwrap();
        let store = TemplateStore::new(temp.path());
        assert!(store.frameworks().is_empty());
    }

    #[test]
    fn test_store_frameworks() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("vue")).unwrap();
        fs::create_dir_all(temp.path().join("svelte")).unwrap();

        let store = TemplateStore::new(temp.path());
        assert_eq!(store.frameworks(), vec![Framework::Vue]);
        assert_eq!(store.unknown_entries(), vec!["svelte".to_string()]);
        assert_eq!(
            store.package_manifest_template(Framework::Vue),
            temp.path().join("vue").join("package.json.hbs")
        );
    }

    #[test]
    fn test_store_missing_root() {
        let temp = tempdir().unwrap();
        let store = TemplateStore::new(temp.path().join("missing"));
        assert!(!store.exists());
        assert!(store.frameworks().is_empty());
    }
}
