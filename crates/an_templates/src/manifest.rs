//! Generated package manifest (`package.json`) inspection.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::TemplateResult;

/// File name of the package manifest at the project root.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// The parts of a generated `package.json` the CLI cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(PACKAGE_MANIFEST)
    }

    /// Parse the manifest at the project root.
    pub fn load(project_root: &Path) -> TemplateResult<Self> {
        let content = fs::read_to_string(Self::path(project_root))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> TemplateResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn depends_on(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }
}
