//! Project options selected by the user.
//!
//! Options arrive fully populated from the CLI layer, either from flags or
//! from an options file. The engine itself never validates them beyond what
//! the types already guarantee.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateResult};

/// Supported front-end frameworks. Each one owns a subtree of the template store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::React, Framework::Vue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "react" => Some(Self::React),
            "vue" => Some(Self::Vue),
            _ => None,
        }
    }

    /// Version used when the caller does not pick one.
    pub fn default_version(&self) -> &'static str {
        match self {
            Self::React => "18",
            Self::Vue => "3",
        }
    }

    /// Versions offered for this framework.
    pub fn supported_versions(&self) -> &'static [&'static str] {
        match self {
            Self::React => &["18", "17", "16"],
            Self::Vue => &["3", "2"],
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of the generated app in a qiankun micro-frontend setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QiankunMode {
    /// Host application that mounts micro apps
    Main,
    /// Micro application mounted by a host
    Micro,
}

impl QiankunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Micro => "micro",
        }
    }
}

/// Immutable configuration for one generation run.
///
/// The qiankun flag and its mode share one field, so a mode can never exist
/// without the integration being enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub framework: Framework,
    pub version: String,
    pub typescript: bool,
    pub router: bool,
    pub qiankun: Option<QiankunMode>,
}

impl ProjectOptions {
    /// Options with the framework's default version, TypeScript and router on, no qiankun.
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            version: framework.default_version().to_string(),
            typescript: true,
            router: true,
            qiankun: None,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    pub fn router(mut self, router: bool) -> Self {
        self.router = router;
        self
    }

    pub fn with_qiankun(mut self, mode: Option<QiankunMode>) -> Self {
        self.qiankun = mode;
        self
    }

    pub fn qiankun_enabled(&self) -> bool {
        self.qiankun.is_some()
    }

    /// Load options from a YAML or JSON file.
    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse options; a qiankun flag/mode mismatch is `InvalidOptions`.
    pub fn from_yaml(content: &str) -> TemplateResult<Self> {
        let raw: RawProjectOptions = serde_yaml::from_str(content)?;
        Self::try_from(raw)
    }
}

/// On-disk shape of the options, with the flat keys templates also see.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProjectOptions {
    framework: Framework,
    #[serde(default)]
    version: Option<String>,
    #[serde(default = "default_true")]
    typescript: bool,
    #[serde(default = "default_true")]
    router: bool,
    #[serde(default)]
    qiankun: bool,
    #[serde(default)]
    qiankun_mode: Option<QiankunMode>,
}

fn default_true() -> bool {
    true
}

impl TryFrom<RawProjectOptions> for ProjectOptions {
    type Error = TemplateError;

    fn try_from(raw: RawProjectOptions) -> Result<Self, Self::Error> {
        let qiankun = match (raw.qiankun, raw.qiankun_mode) {
            (true, Some(mode)) => Some(mode),
            (false, None) => None,
            (true, None) => {
                return Err(TemplateError::InvalidOptions(
                    "qiankunMode is required when qiankun is enabled".into(),
                ))
            }
            (false, Some(_)) => {
                return Err(TemplateError::InvalidOptions(
                    "qiankunMode is only allowed when qiankun is enabled".into(),
                ))
            }
        };

        Ok(Self {
            version: raw
                .version
                .unwrap_or_else(|| raw.framework.default_version().to_string()),
            framework: raw.framework,
            typescript: raw.typescript,
            router: raw.router,
            qiankun,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let opts = ProjectOptions::new(Framework::Vue);
        assert_eq!(opts.version, "3");
        assert!(opts.typescript);
        assert!(opts.router);
        assert!(!opts.qiankun_enabled());
    }

    #[test]
    fn test_from_yaml() {
        let opts = ProjectOptions::from_yaml(
            "framework: react\nversion: \"17\"\ntypescript: false\nqiankun: true\nqiankunMode: micro\n",
        )
        .unwrap();

        assert_eq!(opts.framework, Framework::React);
        assert_eq!(opts.version, "17");
        assert!(!opts.typescript);
        assert!(opts.router);
        assert_eq!(opts.qiankun, Some(QiankunMode::Micro));
    }

    #[test]
    fn test_from_json() {
        let opts = ProjectOptions::from_yaml(r#"{"framework": "vue", "router": false}"#).unwrap();
        assert_eq!(opts.framework, Framework::Vue);
        assert_eq!(opts.version, "3");
        assert!(!opts.router);
    }

    #[test]
    fn test_qiankun_mode_requires_flag() {
        assert!(matches!(
            ProjectOptions::from_yaml("framework: vue\nqiankun: true\n"),
            Err(TemplateError::InvalidOptions(_))
        ));
        assert!(matches!(
            ProjectOptions::from_yaml("framework: vue\nqiankunMode: main\n"),
            Err(TemplateError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_unknown_framework_rejected() {
        assert!(matches!(
            ProjectOptions::from_yaml("framework: svelte\n"),
            Err(TemplateError::Yaml(_))
        ));
        assert_eq!(Framework::from_str("VUE"), Some(Framework::Vue));
        assert_eq!(Framework::from_str("svelte"), None);
    }
}
