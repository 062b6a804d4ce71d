//! Rendering context passed to every template and filename render.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::options::{Framework, ProjectOptions};

/// Flat key/value data visible to templates.
///
/// Built once per generation run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderingContext {
    values: Map<String, Value>,
}

impl RenderingContext {
    /// Merge the project options into a context.
    ///
    /// Exactly one of `reactVersion` / `vueVersion` is set, matching the
    /// selected framework. `qiankunMode` is only present when qiankun is on.
    pub fn build(project_name: &str, options: &ProjectOptions) -> Self {
        let mut values = Map::new();
        values.insert("projectName".into(), Value::from(project_name));
        values.insert("framework".into(), Value::from(options.framework.as_str()));
        values.insert("version".into(), Value::from(options.version.as_str()));
        values.insert("typescript".into(), Value::Bool(options.typescript));
        values.insert("router".into(), Value::Bool(options.router));
        values.insert("qiankun".into(), Value::Bool(options.qiankun_enabled()));
        if let Some(mode) = options.qiankun {
            values.insert("qiankunMode".into(), Value::from(mode.as_str()));
        }

        let version_key = match options.framework {
            Framework::React => "reactVersion",
            Framework::Vue => "vueVersion",
        };
        values.insert(version_key.into(), Value::from(options.version.as_str()));

        Self { values }
    }

    /// Context from arbitrary values. Used for ad-hoc renders and tests.
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// JavaScript-style truthiness of a context value. Missing keys are falsy.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).map(is_truthy).unwrap_or(false)
    }

    pub fn framework(&self) -> Option<Framework> {
        self.get("framework")
            .and_then(Value::as_str)
            .and_then(Framework::from_str)
    }

    pub fn typescript(&self) -> bool {
        self.is_truthy("typescript")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

/// JavaScript truthiness: `false`, `null`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
