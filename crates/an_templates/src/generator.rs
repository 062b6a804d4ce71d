//! Project generation: context building, materialization and manifest check.

use std::path::Path;

use tracing::{info, warn};

use crate::context::RenderingContext;
use crate::error::{TemplateError, TemplateResult};
use crate::manifest::PackageManifest;
use crate::materializer::{MaterializeReport, Materializer};
use crate::options::ProjectOptions;
use crate::store::TemplateStore;

/// Result of one generation run.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub report: MaterializeReport,
    /// Parsed package manifest, when one was produced and is valid JSON
    pub manifest: Option<PackageManifest>,
    /// Non-fatal problems worth showing to the user
    pub warnings: Vec<String>,
}

/// Generates a project from the template store.
pub struct ProjectGenerator {
    store: TemplateStore,
}

impl ProjectGenerator {
    pub fn new(store: TemplateStore) -> Self {
        Self { store }
    }

    /// Generate a project into `target_path`.
    ///
    /// A fresh renderer is used for every run. Per-file failures end up in the
    /// outcome's report; the run only fails when the store or target root is
    /// unusable, or when the framework ships a package manifest template that
    /// produced no `package.json`.
    pub fn generate(
        &self,
        target_path: &Path,
        project_name: &str,
        options: &ProjectOptions,
    ) -> TemplateResult<GenerationOutcome> {
        info!(
            "Generating {} {} project '{}' at {:?}",
            options.framework, options.version, project_name, target_path
        );

        let context = RenderingContext::build(project_name, options);
        let template_root = self.store.framework_dir(options.framework);
        let report = Materializer::new().materialize(&template_root, target_path, &context)?;

        let mut warnings: Vec<String> = report
            .failed
            .iter()
            .map(|f| format!("{}: {}", f.path.display(), f.error))
            .collect();

        let manifest_template = self.store.package_manifest_template(options.framework);
        let manifest_path = PackageManifest::path(target_path);
        let manifest = if manifest_template.exists() {
            if !manifest_path.exists() {
                return Err(TemplateError::MissingPackageManifest(manifest_path));
            }
            match PackageManifest::load(target_path) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    warn!("Generated package manifest is not valid: {}", e);
                    warnings.push(format!("package.json is not valid JSON: {}", e));
                    None
                }
            }
        } else {
            warn!("No package manifest template for {}", options.framework);
            None
        };

        Ok(GenerationOutcome {
            report,
            manifest,
            warnings,
        })
    }
}
