//! Template tree materialization.
//!
//! Walks a framework's template store depth-first in file-name order and
//! writes the output tree. A failure on one entry is logged and recorded in
//! the report; the walk carries on with the remaining entries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::context::RenderingContext;
use crate::error::{TemplateError, TemplateResult};
use crate::renderer::TemplateRenderer;
use crate::resolver::{FilenameResolver, Resolution};
use crate::skip::should_skip;

/// An entry that could not be materialized.
#[derive(Debug, Clone)]
pub struct FailedEntry {
    /// Path relative to the template root
    pub path: PathBuf,
    pub error: String,
}

/// What a materialization run did, entry by entry.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Parameterized files rendered, as target-relative paths
    pub rendered: Vec<PathBuf>,
    /// Static files copied, as target-relative paths
    pub copied: Vec<PathBuf>,
    /// Templates dropped by the whole-file conditional check (source-relative)
    pub skipped: Vec<PathBuf>,
    /// Entries whose rendered name was blank (source-relative)
    pub omitted: Vec<PathBuf>,
    /// Entries that failed
    pub failed: Vec<FailedEntry>,
}

impl MaterializeReport {
    /// True when no entry failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files written to the target.
    pub fn file_count(&self) -> usize {
        self.rendered.len() + self.copied.len()
    }

    /// Whether a target-relative path was written.
    pub fn wrote(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.rendered.iter().chain(&self.copied).any(|p| p == path)
    }

    fn record_failure(&mut self, path: &Path, err: &TemplateError) {
        error!("Error processing {:?}: {}", path, err);
        self.failed.push(FailedEntry {
            path: path.to_path_buf(),
            error: err.to_string(),
        });
    }
}

enum FileOutcome {
    Rendered(PathBuf),
    Copied(PathBuf),
    Skipped,
    Omitted,
}

/// Produces an output tree from a template store.
pub struct Materializer {
    renderer: TemplateRenderer,
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Materializer {
    /// Create a materializer with a fresh renderer.
    pub fn new() -> Self {
        Self::with_renderer(TemplateRenderer::new())
    }

    pub fn with_renderer(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Materialize `template_root` into `target_root`.
    ///
    /// Only an unreadable template root or an uncreatable target root fail
    /// the whole run. Existing files in the target are overwritten.
    pub fn materialize(
        &self,
        template_root: &Path,
        target_root: &Path,
        context: &RenderingContext,
    ) -> TemplateResult<MaterializeReport> {
        check_store_root(template_root)?;
        fs::create_dir_all(target_root).map_err(|source| TemplateError::TargetCreation {
            path: target_root.to_path_buf(),
            source,
        })?;

        info!("Materializing {:?} into {:?}", template_root, target_root);

        let resolver = FilenameResolver::new(&self.renderer);
        let mut report = MaterializeReport::default();
        let mut walker = WalkDir::new(template_root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .and_then(|p| p.strip_prefix(template_root).ok())
                        .map(Path::to_path_buf)
                        .unwrap_or_default();
                    report.record_failure(&path, &TemplateError::Walk(err));
                    continue;
                }
            };

            let Ok(relative) = entry.path().strip_prefix(template_root) else {
                continue;
            };

            if entry.file_type().is_dir() {
                match resolver.resolve_dir(relative, context) {
                    Ok(Some(dir)) => {
                        if let Err(err) = fs::create_dir_all(target_root.join(&dir)) {
                            report.record_failure(relative, &TemplateError::Io(err));
                        }
                    }
                    Ok(None) => {
                        debug!("Omitted directory: {:?}", relative);
                        report.omitted.push(relative.to_path_buf());
                        walker.skip_current_dir();
                    }
                    Err(err) => {
                        report.record_failure(relative, &err);
                        walker.skip_current_dir();
                    }
                }
                continue;
            }

            match self.process_file(&resolver, entry.path(), relative, target_root, context) {
                Ok(FileOutcome::Rendered(path)) => report.rendered.push(path),
                Ok(FileOutcome::Copied(path)) => report.copied.push(path),
                Ok(FileOutcome::Skipped) => report.skipped.push(relative.to_path_buf()),
                Ok(FileOutcome::Omitted) => report.omitted.push(relative.to_path_buf()),
                Err(err) => report.record_failure(relative, &err),
            }
        }

        info!(
            "Materialized {} files ({} rendered, {} copied, {} skipped, {} failed)",
            report.file_count(),
            report.rendered.len(),
            report.copied.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn process_file(
        &self,
        resolver: &FilenameResolver<'_>,
        source: &Path,
        relative: &Path,
        target_root: &Path,
        context: &RenderingContext,
    ) -> TemplateResult<FileOutcome> {
        match resolver.resolve_file(relative, context)? {
            Resolution::Omit => {
                debug!("Omitted: {:?}", relative);
                Ok(FileOutcome::Omitted)
            }
            Resolution::Render(resolved) => {
                let raw = fs::read_to_string(source)?;
                if should_skip(&raw, context) {
                    debug!("Skipped: {:?}", relative);
                    return Ok(FileOutcome::Skipped);
                }

                let rendered = self.renderer.render(&raw, context)?;
                let target = target_root.join(&resolved);
                ensure_parent(&target)?;
                fs::write(&target, rendered)?;
                debug!("Rendered: {:?}", resolved);
                Ok(FileOutcome::Rendered(resolved))
            }
            Resolution::Copy(resolved) => {
                let target = target_root.join(&resolved);
                ensure_parent(&target)?;
                fs::copy(source, &target)?;
                debug!("Copied: {:?}", resolved);
                Ok(FileOutcome::Copied(resolved))
            }
        }
    }
}

fn check_store_root(root: &Path) -> TemplateResult<()> {
    let unreadable = |source| TemplateError::StoreUnreadable {
        path: root.to_path_buf(),
        source,
    };

    if !root.exists() {
        return Err(TemplateError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(unreadable(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    fs::read_dir(root).map_err(unreadable)?;
    Ok(())
}

fn ensure_parent(target: &Path) -> io::Result<()> {
    match target.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Framework, ProjectOptions};
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn vue_context() -> RenderingContext {
        RenderingContext::build("demo", &ProjectOptions::new(Framework::Vue).router(false))
    }

    #[test]
    fn test_empty_store() {
        let store = tempdir().unwrap();
        let target = tempdir().unwrap();
        let out = target.path().join("app");

        let report = Materializer::new()
            .materialize(store.path(), &out, &vue_context())
            .unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
        assert_eq!(report.file_count(), 0);
        assert!(report.is_complete());
    }

    #[test]
    fn test_missing_store_is_fatal() {
        let target = tempdir().unwrap();
        let result = Materializer::new().materialize(
            &target.path().join("nope"),
            target.path(),
            &vue_context(),
        );
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_store_root_file_is_fatal() {
        let store = tempdir().unwrap();
        write(store.path(), "file.txt", "x");
        let result = Materializer::new().materialize(
            &store.path().join("file.txt"),
            &store.path().join("out"),
            &vue_context(),
        );
        assert!(matches!(result, Err(TemplateError::StoreUnreadable { .. })));
    }

    #[test]
    fn test_uncreatable_target_is_fatal() {
        let store = tempdir().unwrap();
        write(store.path(), "blocker", "x");
        let result = Materializer::new().materialize(
            store.path(),
            &store.path().join("blocker").join("out"),
            &vue_context(),
        );
        assert!(matches!(result, Err(TemplateError::TargetCreation { .. })));
    }

    #[test]
    fn test_render_copy_skip() {
        let store = tempdir().unwrap();
        let target = tempdir().unwrap();
        write(store.path(), "README.md.hbs", "# {{projectName}}\n");
        write(store.path(), "public/logo.svg", "<svg/>");
        write(store.path(), "src/router/index.hbs", "{{#if router}}routes{{/if}}\n");

        let report = Materializer::new()
            .materialize(store.path(), target.path(), &vue_context())
            .unwrap();

        assert_eq!(report.rendered, vec![PathBuf::from("README.md")]);
        assert_eq!(report.copied, vec![PathBuf::from("public/logo.svg")]);
        assert_eq!(report.skipped, vec![PathBuf::from("src/router/index.hbs")]);
        assert_eq!(
            fs::read_to_string(target.path().join("README.md")).unwrap(),
            "# demo\n"
        );
        assert!(!target.path().join("src/router/index.js").exists());
        assert!(!target.path().join("src/router/index.ts").exists());
        // the directory itself is still created
        assert!(target.path().join("src/router").is_dir());
    }

    #[test]
    fn test_render_error_does_not_abort() {
        let store = tempdir().unwrap();
        let target = tempdir().unwrap();
        write(store.path(), "a.txt.hbs", "{{#if router}}never closed");
        write(store.path(), "b.txt.hbs", "ok {{framework}}");

        let report = Materializer::new()
            .materialize(store.path(), target.path(), &vue_context())
            .unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, PathBuf::from("a.txt.hbs"));
        assert!(!target.path().join("a.txt").exists());
        assert_eq!(fs::read_to_string(target.path().join("b.txt")).unwrap(), "ok vue");
    }

    #[test]
    fn test_rendered_name_cannot_leave_target() {
        let store = tempdir().unwrap();
        let out = tempdir().unwrap();
        let target = out.path().join("app");
        write(store.path(), "{{version}}.txt.hbs", "{{projectName}}");
        write(store.path(), "keep.txt", "static");
        let options = ProjectOptions::new(Framework::Vue).version("../escaped");
        let context = RenderingContext::build("demo", &options);

        let report = Materializer::new()
            .materialize(store.path(), &target, &context)
            .unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, PathBuf::from("{{version}}.txt.hbs"));
        assert!(!out.path().join("escaped.txt").exists());
        assert!(target.join("keep.txt").is_file());
    }

    #[test]
    fn test_omitted_directory_subtree() {
        let store = tempdir().unwrap();
        let target = tempdir().unwrap();
        write(store.path(), "{{qiankunMode}}/entry.js", "x");
        write(store.path(), "kept.js", "y");

        let report = Materializer::new()
            .materialize(store.path(), target.path(), &vue_context())
            .unwrap();

        assert_eq!(report.omitted, vec![PathBuf::from("{{qiankunMode}}")]);
        assert_eq!(report.copied, vec![PathBuf::from("kept.js")]);
        assert_eq!(fs::read_dir(target.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_overwrites_existing_files() {
        let store = tempdir().unwrap();
        let target = tempdir().unwrap();
        write(store.path(), "main.hbs", "new");
        write(target.path(), "main.ts", "old");

        Materializer::new()
            .materialize(store.path(), target.path(), &vue_context())
            .unwrap();

        assert_eq!(fs::read_to_string(target.path().join("main.ts")).unwrap(), "new");
    }
}
