//! Target path resolution for template store entries.
//!
//! The resolver handles:
//! - Template-variable rendering inside file and directory names
//! - Dropping entries whose rendered name is blank
//! - Stripping the `.hbs` marker from parameterized files
//! - Assigning the source extension expected by the selected framework

use std::path::{Component, Path, PathBuf};

use crate::context::RenderingContext;
use crate::error::{TemplateError, TemplateResult};
use crate::options::Framework;
use crate::renderer::{has_template_syntax, TemplateRenderer};

/// Suffix marking a file whose content goes through the renderer.
pub const TEMPLATE_SUFFIX: &str = ".hbs";

/// Outcome of resolving one template store file.
///
/// Target paths are relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Parameterized file, rendered into the target path
    Render(PathBuf),
    /// Static file, byte-copied to the target path
    Copy(PathBuf),
    /// The entry is dropped from the output
    Omit,
}

/// Resolves store-relative paths to output-relative paths.
pub struct FilenameResolver<'a> {
    renderer: &'a TemplateRenderer,
}

impl<'a> FilenameResolver<'a> {
    pub fn new(renderer: &'a TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Resolve a file entry.
    ///
    /// Static files keep their (rendered) name. Parameterized files lose the
    /// `.hbs` suffix and get a framework-specific extension where one applies.
    pub fn resolve_file(
        &self,
        relative: &Path,
        context: &RenderingContext,
    ) -> TemplateResult<Resolution> {
        let Some(mut segments) = self.render_segments(relative, context)? else {
            return Ok(Resolution::Omit);
        };

        let Some(name) = segments.pop() else {
            return Ok(Resolution::Omit);
        };
        let Some(stripped) = name.strip_suffix(TEMPLATE_SUFFIX) else {
            segments.push(name);
            return Ok(Resolution::Copy(to_path(&segments)));
        };
        if stripped.trim().is_empty() {
            return Ok(Resolution::Omit);
        }
        segments.push(stripped.to_string());

        let resolved = assign_extension(&segments.join("/"), context);
        Ok(Resolution::Render(to_path(&split(&resolved))))
    }

    /// Resolve a directory entry. Only name rendering applies; `None` drops
    /// the directory with everything below it.
    pub fn resolve_dir(
        &self,
        relative: &Path,
        context: &RenderingContext,
    ) -> TemplateResult<Option<PathBuf>> {
        Ok(self
            .render_segments(relative, context)?
            .map(|segments| to_path(&segments)))
    }

    /// Render every path component carrying template syntax.
    ///
    /// Returns `None` when a component renders blank. A component rendering
    /// to text with `/` expands into nested segments; `.` and `..` segments
    /// are rejected so output stays under the target root.
    fn render_segments(
        &self,
        relative: &Path,
        context: &RenderingContext,
    ) -> TemplateResult<Option<Vec<String>>> {
        let mut segments = Vec::new();

        for component in relative.components() {
            let Component::Normal(part) = component else {
                continue;
            };
            let part = part.to_string_lossy();

            if !has_template_syntax(&part) {
                segments.push(part.into_owned());
                continue;
            }

            let rendered = self.renderer.render(&part, context)?;
            if rendered.trim().is_empty() {
                return Ok(None);
            }
            let rendered_segments = split(&rendered);
            if rendered_segments.iter().any(|s| s == "." || s == "..") {
                return Err(TemplateError::UnsafePath(rendered));
            }
            segments.extend(rendered_segments);
        }

        Ok(Some(segments))
    }
}

/// Append the extension the framework expects for a stripped template path.
///
/// `path` is `/`-separated and relative to the framework's store root. Rules,
/// first match wins:
/// 1. anything under a `styles/` directory becomes `.scss`
/// 2. react: `App`, `index` and anything under `pages/` become `.tsx`/`.jsx`
/// 3. vue: `*.vue` stays as is; `main` and anything under `router/` become `.ts`/`.js`
///
/// Everything else, including unknown frameworks, is left unchanged.
pub fn assign_extension(path: &str, context: &RenderingContext) -> String {
    let Some(framework) = context.framework() else {
        return path.to_string();
    };

    let segments = split(path);
    let Some((name, dirs)) = segments.split_last() else {
        return path.to_string();
    };
    let under = |dir: &str| dirs.iter().any(|d| d == dir);
    let typescript = context.typescript();

    if under("styles") {
        return format!("{path}.scss");
    }

    match framework {
        Framework::React => {
            if name == "App" || name == "index" || under("pages") {
                let ext = if typescript { "tsx" } else { "jsx" };
                return format!("{path}.{ext}");
            }
        }
        Framework::Vue => {
            if name.ends_with(".vue") {
                return path.to_string();
            }
            if name == "main" || under("router") {
                let ext = if typescript { "ts" } else { "js" };
                return format!("{path}.{ext}");
            }
        }
    }

    path.to_string()
}

fn split(text: &str) -> Vec<String> {
    text.split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn to_path(segments: &[String]) -> PathBuf {
    segments.iter().collect()
}
