//! # an_templates
//!
//! Template materialization engine for the `an` project scaffolder.
//!
//! A template store holds one directory tree per framework. Files ending in
//! `.hbs` are rendered with Handlebars; everything else is copied byte for
//! byte. Rendering covers:
//!
//! - Template variables in file and directory names
//! - Framework-specific source extensions (`.tsx`/`.jsx`, `.ts`/`.js`, `.scss`)
//! - Dropping templates whose whole body is guarded by a falsy flag
//! - Per-file error isolation with a structured report
//!
//! ## Example
//!
//! ```rust,no_run
//! use an_templates::{Framework, ProjectGenerator, ProjectOptions, TemplateStore};
//! use std::path::Path;
//!
//! let generator = ProjectGenerator::new(TemplateStore::new("templates"));
//! let options = ProjectOptions::new(Framework::Vue).version("3").typescript(true);
//!
//! let outcome = generator.generate(Path::new("./my-app"), "my-app", &options).unwrap();
//! assert!(outcome.report.is_complete());
//! ```

pub mod context;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod materializer;
pub mod options;
pub mod renderer;
pub mod resolver;
pub mod skip;
pub mod store;

pub use context::RenderingContext;
pub use error::{TemplateError, TemplateResult};
pub use generator::{GenerationOutcome, ProjectGenerator};
pub use manifest::PackageManifest;
pub use materializer::{FailedEntry, MaterializeReport, Materializer};
pub use options::{Framework, ProjectOptions, QiankunMode};
pub use renderer::TemplateRenderer;
pub use resolver::{assign_extension, FilenameResolver, Resolution, TEMPLATE_SUFFIX};
pub use skip::should_skip;
pub use store::TemplateStore;
