//! Create command - Generate a new project from the template store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::{debug, info, warn};

use an_templates::{Framework, ProjectGenerator, ProjectOptions, QiankunMode, TemplateStore};

use crate::installer::{self, PackageManager};
use crate::validation::{self, ValidationError};

/// Project name meaning "generate into the current directory".
pub const CURRENT_DIR: &str = ".";

#[derive(Args)]
pub struct CreateArgs {
    /// Name of the project (also the directory to create). Use "." for the current directory
    pub project_name: String,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Options shared by `create` and `init`.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Framework to scaffold
    #[arg(long, value_enum, default_value_t = FrameworkArg::React)]
    pub framework: FrameworkArg,

    /// Framework major version (defaults to 18 for react, 3 for vue)
    #[arg(long = "framework-version")]
    pub framework_version: Option<String>,

    /// Generate TypeScript sources
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub typescript: bool,

    /// Include a router
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub router: bool,

    /// Enable qiankun micro-frontend integration as host or micro app
    #[arg(long, value_enum)]
    pub qiankun: Option<QiankunArg>,

    /// Read project options from a YAML or JSON file instead of flags
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generate even if the target directory is not empty
    #[arg(short, long)]
    pub force: bool,

    /// Do not install dependencies after generation
    #[arg(long)]
    pub skip_install: bool,

    /// Template store directory
    #[arg(long, env = "AN_TEMPLATES_DIR")]
    pub templates: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkArg {
    React,
    Vue,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::React => Framework::React,
            FrameworkArg::Vue => Framework::Vue,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QiankunArg {
    Main,
    Micro,
}

impl From<QiankunArg> for QiankunMode {
    fn from(arg: QiankunArg) -> Self {
        match arg {
            QiankunArg::Main => QiankunMode::Main,
            QiankunArg::Micro => QiankunMode::Micro,
        }
    }
}

impl ProjectArgs {
    /// Build the generation options, from the options file when one is given.
    pub fn project_options(&self) -> Result<ProjectOptions> {
        let options = match &self.config {
            Some(path) => {
                info!("Loading project options from {:?}", path);
                ProjectOptions::from_file(path)
                    .with_context(|| format!("Failed to load options file {:?}", path))?
            }
            None => {
                let framework = Framework::from(self.framework);
                let mut options = ProjectOptions::new(framework)
                    .typescript(self.typescript)
                    .router(self.router)
                    .with_qiankun(self.qiankun.map(QiankunMode::from));
                if let Some(version) = &self.framework_version {
                    options = options.version(version.clone());
                }
                options
            }
        };

        if !options
            .framework
            .supported_versions()
            .contains(&options.version.as_str())
        {
            warn!(
                "{} version '{}' is not one of the known versions ({})",
                options.framework,
                options.version,
                options.framework.supported_versions().join(", ")
            );
        }

        Ok(options)
    }
}

pub async fn execute(args: CreateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    if args.project_name == CURRENT_DIR {
        return run(&cwd, &args.project, true).await;
    }

    validation::validate_project_name(&args.project_name)?;
    let target = cwd.join(&args.project_name);
    run(&target, &args.project, false).await
}

/// Generate into `target`, install dependencies and print next steps.
///
/// `in_place` marks generation into the current directory, where the project
/// name is taken from the directory itself.
pub(crate) async fn run(target: &Path, args: &ProjectArgs, in_place: bool) -> Result<()> {
    let project_name = project_name_for(target)?;
    let options = args.project_options()?;

    ensure_target_available(target, args.force)?;

    let templates_dir = resolve_templates_dir(args.templates.as_deref());
    debug!("Using template store at {:?}", templates_dir);
    let generator = ProjectGenerator::new(TemplateStore::new(templates_dir));

    let outcome = generator
        .generate(target, &project_name, &options)
        .context("Failed to generate project from template")?;

    println!(
        "✅ Created {} project '{}' ({} files)",
        options.framework,
        project_name,
        outcome.report.file_count()
    );
    if !outcome.warnings.is_empty() {
        println!();
        println!("⚠️  Some template files could not be generated:");
        for warning in &outcome.warnings {
            println!("  - {}", warning);
        }
    }

    let package_manager = PackageManager::detect();
    if args.skip_install {
        info!("Skipping dependency installation");
    } else {
        println!();
        println!("📦 Installing dependencies with {}...", package_manager);
        installer::install(target, package_manager).await?;
        println!("✅ Dependencies installed");
    }

    println!();
    println!("Next steps:");
    let has_dev_script = outcome
        .manifest
        .as_ref()
        .is_some_and(|manifest| manifest.has_script("dev"));
    for step in next_steps(
        target,
        in_place,
        package_manager,
        args.skip_install,
        has_dev_script,
    ) {
        println!("  {}", step);
    }

    Ok(())
}

/// Project name used for rendering: the final component of the target path.
fn project_name_for(target: &Path) -> Result<String> {
    target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Cannot derive a project name from {:?}", target))
}

/// Refuse to generate into an existing, non-empty directory unless forced.
pub(crate) fn ensure_target_available(target: &Path, force: bool) -> Result<()> {
    if !target.exists() {
        return Ok(());
    }
    if !target.is_dir() {
        return Err(ValidationError::NotADirectory(target.to_path_buf()).into());
    }

    let non_empty = fs::read_dir(target)
        .with_context(|| format!("Failed to read target directory {:?}", target))?
        .next()
        .is_some();

    if non_empty {
        if !force {
            return Err(ValidationError::TargetNotEmpty(target.to_path_buf()).into());
        }
        warn!("Generating into non-empty directory {:?}", target);
    }

    Ok(())
}

/// Pick the template store: explicit path, then `./templates`, then the
/// store shipped next to the binary or the workspace.
pub(crate) fn resolve_templates_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let mut candidates = vec![PathBuf::from("templates")];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("templates"));
    }
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates"));

    candidates
        .iter()
        .find(|candidate| TemplateStore::new(candidate.as_path()).exists())
        .cloned()
        .unwrap_or_else(|| PathBuf::from("templates"))
}

fn next_steps(
    target: &Path,
    in_place: bool,
    package_manager: PackageManager,
    skipped_install: bool,
    has_dev_script: bool,
) -> Vec<String> {
    let mut steps = Vec::new();
    if !in_place {
        let dir = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.display().to_string());
        steps.push(format!("cd {}", dir));
    }
    if skipped_install {
        steps.push(package_manager.install_command());
    }
    if has_dev_script {
        steps.push(package_manager.dev_command());
    }
    steps
}
