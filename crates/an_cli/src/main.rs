//! an CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 4: Template error
//! - 6: Dependency install error

use std::process::ExitCode;

use an_templates::TemplateError;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod installer;
mod validation;

use commands::{Cli, Commands};
use installer::InstallError;
use validation::ValidationError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const INSTALL_ERROR: u8 = 6;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (crate_level, default_level) = if cli.verbose {
        ("an=debug", "info")
    } else if cli.quiet {
        ("an=error", "error")
    } else {
        ("an=info", "warn")
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in [crate_level, default_level] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logging may already be initialized; keep going either way
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Create(args) => commands::create::execute(args).await,
        Commands::Init(args) => commands::init::execute(args).await,
        Commands::List(args) => commands::list::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<InstallError>().is_some() {
        return ExitCodes::INSTALL_ERROR;
    }
    if e.downcast_ref::<ValidationError>().is_some() {
        return ExitCodes::INVALID_ARGS;
    }
    match e.downcast_ref::<TemplateError>() {
        Some(TemplateError::InvalidOptions(_)) => return ExitCodes::INVALID_ARGS,
        Some(_) => return ExitCodes::TEMPLATE_ERROR,
        None => {}
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("template") {
        ExitCodes::TEMPLATE_ERROR
    } else if msg.contains("argument") || msg.contains("option") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_categorize_template_error() {
        let err = Err::<(), _>(TemplateError::NotFound(PathBuf::from("templates/vue")))
            .context("Failed to generate project")
            .unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::TEMPLATE_ERROR);
    }

    #[test]
    fn test_categorize_invalid_options() {
        let err = anyhow::Error::new(TemplateError::InvalidOptions("qiankun".into()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_validation_error() {
        let err = anyhow::Error::new(ValidationError::InvalidName {
            name: "My App".into(),
            problems: vec!["name can no longer contain capital letters".into()],
        });
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_general_error() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }
}
