//! CLI command definitions.
//!
//! Each subcommand maps to one scaffolding workflow.

use clap::{Parser, Subcommand};

pub mod create;
pub mod init;
pub mod list;

/// an - front-end project scaffolder
#[derive(Parser)]
#[command(name = "an")]
#[command(version, about = "an - scaffold React and Vue projects from templates")]
#[command(long_about = r#"
an creates React or Vue projects from a template store, with optional
TypeScript, router and qiankun micro-frontend integration, then installs
their dependencies with the package manager that invoked it.

COMMANDS:
  create <name>  → Create a project in a new directory
  init           → Create a project in the current directory
  list           → Show the frameworks available in the template store

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  4 - Template error
  6 - Dependency install error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project from a template
    Create(create::CreateArgs),

    /// Create a project in the current directory
    Init(init::InitArgs),

    /// List available frameworks
    List(list::ListArgs),
}
