//! Init command - Generate a project into the current directory.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::create::{self, ProjectArgs};

#[derive(Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub async fn execute(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    info!("Initializing project in {:?}", cwd);

    create::run(&cwd, &args.project, true).await
}
