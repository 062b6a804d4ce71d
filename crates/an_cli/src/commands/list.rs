//! List command - Show frameworks available in the template store.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::warn;

use an_templates::TemplateStore;

use super::create::resolve_templates_dir;

#[derive(Args)]
pub struct ListArgs {
    /// Template store directory
    #[arg(long, env = "AN_TEMPLATES_DIR")]
    pub templates: Option<PathBuf>,
}

pub async fn execute(args: ListArgs) -> Result<()> {
    let store = TemplateStore::new(resolve_templates_dir(args.templates.as_deref()));

    for name in store.unknown_entries() {
        warn!("Ignoring unknown template directory '{}'", name);
    }

    let lines = framework_lines(&store);
    if lines.is_empty() {
        anyhow::bail!("No templates found in {:?}", store.root());
    }

    println!("📋 Available frameworks ({}):", store.root().display());
    println!();
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

fn framework_lines(store: &TemplateStore) -> Vec<String> {
    store
        .frameworks()
        .into_iter()
        .map(|framework| {
            format!(
                "  {:<8} versions: {} (default {})",
                framework.as_str(),
                framework.supported_versions().join(", "),
                framework.default_version()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_framework_lines() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("react")).unwrap();
        fs::create_dir_all(temp.path().join("vue")).unwrap();

        let lines = framework_lines(&TemplateStore::new(temp.path()));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("react"));
        assert!(lines[0].contains("default 18"));
        assert!(lines[1].contains("3, 2"));
    }

    #[tokio::test]
    async fn test_list_empty_store_fails() {
        let temp = tempdir().unwrap();
        let args = ListArgs {
            templates: Some(temp.path().to_path_buf()),
        };
        let err = execute(args).await.unwrap_err();
        assert!(err.to_string().contains("No templates found"));
    }
}
