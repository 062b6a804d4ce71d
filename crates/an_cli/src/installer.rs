//! Dependency installation through the invoking package manager.

use std::fmt;
use std::path::Path;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Environment variable npm, yarn and pnpm set for the processes they spawn.
pub const USER_AGENT_VAR: &str = "npm_config_user_agent";

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Failed to run {manager}: {source}. Install dependencies manually with `{hint}`")]
    Spawn {
        manager: PackageManager,
        hint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{manager} install failed ({status}): {stderr}. Install dependencies manually with `{hint}`")]
    Failed {
        manager: PackageManager,
        hint: String,
        status: String,
        stderr: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Detect the package manager that launched this process, defaulting to npm.
    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var(USER_AGENT_VAR).ok().as_deref())
    }

    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if ua.contains("yarn") => Self::Yarn,
            Some(ua) if ua.contains("pnpm") => Self::Pnpm,
            _ => Self::Npm,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Executable to spawn; Windows ships these as `.cmd` shims.
    fn program(&self) -> String {
        if cfg!(windows) {
            format!("{}.cmd", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }

    pub fn dev_command(&self) -> String {
        match self {
            Self::Npm => "npm run dev".to_string(),
            Self::Yarn => "yarn dev".to_string(),
            Self::Pnpm => "pnpm dev".to_string(),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run `<manager> install` in the project directory.
pub async fn install(project_dir: &Path, manager: PackageManager) -> Result<(), InstallError> {
    let hint = format!("cd {} && {}", project_dir.display(), manager.install_command());
    info!("Running {} in {:?}", manager.install_command(), project_dir);

    let output = Command::new(manager.program())
        .arg("install")
        .current_dir(project_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| InstallError::Spawn {
            manager,
            hint: hint.clone(),
            source,
        })?;

    debug!(
        "{} install output: {}",
        manager,
        String::from_utf8_lossy(&output.stdout).trim()
    );

    if !output.status.success() {
        return Err(InstallError::Failed {
            manager,
            hint,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_user_agent() {
        assert_eq!(
            PackageManager::from_user_agent(Some("yarn/1.22.19 npm/? node/v18.17.0 darwin x64")),
            PackageManager::Yarn
        );
        assert_eq!(
            PackageManager::from_user_agent(Some("pnpm/8.6.0 npm/? node/v18.17.0 linux x64")),
            PackageManager::Pnpm
        );
        assert_eq!(
            PackageManager::from_user_agent(Some("npm/9.6.7 node/v18.17.0 linux x64")),
            PackageManager::Npm
        );
        assert_eq!(PackageManager::from_user_agent(None), PackageManager::Npm);
        assert_eq!(
            PackageManager::from_user_agent(Some("node/v20.10.0 corepack yarn/4.0.2")),
            PackageManager::Yarn
        );
        assert_eq!(
            PackageManager::from_user_agent(Some("corepack pnpm/8.15.1 node/v20.10.0")),
            PackageManager::Pnpm
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(PackageManager::Npm.dev_command(), "npm run dev");
        assert_eq!(PackageManager::Yarn.dev_command(), "yarn dev");
        assert_eq!(PackageManager::Pnpm.install_command(), "pnpm install");
    }

    #[tokio::test]
    async fn test_install_in_missing_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        let result = install(&temp.path().join("missing"), PackageManager::Npm).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("npm install"));
    }
}
