//! Project name and target directory checks.
//!
//! Project names follow npm package naming rules, since the name ends up in
//! the generated `package.json`.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Longest name npm accepts for a new package.
pub const MAX_NAME_LENGTH: usize = 214;

const RESERVED_NAMES: [&str; 2] = ["node_modules", "favicon.ico"];

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid project name '{name}': {}", .problems.join("; "))]
    InvalidName { name: String, problems: Vec<String> },

    #[error("Target directory {0:?} already exists and is not empty. Use --force to overwrite.")]
    TargetNotEmpty(PathBuf),

    #[error("Target path {0:?} exists and is not a directory")]
    NotADirectory(PathBuf),
}

fn scoped_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@([^/]+)/([^/]+)$").expect("valid scoped name regex"))
}

fn url_friendly_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9\-_.!~*'()]+$").expect("valid url regex"))
}

/// Check a project name against npm package naming rules.
pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    let problems = name_problems(name);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            name: name.to_string(),
            problems,
        })
    }
}

/// Every rule the name breaks, in a stable order.
pub fn name_problems(name: &str) -> Vec<String> {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
        return problems;
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }
    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        problems.push(format!("{} is a reserved name", name));
    }
    if name.len() > MAX_NAME_LENGTH {
        problems.push(format!(
            "name can no longer contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if name.to_lowercase() != name {
        problems.push("name can no longer contain capital letters".to_string());
    }

    let bare = name.rsplit('/').next().unwrap_or(name);
    if bare.contains(['~', '\'', '!', '(', ')', '*']) {
        problems.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    let url_friendly = match scoped_name_regex().captures(name) {
        Some(caps) => {
            url_friendly_regex().is_match(&caps[1]) && url_friendly_regex().is_match(&caps[2])
        }
        None => url_friendly_regex().is_match(name),
    };
    if !url_friendly {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    problems
}
