//! GitHub Actions runtime context: environment, event payload and step outputs.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{BumpError, Result};

static REF_BRANCH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"refs/[a-zA-Z]+/(.*)").ok());

/// Values GitHub exposes to every step through `GITHUB_*` variables.
///
/// Empty variables are treated as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GithubContext {
    pub git_ref: Option<String>,
    pub head_ref: Option<String>,
    pub actor: Option<String>,
    pub token: Option<String>,
    pub repository: Option<String>,
    pub workspace: Option<PathBuf>,
    pub event_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

/// The branch the bump commit ends up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTarget {
    pub name: String,
    /// The run was triggered from a pull request, so the branch has to be fetched first.
    pub is_pull_request: bool,
}

#[derive(Debug, Deserialize)]
struct PushEvent {
    #[serde(default)]
    commits: Option<Vec<EventCommit>>,
}

#[derive(Debug, Deserialize)]
struct EventCommit {
    #[serde(default)]
    message: String,
    #[serde(default)]
    body: Option<String>,
}

impl GithubContext {
    /// Reads the context from the process environment.
    pub fn from_env() -> Self {
        GithubContext::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the context through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        GithubContext {
            git_ref: get("GITHUB_REF"),
            head_ref: get("GITHUB_HEAD_REF"),
            actor: get("GITHUB_ACTOR"),
            token: get("GITHUB_TOKEN"),
            repository: get("GITHUB_REPOSITORY"),
            workspace: get("GITHUB_WORKSPACE").map(PathBuf::from),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            output_path: get("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }

    /// Commit messages of the triggering event, `None` when it carries no commits.
    pub fn commit_messages(&self) -> Result<Option<Vec<String>>> {
        match &self.event_path {
            Some(path) => load_commit_messages(path),
            None => Ok(None),
        }
    }

    /// Decides which branch to check out and push.
    ///
    /// Priority, highest first:
    /// 1. `target_branch` from the action inputs
    /// 2. `GITHUB_HEAD_REF`, set on pull request runs
    /// 3. The name after `refs/<kind>/` in `GITHUB_REF`
    pub fn resolve_branch(&self, target_branch: Option<&str>) -> Result<BranchTarget> {
        let from_ref = self.git_ref.as_deref().and_then(|git_ref| {
            REF_BRANCH
                .as_ref()?
                .captures(git_ref)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().to_string())
        });

        let (mut name, is_pull_request) = match &self.head_ref {
            Some(head_ref) => (Some(head_ref.clone()), true),
            None => (from_ref, false),
        };

        if let Some(target) = target_branch.filter(|t| !t.is_empty()) {
            name = Some(target.to_string());
        }

        let name = name.ok_or_else(|| {
            BumpError::config("Cannot determine branch: GITHUB_REF is missing or malformed")
        })?;

        Ok(BranchTarget {
            name,
            is_pull_request,
        })
    }

    /// HTTPS URL of the repository on github.com.
    pub fn remote_url(&self) -> Result<String> {
        let repository = self
            .repository
            .as_deref()
            .ok_or_else(|| BumpError::config("GITHUB_REPOSITORY is not set"))?;
        Ok(format!("https://github.com/{}.git", repository))
    }

    /// Actor and token used to authenticate pushes, when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.actor.as_deref()?, self.token.as_deref()?))
    }

    /// Publishes a step output.
    ///
    /// Appends `name=value` to the `GITHUB_OUTPUT` file, or falls back to the
    /// legacy `::set-output` workflow command when that file is not provided.
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.output_path {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", name, value)?;
            }
            None => println!("::set-output name={}::{}", name, value),
        }
        Ok(())
    }
}

/// Reads commit messages from an event payload file.
pub fn load_commit_messages(path: &Path) -> Result<Option<Vec<String>>> {
    let payload = fs::read_to_string(path).map_err(|e| {
        BumpError::event(format!("Cannot read event file '{}': {}", path.display(), e))
    })?;
    parse_commit_messages(&payload)
}

/// Extracts commit messages from an event payload.
///
/// Each entry becomes `message + "\n" + body`, an absent body rendering as
/// empty. Returns `None` for events without a `commits` array.
pub fn parse_commit_messages(payload: &str) -> Result<Option<Vec<String>>> {
    let event: PushEvent = serde_json::from_str(payload)?;

    Ok(event.commits.map(|commits| {
        commits
            .into_iter()
            .map(|commit| format!("{}\n{}", commit.message, commit.body.unwrap_or_default()))
            .collect()
    }))
}
