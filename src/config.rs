use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BumpError, Result};
use crate::version::VersionBump;

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "gradlebump.toml";

/// Represents the complete configuration for gradle-version-bump.
///
/// Loaded from an optional TOML file, then overlaid with the action inputs
/// that GitHub passes in as `INPUT_*` environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_gradle_path")]
    pub gradle_path: String,

    #[serde(default)]
    pub tag_prefix: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Bump applied when no wording matches; empty disables it.
    #[serde(default = "default_bump")]
    pub default_bump: String,

    #[serde(default)]
    pub preid: Option<String>,

    #[serde(default)]
    pub wording: WordingConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub identity: IdentityConfig,
}

fn default_gradle_path() -> String {
    "app/build.gradle".to_string()
}

fn default_commit_message() -> String {
    "android ci: version bump to {{version}}".to_string()
}

fn default_bump() -> String {
    "patch".to_string()
}

fn default_major_words() -> Vec<String> {
    vec![
        "MAJOR".to_string(),
        "major".to_string(),
        "breaking change".to_string(),
    ]
}

fn default_minor_words() -> Vec<String> {
    vec![
        "feat".to_string(),
        "minor".to_string(),
        "feature".to_string(),
    ]
}

fn default_prerelease_words() -> Vec<String> {
    vec![
        "pre-alpha".to_string(),
        "pre-beta".to_string(),
        "pre-rc".to_string(),
    ]
}

/// Word lists searched for in commit messages, one list per bump type.
///
/// Matching is a case-sensitive substring search. Patch words are optional:
/// without them a patch bump only happens through `default_bump`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WordingConfig {
    #[serde(default = "default_major_words")]
    pub major: Vec<String>,

    #[serde(default = "default_minor_words")]
    pub minor: Vec<String>,

    #[serde(default)]
    pub patch: Option<Vec<String>>,

    #[serde(default = "default_prerelease_words")]
    pub prerelease: Vec<String>,
}

impl Default for WordingConfig {
    fn default() -> Self {
        WordingConfig {
            major: default_major_words(),
            minor: default_minor_words(),
            patch: None,
            prerelease: default_prerelease_words(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Controls which version-control steps run after the build file is updated.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default = "default_true")]
    pub push: bool,

    #[serde(default)]
    pub skip_tag: bool,

    #[serde(default)]
    pub target_branch: Option<String>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            push: true,
            skip_tag: false,
            target_branch: None,
        }
    }
}

fn default_identity_name() -> String {
    "Autobump android version".to_string()
}

fn default_identity_email() -> String {
    "gh-action-bump--android-version@users.noreply.github.com".to_string()
}

/// Committer identity written to the repository config before committing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_name")]
    pub name: String,

    #[serde(default = "default_identity_email")]
    pub email: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            name: default_identity_name(),
            email: default_identity_email(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gradle_path: default_gradle_path(),
            tag_prefix: String::new(),
            commit_message: default_commit_message(),
            default_bump: default_bump(),
            preid: None,
            wording: WordingConfig::default(),
            behavior: BehaviorConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

/// Splits a comma separated input into words, dropping blanks.
///
/// An empty word would match every commit message, so it is never kept.
pub fn split_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Overlays action inputs read through `lookup`.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`. Empty values leave the
    /// configured value in place, except `INPUT_DEFAULT` and `INPUT_PATCH-WORDING`
    /// where an empty value switches the feature off.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = non_empty("INPUT_GRADLE_PATH") {
            self.gradle_path = path;
        }
        if let Some(prefix) = lookup("INPUT_TAG-PREFIX") {
            self.tag_prefix = prefix;
        }
        if let Some(message) = non_empty("INPUT_COMMIT-MESSAGE") {
            self.commit_message = message;
        }
        if let Some(bump) = lookup("INPUT_DEFAULT") {
            self.default_bump = bump.trim().to_string();
        }
        if let Some(preid) = lookup("INPUT_PREID") {
            let preid = preid.trim();
            self.preid = (!preid.is_empty()).then(|| preid.to_string());
        }

        if let Some(words) = non_empty("INPUT_MAJOR-WORDING") {
            self.wording.major = split_words(&words);
        }
        if let Some(words) = non_empty("INPUT_MINOR-WORDING") {
            self.wording.minor = split_words(&words);
        }
        if let Some(words) = lookup("INPUT_PATCH-WORDING") {
            let words = split_words(&words);
            self.wording.patch = (!words.is_empty()).then_some(words);
        }
        if let Some(words) = non_empty("INPUT_RC-WORDING") {
            self.wording.prerelease = split_words(&words);
        }

        if let Some(push) = lookup("INPUT_PUSH") {
            self.behavior.push = push.trim() != "false";
        }
        if let Some(skip_tag) = lookup("INPUT_SKIP-TAG") {
            self.behavior.skip_tag = skip_tag.trim() == "true";
        }
        if let Some(branch) = non_empty("INPUT_TARGET-BRANCH") {
            self.behavior.target_branch = Some(branch);
        }

        if let Some(name) = non_empty("GITHUB_USER") {
            self.identity.name = name;
        }
        if let Some(email) = non_empty("GITHUB_EMAIL") {
            self.identity.email = email;
        }

        // Surface a bad INPUT_DEFAULT now rather than after commits are read.
        self.default_bump()?;
        Ok(())
    }

    /// The bump applied when no wording matches, if any.
    pub fn default_bump(&self) -> Result<Option<VersionBump>> {
        if self.default_bump.trim().is_empty() {
            return Ok(None);
        }
        self.default_bump.parse().map(Some)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gradlebump.toml` in current directory
/// 3. `.gradlebump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = format!("./{}", CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(&local).exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| BumpError::config(format!("Invalid configuration file: {}", e)))?;
    Ok(config)
}
