//! Reading and patching `versionName` / `versionCode` in a Gradle build file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BumpError, Result};

static VERSION_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"versionName "([^"]*)""#).ok());

static VERSION_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"versionCode ([0-9]+)").ok());

/// Version fields found in a build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVersion {
    /// Value between the quotes of `versionName "..."`.
    pub name: String,
    /// Value of `versionCode N`.
    pub code: u64,
    name_literal: String,
    code_literal: String,
}

/// A Gradle build file held in memory.
#[derive(Debug, Clone)]
pub struct BuildFile {
    path: PathBuf,
    content: String,
}

impl BuildFile {
    /// Reads the build file at `path`.
    ///
    /// # Returns
    /// * `Ok(BuildFile)` - File contents loaded
    /// * `Err` - If the file does not exist or cannot be read
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BumpError::build_file(format!(
                "GRADLE_PATH is invalid, no file found at '{}'",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        Ok(BuildFile::from_content(path, content))
    }

    /// Wraps already loaded content.
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        BuildFile {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Extracts the first `versionName "..."` and `versionCode N` in the file.
    pub fn current(&self) -> Result<BuildVersion> {
        let name_captures = VERSION_NAME
            .as_ref()
            .and_then(|re| re.captures(&self.content))
            .ok_or_else(|| {
                BumpError::build_file(format!(
                    "No versionName \"...\" entry in '{}'",
                    self.path.display()
                ))
            })?;
        let code_captures = VERSION_CODE
            .as_ref()
            .and_then(|re| re.captures(&self.content))
            .ok_or_else(|| {
                BumpError::build_file(format!(
                    "No versionCode entry in '{}'",
                    self.path.display()
                ))
            })?;

        let code_digits = &code_captures[1];
        let code = code_digits.parse::<u64>().map_err(|e| {
            BumpError::build_file(format!("versionCode '{}' is not a number: {}", code_digits, e))
        })?;

        Ok(BuildVersion {
            name: name_captures[1].to_string(),
            code,
            name_literal: name_captures[0].to_string(),
            code_literal: code_captures[0].to_string(),
        })
    }

    /// Returns the content with the current version entries replaced.
    ///
    /// Only the first occurrence of each entry changes, the same one
    /// [`BuildFile::current`] reports.
    pub fn apply(&self, current: &BuildVersion, name: &str, code: u64) -> String {
        self.content
            .replacen(&current.name_literal, &format!("versionName \"{}\"", name), 1)
            .replacen(&current.code_literal, &format!("versionCode {}", code), 1)
    }

    /// Writes `content` to the build file on disk.
    pub fn write(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content)?;
        Ok(())
    }
}
