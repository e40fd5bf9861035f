use std::fmt;

/// Non-fatal conditions met while bumping.
/// The run continues, but they should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The triggering event carried no commits, so only the default bump can apply
    NoCommitsInEvent,
    /// Committing again after checking out the target branch failed
    ///
    /// Expected with `actions/checkout@v2` and later, where the first commit
    /// already sits on the branch.
    BranchCommitSkipped { branch: String, reason: String },
    /// The new versionCode does not exceed the one already in the build file
    VersionCodeNotIncreasing { current: u64, next: u32 },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoCommitsInEvent => {
                write!(
                    f,
                    "Couldn't find any commits in this event, falling back to the default bump"
                )
            }
            BoundaryWarning::BranchCommitSkipped { branch, reason } => {
                write!(
                    f,
                    "Commit on branch '{}' skipped ({}); fine unless you use actions/checkout@v1",
                    branch, reason
                )
            }
            BoundaryWarning::VersionCodeNotIncreasing { current, next } => {
                write!(
                    f,
                    "New versionCode {} is not greater than the current {}; stores may reject the build",
                    next, current
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_commits_display() {
        let msg = BoundaryWarning::NoCommitsInEvent.to_string();
        assert!(msg.contains("Couldn't find any commits"));
    }

    #[test]
    fn test_branch_commit_skipped_display() {
        let warning = BoundaryWarning::BranchCommitSkipped {
            branch: "main".to_string(),
            reason: "nothing to commit".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("'main'"));
        assert!(msg.contains("nothing to commit"));
    }

    #[test]
    fn test_version_code_not_increasing_display() {
        let warning = BoundaryWarning::VersionCodeNotIncreasing {
            current: 2_000_000,
            next: 10300,
        };
        let msg = warning.to_string();
        assert!(msg.contains("10300"));
        assert!(msg.contains("2000000"));
    }
}
