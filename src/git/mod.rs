//! Version-control abstraction layer
//!
//! The bump workflow only needs a handful of operations: set the committer,
//! commit tracked changes, fetch, switch branches, tag and push. They are
//! grouped in the [VersionControl] trait so the workflow can run against a
//! real repository or a recording mock.
//!
//! - [repository::Git2Vcs]: implementation on top of the `git2` crate
//! - [mock::MockVcs]: records calls and can be told to fail, for tests

pub mod mock;
pub mod repository;

pub use mock::{MockVcs, VcsCall};
pub use repository::Git2Vcs;

use crate::error::Result;

/// Remote used for fetching before a pull request checkout.
pub const DEFAULT_REMOTE: &str = "origin";

/// What to push and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    /// Remote URL to push to.
    pub url: String,
    /// Local branch pushed to the branch of the same name.
    pub branch: String,
    /// Tag pushed alongside the branch, if any.
    pub tag: Option<String>,
}

impl PushRequest {
    /// Refspecs for this push, branch first.
    pub fn refspecs(&self) -> Vec<String> {
        let mut refspecs = vec![format!("refs/heads/{0}:refs/heads/{0}", self.branch)];
        if let Some(tag) = &self.tag {
            refspecs.push(format!("refs/tags/{0}:refs/tags/{0}", tag));
        }
        refspecs
    }
}

/// Version-control operations used by the bump workflow.
///
/// All methods return [crate::error::Result]; implementations map their
/// underlying errors onto [crate::error::BumpError].
pub trait VersionControl {
    /// Writes `user.name` and `user.email` into the repository config.
    fn configure_identity(&self, name: &str, email: &str) -> Result<()>;

    /// Stages every modified tracked file and commits on the current HEAD.
    ///
    /// Returns the new commit id. Fails when nothing changed.
    fn commit_all(&self, message: &str) -> Result<String>;

    /// Fetches branches and tags from `remote`.
    fn fetch(&self, remote: &str) -> Result<()>;

    /// Switches to `branch`, creating it from `origin/<branch>` when only the
    /// remote-tracking branch exists.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Creates a lightweight tag on HEAD.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Pushes the branch and optional tag described by `request`.
    fn push(&self, request: &PushRequest) -> Result<()>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        (**self).configure_identity(name, email)
    }

    fn commit_all(&self, message: &str) -> Result<String> {
        (**self).commit_all(message)
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        (**self).fetch(remote)
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        (**self).checkout(branch)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        (**self).create_tag(name)
    }

    fn push(&self, request: &PushRequest) -> Result<()> {
        (**self).push(request)
    }
}
