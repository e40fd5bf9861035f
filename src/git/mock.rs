use std::cell::RefCell;
use std::collections::HashSet;

use crate::error::{BumpError, Result};
use crate::git::{PushRequest, VersionControl};

/// A call recorded by [MockVcs].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    ConfigureIdentity { name: String, email: String },
    Commit { message: String },
    Fetch { remote: String },
    Checkout { branch: String },
    Tag { name: String },
    Push(PushRequest),
}

impl VcsCall {
    fn operation(&self) -> &'static str {
        match self {
            VcsCall::ConfigureIdentity { .. } => "configure_identity",
            VcsCall::Commit { .. } => "commit",
            VcsCall::Fetch { .. } => "fetch",
            VcsCall::Checkout { .. } => "checkout",
            VcsCall::Tag { .. } => "tag",
            VcsCall::Push(_) => "push",
        }
    }
}

/// Mock version control for testing without actual git operations
///
/// Every call is recorded, including failing ones.
#[derive(Default)]
pub struct MockVcs {
    calls: RefCell<Vec<VcsCall>>,
    failing: HashSet<&'static str>,
    failing_commits: HashSet<usize>,
}

impl MockVcs {
    /// Create a mock where every operation succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `operation` fail (`"commit"`, `"push"`, ...)
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Make only the `n`th commit (1-based) fail
    pub fn fail_commit(mut self, n: usize) -> Self {
        self.failing_commits.insert(n);
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: VcsCall) -> Result<()> {
        let operation = call.operation();
        let mut calls = self.calls.borrow_mut();
        calls.push(call);

        let commit_number = calls
            .iter()
            .filter(|c| matches!(c, VcsCall::Commit { .. }))
            .count();
        let failing_commit =
            operation == "commit" && self.failing_commits.contains(&commit_number);

        if self.failing.contains(operation) || failing_commit {
            return Err(BumpError::remote(format!("mock {} failure", operation)));
        }
        Ok(())
    }
}

impl VersionControl for MockVcs {
    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        self.record(VcsCall::ConfigureIdentity {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    fn commit_all(&self, message: &str) -> Result<String> {
        self.record(VcsCall::Commit {
            message: message.to_string(),
        })?;
        Ok(format!("{:040x}", self.calls.borrow().len()))
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        self.record(VcsCall::Fetch {
            remote: remote.to_string(),
        })
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.record(VcsCall::Checkout {
            branch: branch.to_string(),
        })
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(VcsCall::Tag {
            name: name.to_string(),
        })
    }

    fn push(&self, request: &PushRequest) -> Result<()> {
        self.record(VcsCall::Push(request.clone()))
    }
}
