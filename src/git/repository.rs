use std::cell::Cell;
use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{BranchType, Cred, CredentialType, RemoteCallbacks, Repository};

use crate::error::{BumpError, Result};
use crate::git::{PushRequest, VersionControl, DEFAULT_REMOTE};

/// [VersionControl] backed by a `git2` repository.
pub struct Git2Vcs {
    repo: Repository,
    credentials: Option<(String, String)>,
}

impl Git2Vcs {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2Vcs::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2Vcs {
            repo,
            credentials: None,
        }
    }

    /// Authenticate fetches and pushes with a username and token.
    pub fn with_credentials(mut self, username: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), token.into()));
        self
    }

    fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        let credentials = self.credentials.as_ref();
        let attempts = Cell::new(0u8);

        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            // libgit2 keeps asking while credentials are rejected.
            attempts.set(attempts.get() + 1);
            if attempts.get() > 1 {
                return Err(git2::Error::from_str("authentication rejected by remote"));
            }

            match credentials {
                Some((username, token))
                    if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) =>
                {
                    Cred::userpass_plaintext(username, token)
                }
                _ if allowed_types.contains(CredentialType::SSH_KEY) => {
                    Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                }
                _ => Cred::default(),
            }
        });

        callbacks
    }
}

impl VersionControl for Git2Vcs {
    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        let mut config = self.repo.config()?;
        config.set_str("user.name", name)?;
        config.set_str("user.email", email)?;
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let parent = self.repo.head()?.peel_to_commit()?;
        if parent.tree_id() == tree_id {
            return Err(BumpError::Git(git2::Error::from_str(
                "nothing to commit, working tree clean",
            )));
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;

        Ok(oid.to_string())
    }

    fn fetch(&self, remote_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| BumpError::remote(format!("Remote '{}' not found", remote_name)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(self.remote_callbacks());

        // All remote branches into remote-tracking refs, plus all tags.
        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        let refspecs = &[refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];
        remote
            .fetch(refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                BumpError::remote(format!("Failed to fetch from remote '{}': {}", remote_name, e))
            })?;

        Ok(())
    }

    fn checkout(&self, branch_name: &str) -> Result<()> {
        let branch = match self.repo.find_branch(branch_name, BranchType::Local) {
            Ok(branch) => branch,
            Err(_) => {
                // Local branch doesn't exist, create it from the remote-tracking one
                let tracking = format!("refs/remotes/{}/{}", DEFAULT_REMOTE, branch_name);
                let remote_commit = self
                    .repo
                    .find_reference(&tracking)
                    .and_then(|reference| reference.peel_to_commit())
                    .map_err(|e| {
                        BumpError::remote(format!(
                            "Cannot find branch '{}' locally or on {}: {}",
                            branch_name, DEFAULT_REMOTE, e
                        ))
                    })?;
                self.repo.branch(branch_name, &remote_commit, false)?
            }
        };

        let reference = branch.into_reference();
        let ref_name = reference
            .name()
            .ok_or_else(|| BumpError::remote(format!("Branch '{}' has an invalid name", branch_name)))?
            .to_string();
        let target = reference.peel_to_commit()?;

        self.repo
            .checkout_tree(target.as_object(), Some(CheckoutBuilder::new().safe()))?;
        self.repo.set_head(&ref_name)?;

        Ok(())
    }

    fn create_tag(&self, tag_name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .tag_lightweight(tag_name, head.as_object(), false)?;
        Ok(())
    }

    fn push(&self, request: &PushRequest) -> Result<()> {
        let mut remote = self.repo.remote_anonymous(&request.url)?;

        let mut callbacks = self.remote_callbacks();
        // Rejected ref updates are reported here rather than as a push error.
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspecs = request.refspecs();
        match remote.push(&refspecs, Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.class() == git2::ErrorClass::Net {
                    Err(BumpError::remote(format!("Network error during push: {}", e)))
                } else if e.class() == git2::ErrorClass::Reference {
                    Err(BumpError::remote(format!("Reference error during push: {}", e)))
                } else {
                    Err(BumpError::remote(format!(
                        "Failed to push '{}': {}",
                        request.branch, e
                    )))
                }
            }
        }
    }
}
