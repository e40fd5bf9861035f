//! Main bump workflow
//!
//! Runs the whole sequence: read the build file, decide the bump from the
//! event's commit messages, compute the new `versionName` / `versionCode`,
//! write them back, then commit, tag and push. Version control is reached
//! through [VersionControl] only, and the repository is opened lazily so
//! dry runs and local-only runs work outside a git checkout.

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::conventional::{determine_version_bump, is_previous_bump, render_commit_message};
use crate::error::{BumpError, Result};
use crate::git::{PushRequest, VersionControl, DEFAULT_REMOTE};
use crate::github::GithubContext;
use crate::gradle::BuildFile;
use crate::ui;
use crate::version::{bump_version, clean_version, VersionBump};
use crate::version_code::VersionCode;

/// Why a run finished without bumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The event already contains a bump commit.
    PreviousBump,
    /// No wording matched and there is no default bump.
    NoBumpKeywords,
}

/// The version change a run decided on.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpPlan {
    pub bump: VersionBump,
    pub old_name: String,
    pub old_code: u64,
    pub new_name: String,
    pub new_code: VersionCode,
    /// `tag_prefix` followed by the new versionName.
    pub tag: String,
    /// Build file content with both entries replaced.
    pub content: String,
}

/// Outcome of [plan_bump].
#[derive(Debug, Clone, PartialEq)]
pub enum BumpDecision {
    Bump(BumpPlan),
    Skip(SkipReason),
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub enum BumpOutcome {
    Skipped(SkipReason),
    /// Dry run: nothing was written.
    Planned(BumpPlan),
    /// Pushing is disabled: the build file was written, version control untouched.
    Written(BumpPlan),
    /// Committed and pushed to `branch`, with the tag unless tagging is skipped.
    Published {
        plan: BumpPlan,
        branch: String,
        tagged: bool,
    },
}

/// Decides the bump for `build_file` without touching anything.
///
/// `commit_messages` is `None` when the event carried no commits; only the
/// default bump can apply then.
pub fn plan_bump(
    config: &Config,
    build_file: &BuildFile,
    commit_messages: Option<&[String]>,
) -> Result<BumpDecision> {
    let messages: &[String] = match commit_messages {
        Some(messages) => messages,
        None => {
            ui::display_boundary_warning(&BoundaryWarning::NoCommitsInEvent);
            &[]
        }
    };

    if is_previous_bump(messages, &config.commit_message, &config.tag_prefix) {
        return Ok(BumpDecision::Skip(SkipReason::PreviousBump));
    }

    let bump = match determine_version_bump(messages, &config.wording, config.default_bump()?) {
        Some(bump) => bump,
        None => return Ok(BumpDecision::Skip(SkipReason::NoBumpKeywords)),
    };
    ui::display_status(&format!("Version action after final decision: {}", bump));

    let current = build_file.current()?;
    let version = clean_version(&current.name)?;
    let next = bump_version(&version, bump, config.preid.as_deref())?;
    let new_name = next.to_string();

    let new_code = VersionCode::parse(&new_name)
        .ok_or_else(|| BumpError::Unencodable(new_name.clone()))?;
    if u64::from(new_code.value()) <= current.code {
        ui::display_boundary_warning(&BoundaryWarning::VersionCodeNotIncreasing {
            current: current.code,
            next: new_code.value(),
        });
    }

    let content = build_file.apply(&current, &new_name, u64::from(new_code.value()));

    Ok(BumpDecision::Bump(BumpPlan {
        bump,
        tag: format!("{}{}", config.tag_prefix, new_name),
        old_name: current.name,
        old_code: current.code,
        new_name,
        new_code,
        content,
    }))
}

/// Writes the plan, commits it, and pushes it with or without a tag.
///
/// The first commit lands on whatever HEAD the runner checked out (often
/// detached). The target branch is then checked out, the file rewritten and
/// committed again; that second commit failing is only a warning because with
/// `actions/checkout@v2` the branch already holds the first one.
pub fn publish<V: VersionControl>(
    plan: &BumpPlan,
    build_file: &BuildFile,
    config: &Config,
    github: &GithubContext,
    vcs: &V,
) -> Result<BumpOutcome> {
    vcs.configure_identity(&config.identity.name, &config.identity.email)?;

    let branch = github.resolve_branch(config.behavior.target_branch.as_deref())?;
    ui::display_status(&format!("Current branch: {}", branch.name));

    build_file.write(&plan.content)?;
    let message = render_commit_message(&config.commit_message, &plan.tag);
    vcs.commit_all(&message)?;

    if branch.is_pull_request {
        vcs.fetch(DEFAULT_REMOTE)?;
    }
    vcs.checkout(&branch.name)?;
    build_file.write(&plan.content)?;
    github.set_output("newTag", &plan.tag)?;

    if let Err(e) = vcs.commit_all(&message) {
        ui::display_boundary_warning(&BoundaryWarning::BranchCommitSkipped {
            branch: branch.name.clone(),
            reason: e.to_string(),
        });
    }

    let tagged = !config.behavior.skip_tag;
    if tagged {
        vcs.create_tag(&plan.tag)?;
    }

    let request = PushRequest {
        url: github.remote_url()?,
        branch: branch.name.clone(),
        tag: tagged.then(|| plan.tag.clone()),
    };
    vcs.push(&request)?;

    Ok(BumpOutcome::Published {
        plan: plan.clone(),
        branch: branch.name,
        tagged,
    })
}

/// Main bump workflow
///
/// Orchestrates the entire run:
/// 1. Read the build file (a missing file is fatal)
/// 2. Collect commit messages from the event
/// 3. Skip if a previous bump commit is present or no bump applies
/// 4. Compute the new versionName and versionCode
/// 5. Stop after planning (`dry_run`) or after writing (push disabled)
/// 6. Open the repository with `open_vcs` and publish
pub fn run_bump_workflow<V, F>(
    config: &Config,
    github: &GithubContext,
    dry_run: bool,
    open_vcs: F,
) -> Result<BumpOutcome>
where
    V: VersionControl,
    F: FnOnce() -> Result<V>,
{
    let build_file = BuildFile::read(&config.gradle_path)?;

    ui::display_status("Selecting bump type based on commit messages...");
    let messages = github.commit_messages()?;
    if let Some(messages) = &messages {
        ui::display_commit_analysis(messages);
    }

    let plan = match plan_bump(config, &build_file, messages.as_deref())? {
        BumpDecision::Bump(plan) => plan,
        BumpDecision::Skip(reason) => return Ok(BumpOutcome::Skipped(reason)),
    };
    ui::display_version_change(
        &plan.old_name,
        plan.old_code,
        &plan.new_name,
        plan.new_code.value(),
    );

    if dry_run {
        return Ok(BumpOutcome::Planned(plan));
    }

    if !config.behavior.push {
        build_file.write(&plan.content)?;
        return Ok(BumpOutcome::Written(plan));
    }

    let vcs = open_vcs()?;
    publish(&plan, &build_file, config, github, &vcs)
}
