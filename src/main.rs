use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gradle_version_bump::cli::{run_bump_workflow, BumpOutcome, SkipReason};
use gradle_version_bump::config;
use gradle_version_bump::git::Git2Vcs;
use gradle_version_bump::github::GithubContext;
use gradle_version_bump::ui;
use gradle_version_bump::version_code;

#[derive(clap::Parser)]
#[command(
    name = "gradle-version-bump",
    about = "Bump versionName and versionCode in a Gradle build file based on commit messages"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Gradle build file to update (overrides INPUT_GRADLE_PATH)")]
    gradle_path: Option<String>,

    #[arg(
        long,
        env = "GRADLE_PATH",
        help = "Directory under GITHUB_WORKSPACE to run from"
    )]
    working_directory: Option<String>,

    #[arg(long, help = "Preview the bump without writing or pushing")]
    dry_run: bool,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Print the versionCode for VERSION (-1 if it cannot be encoded) and exit"
    )]
    print_code: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("gradle-version-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(version) = args.print_code.as_deref() {
        println!("{}", version_code::encode(version));
        return Ok(());
    }

    let github = GithubContext::from_env();

    if let Some(dir) = args.working_directory.as_deref().filter(|d| !d.is_empty()) {
        let base = github
            .workspace
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let target = base.join(dir);
        std::env::set_current_dir(&target)
            .with_context(|| format!("Cannot change directory to {}", target.display()))?;
    }

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            fail(&format!("Error loading config: {}", e));
        }
    };
    if let Err(e) = config.apply_env(|key| std::env::var(key).ok()) {
        fail(&format!("Invalid action input: {}", e));
    }
    if let Some(path) = args.gradle_path {
        config.gradle_path = path;
    }

    let outcome = run_bump_workflow(&config, &github, args.dry_run, || {
        let vcs = Git2Vcs::open(".")?;
        Ok(match github.credentials() {
            Some((actor, token)) => vcs.with_credentials(actor, token),
            None => vcs,
        })
    });

    match outcome {
        Ok(BumpOutcome::Skipped(SkipReason::PreviousBump)) => {
            ui::display_success("No action necessary because we found a previous bump!");
        }
        Ok(BumpOutcome::Skipped(SkipReason::NoBumpKeywords)) => {
            ui::display_success("No version keywords found, skipping bump.");
        }
        Ok(BumpOutcome::Planned(plan)) => {
            ui::display_status("Dry run:");
            ui::display_success(&format!(
                "  Would set versionName \"{}\" and versionCode {}",
                plan.new_name, plan.new_code
            ));
            ui::display_success(&format!("  Would commit, tag {} and push", plan.tag));
        }
        Ok(BumpOutcome::Written(plan)) => {
            ui::display_success(&format!(
                "Wrote {} to {}; pushing disabled, finished.",
                plan.new_name, config.gradle_path
            ));
        }
        Ok(BumpOutcome::Published {
            plan,
            branch,
            tagged,
        }) => {
            let what = if tagged { "tagged and pushed" } else { "pushed" };
            println!(
                "\n{} Android version bumped to {} ({} to {})\n",
                console::style("✓").green(),
                plan.tag,
                what,
                branch
            );
        }
        Err(e) => fail(&format!("Failed to bump version: {}", e)),
    }

    Ok(())
}

fn fail(message: &str) -> ! {
    ui::display_error(message);
    if std::env::var("GITHUB_ACTIONS").as_deref() == Ok("true") {
        ui::annotate_error(message);
    }
    std::process::exit(1);
}
