//! Console output.
//!
//! Everything the tool reports goes through here so the style stays uniform:
//! status lines on stdout, errors and warnings on stderr. `console` drops the
//! colors when the output is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Emit an `::error::` workflow command so GitHub shows the failure on the run page.
pub fn annotate_error(message: &str) {
    // Workflow commands end at the first newline.
    println!("::error::{}", message.replace('\n', "%0A"));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the commit messages the bump decision is based on.
///
/// Shows the first line of up to 10 messages, truncated to 60 characters.
pub fn display_commit_analysis(commit_messages: &[String]) {
    println!("\n{}", style("Analyzing commit messages").bold());
    println!(
        "{}",
        style(format!("{} commits in this event:", commit_messages.len())).underlined()
    );

    for (i, message) in commit_messages.iter().take(10).enumerate() {
        let first_line = message.lines().next().unwrap_or_default();
        let short_msg: String = first_line.chars().take(60).collect();
        println!("  {}. {}", i + 1, short_msg);
    }

    if commit_messages.len() > 10 {
        println!("  ... and {} more commits", commit_messages.len() - 10);
    }
}

/// Display the old and new `versionName` / `versionCode` pair.
pub fn display_version_change(old_name: &str, old_code: u64, new_name: &str, new_code: u32) {
    println!("\n{}", style("Version change:").bold());
    println!(
        "  versionName: {} -> {}",
        style(old_name).red(),
        style(new_name).green()
    );
    println!(
        "  versionCode: {} -> {}",
        style(old_code).red(),
        style(new_code).green()
    );
}
