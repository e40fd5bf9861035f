use std::sync::LazyLock;

use regex::Regex;

use crate::config::WordingConfig;
pub use crate::version::VersionBump;

/// Placeholder for the new version inside the commit message template.
pub const VERSION_PLACEHOLDER: &str = "{{version}}";

/// `type!:` or `type(scope)!:` at the start of a message.
static BREAKING_HEADER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z]+)(\(.+\))?!:").ok());

/// Returns true if the message header marks a breaking change (`feat(api)!: ...`).
pub fn is_breaking_header(message: &str) -> bool {
    BREAKING_HEADER
        .as_ref()
        .is_some_and(|re| re.is_match(message))
}

/// Renders the commit message template for a concrete version.
pub fn render_commit_message(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// Returns true if any message looks like a bump commit this tool made earlier.
///
/// The template is matched case-insensitively anywhere in the message, with the
/// placeholder standing for `<tag_prefix>X.Y.Z`. Finding one means the push that
/// triggered this run already contains a bump, so nothing more should happen.
pub fn is_previous_bump(commit_messages: &[String], template: &str, tag_prefix: &str) -> bool {
    let version_pattern = format!(r"{}\d+\.\d+\.\d+", regex::escape(tag_prefix));
    let pattern = template
        .split(VERSION_PLACEHOLDER)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(&version_pattern);

    match Regex::new(&format!("(?i){}", pattern)) {
        Ok(re) => commit_messages.iter().any(|message| re.is_match(message)),
        Err(_) => false,
    }
}

fn mentions_any(message: &str, words: &[String]) -> bool {
    words.iter().any(|word| message.contains(word.as_str()))
}

/// Picks the bump type for a set of commit messages.
///
/// Rules are checked in priority order across all messages, first hit wins:
/// 1. **Major**: a breaking header (`type!:`) or any major word
/// 2. **Minor**: any minor word
/// 3. **Patch**: any patch word, when patch words are configured
/// 4. **Prerelease**: any pre-release word
///
/// Falls back to `default` when nothing matches; `None` means skip the bump.
pub fn determine_version_bump(
    commit_messages: &[String],
    wording: &WordingConfig,
    default: Option<VersionBump>,
) -> Option<VersionBump> {
    let any_mentions =
        |words: &[String]| commit_messages.iter().any(|m| mentions_any(m, words));

    if commit_messages.iter().any(|m| is_breaking_header(m)) || any_mentions(&wording.major) {
        Some(VersionBump::Major)
    } else if any_mentions(&wording.minor) {
        Some(VersionBump::Minor)
    } else if wording.patch.as_deref().is_some_and(any_mentions) {
        Some(VersionBump::Patch)
    } else if any_mentions(&wording.prerelease) {
        Some(VersionBump::Prerelease)
    } else {
        default
    }
}
