//! Formatting functions for UI output.
//!
//! `format_*` functions build the text and are testable; `display_*`
//! functions print it. Styling goes through `console`, which drops colours
//! when the stream is not a terminal.

use crate::boundary::BoundaryWarning;
use crate::domain::{CommitRecord, Severity};
use crate::release::ReleaseReport;
use console::style;

/// Commits shown before the list is collapsed
const MAX_LISTED_COMMITS: usize = 10;
const MAX_SUBJECT_WIDTH: usize = 60;

/// Print an error message naming the stage that failed.
pub fn display_error(stage: &str, message: &str) {
    eprintln!("{} [{}] {}", style("ERROR:").red().bold(), stage, message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a boundary warning to stderr.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

fn severity_label(severity: Severity) -> String {
    let label = format!("{:<5}", severity.name());
    match severity {
        Severity::Major => style(label).red().bold().to_string(),
        Severity::Minor => style(label).cyan().to_string(),
        Severity::Patch => style(label).dim().to_string(),
    }
}

fn shorten(subject: &str) -> &str {
    match subject.char_indices().nth(MAX_SUBJECT_WIDTH) {
        Some((end, _)) => &subject[..end],
        None => subject,
    }
}

/// Build the classified commit list shown before confirmation.
pub fn format_commit_analysis(commits: &[CommitRecord], ignored: usize, since: &str) -> String {
    let mut lines = vec![
        style(format!("Changes since {}", since)).bold().to_string(),
        style(format!("{} commit(s):", commits.len()))
            .underlined()
            .to_string(),
    ];

    for commit in commits.iter().take(MAX_LISTED_COMMITS) {
        lines.push(format!(
            "  {} {} {}",
            style(&commit.entry().short_hash).dim(),
            severity_label(commit.severity()),
            shorten(commit.subject())
        ));
    }

    if commits.len() > MAX_LISTED_COMMITS {
        lines.push(format!(
            "  ... and {} more commits",
            commits.len() - MAX_LISTED_COMMITS
        ));
    }
    if ignored > 0 {
        lines.push(format!("  ({} ignored)", ignored));
    }

    lines.join("\n")
}

/// Print the classified commit list.
pub fn display_commit_analysis(commits: &[CommitRecord], ignored: usize, since: &str) {
    println!("\n{}", format_commit_analysis(commits, ignored, since));
}

/// Build the "from -> to" tag summary (or initial tag).
pub fn format_release_tag(previous: Option<&str>, tag: &str) -> String {
    match previous {
        Some(previous) => format!(
            "{}\n  From: {}\n  To:   {}",
            style("Release:").bold(),
            style(previous).red(),
            style(tag).green()
        ),
        None => format!(
            "{}\n  New tag: {}",
            style("Initial Release:").bold(),
            style(tag).green()
        ),
    }
}

/// Print the outcome of a completed release.
pub fn display_release_summary(report: &ReleaseReport) {
    let since = report.previous_tag.as_deref().unwrap_or("the beginning");
    display_commit_analysis(&report.commits, report.ignored, since);
    println!(
        "\n{}",
        format_release_tag(report.previous_tag.as_deref(), &report.tag)
    );
    println!(
        "  Bump: {} ({} -> {})",
        report.decision.aggregate_severity,
        report.decision.base_version,
        report.decision.proposed_version
    );
    println!();
    display_success(&format!(
        "Updated {} and created tag {}",
        report.changelog.display(),
        report.tag
    ));
}
