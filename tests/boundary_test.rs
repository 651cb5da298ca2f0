use git_changerelease::boundary::BoundaryWarning;
use git_changerelease::release::NoReleaseReason;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        since: "v1.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("no changes since v1.0.0"),
        "Message should name the tag, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_all_ignored_display() {
    let warning = BoundaryWarning::AllCommitsIgnored {
        since: "v1.0.0".to_string(),
        ignored: 4,
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("All 4 commit(s)"), "got: {}", display_msg);
    assert!(display_msg.contains("ignore patterns"), "got: {}", display_msg);
}

#[test]
fn test_boundary_warning_no_prior_tag_display() {
    let warning = BoundaryWarning::NoPriorTag {
        fallback: "0.0.0".to_string(),
    };
    assert!(warning.to_string().contains("0.0.0"));
}

#[test]
fn test_boundary_warning_version_overridden_display() {
    let warning = BoundaryWarning::VersionOverridden {
        proposed: "1.1.0".to_string(),
        confirmed: "2.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("proposed 1.1.0"), "got: {}", display_msg);
    assert!(display_msg.contains("using 2.0.0"), "got: {}", display_msg);
}

// ============================================================================
// NoReleaseReason -> BoundaryWarning
// ============================================================================

#[test]
fn test_no_release_reason_distinguishes_ignored_history() {
    let empty = NoReleaseReason {
        since: "v2.0.0".to_string(),
        ignored: 0,
    };
    let ignored = NoReleaseReason {
        since: "v2.0.0".to_string(),
        ignored: 2,
    };

    assert_eq!(
        empty.warning(),
        BoundaryWarning::NoNewCommits {
            since: "v2.0.0".to_string()
        }
    );
    assert_eq!(
        ignored.warning(),
        BoundaryWarning::AllCommitsIgnored {
            since: "v2.0.0".to_string(),
            ignored: 2
        }
    );
}
