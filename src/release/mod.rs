//! Release decision and the end-to-end release run
//!
//! - [`flow`]: propose a version from the log, confirm it against the changelog
//! - [`artifact`]: the changelog document that carries the confirmed version
//! - [`editor`]: the capability that lets a human revise the changelog
//! - [`pipeline`]: repository, changelog file, hooks, commit and tag

pub mod artifact;
pub mod editor;
pub mod flow;
pub mod pipeline;

pub use artifact::ConfirmationArtifact;
pub use editor::{ArtifactEditor, ExternalEditor};
pub use flow::{
    confirm, Confirmed, Overrides, Proposal, Proposed, ReleaseDecision, ReleaseDecisionFlow,
    INITIAL_BASE_VERSION,
};
pub use pipeline::{run_release, NoReleaseReason, ReleaseOptions, ReleaseOutcome, ReleaseReport};
