//! User interface module - terminal output for the binary.
//!
//! All business logic reports through return values and `tracing`; only the
//! binary prints through these functions.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commit_analysis, display_error, display_release_summary,
    display_status, display_success,
};
