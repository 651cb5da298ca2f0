//! Decide the next release version of a git repository from its commit log.
//!
//! Commits since the latest tag are classified by configurable patterns,
//! the largest severity bumps the base version, a human confirms the
//! proposal by editing the changelog, and the result is committed and tagged.

pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod release;
pub mod telemetry;
pub mod ui;

pub use error::{ChangeReleaseError, Result};
