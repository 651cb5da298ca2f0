//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod identifier;
pub mod tag;
pub mod version;

pub use commit::{CommitRecord, LogEntry};
pub use identifier::IdentifierKind;
pub use tag::TagPattern;
pub use version::{SemanticVersion, Severity};
