//! Analysis engine for determining version bumps from commits

pub mod aggregator;
pub mod classifier;

pub use aggregator::select_bump;
pub use classifier::{ClassificationRule, ClassifiedLog, ClassifierConfig};
