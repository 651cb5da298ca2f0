use crate::domain::SemanticVersion;
use crate::error::{ChangeReleaseError, Result};

/// Placeholder replaced by the version in tag patterns and templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pattern: String,
}

impl TagPattern {
    /// Create a tag pattern; it must contain the `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains(VERSION_PLACEHOLDER) {
            return Err(ChangeReleaseError::config(format!(
                "tag pattern '{}' must contain {} placeholder",
                pattern, VERSION_PLACEHOLDER
            )));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        self.pattern
            .replace(VERSION_PLACEHOLDER, &version.to_string())
    }

    /// Strip the pattern's surrounding text from a tag name.
    ///
    /// Tags that do not fit the pattern are returned unchanged so the
    /// version parser can report them.
    pub fn version_text<'t>(&self, tag: &'t str) -> &'t str {
        let (prefix, suffix) = self
            .pattern
            .split_once(VERSION_PLACEHOLDER)
            .unwrap_or((self.pattern.as_str(), ""));

        tag.strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .filter(|version| !version.is_empty())
            .unwrap_or(tag)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: format!("v{}", VERSION_PLACEHOLDER),
        }
    }
}
