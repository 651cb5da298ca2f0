use crate::domain::identifier::{compare_prerelease, parse_identifiers, IdentifierKind};
use crate::error::{ChangeReleaseError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Bump magnitude decided for a commit or a whole release.
///
/// The aggregation seed "none" is modelled as `Option::<Severity>::None`,
/// which sorts below every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Patch,
    Minor,
    Major,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Patch => "patch",
            Severity::Minor => "minor",
            Severity::Major => "major",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic version with optional prerelease and build metadata.
///
/// Values are never mutated in place: [`bump`](Self::bump),
/// [`with_prerelease`](Self::with_prerelease) and
/// [`with_metadata`](Self::with_metadata) all return a new version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    prerelease: Vec<String>,
    metadata: Vec<String>,
}

impl SemanticVersion {
    /// Create a new version without prerelease or metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Parse a version such as `v1.2.3-beta.1+exp.sha.5114f85`.
    ///
    /// Metadata is split off at the first '+' before the prerelease is split
    /// off at the first '-', so hyphens after a '+' stay in the metadata.
    /// Leading zeros in the numeric core are accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.strip_prefix('v').unwrap_or(input);

        let (rest, metadata) = match text.split_once('+') {
            Some((rest, meta)) => (rest, Some(meta)),
            None => (text, None),
        };
        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(ChangeReleaseError::malformed_version(
                input,
                format!("expected MAJOR.MINOR.PATCH, found {} part(s)", parts.len()),
            ));
        }

        let major = parse_component(input, "major", parts[0])?;
        let minor = parse_component(input, "minor", parts[1])?;
        let patch = parse_component(input, "patch", parts[2])?;

        let prerelease = parse_suffix(input, prerelease, IdentifierKind::Prerelease)?;
        let metadata = parse_suffix(input, metadata, IdentifierKind::Metadata)?;

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            prerelease,
            metadata,
        })
    }

    pub fn prerelease(&self) -> &[String] {
        &self.prerelease
    }

    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Bump according to severity; prerelease and metadata are always cleared.
    ///
    /// Fails with [`ChangeReleaseError::MalformedVersion`] when the bumped
    /// component is already `u64::MAX`.
    pub fn bump(&self, severity: Severity) -> Result<Self> {
        let increment = |field: &str, value: u64| {
            value.checked_add(1).ok_or_else(|| {
                ChangeReleaseError::malformed_version(
                    self.to_string(),
                    format!("{} version cannot be incremented past {}", field, u64::MAX),
                )
            })
        };

        Ok(match severity {
            Severity::Major => SemanticVersion::new(increment("major", self.major)?, 0, 0),
            Severity::Minor => {
                SemanticVersion::new(self.major, increment("minor", self.minor)?, 0)
            }
            Severity::Patch => {
                SemanticVersion::new(self.major, self.minor, increment("patch", self.patch)?)
            }
        })
    }

    /// Return a copy with the prerelease replaced. An empty string clears it.
    pub fn with_prerelease(&self, prerelease: &str) -> Result<Self> {
        let identifiers = validate(prerelease, IdentifierKind::Prerelease)?;
        Ok(SemanticVersion {
            prerelease: identifiers,
            ..self.clone()
        })
    }

    /// Return a copy with the build metadata replaced. An empty string clears it.
    pub fn with_metadata(&self, metadata: &str) -> Result<Self> {
        let identifiers = validate(metadata, IdentifierKind::Metadata)?;
        Ok(SemanticVersion {
            metadata: identifiers,
            ..self.clone()
        })
    }

    /// Semver precedence, ignoring build metadata
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (self.is_prerelease(), other.is_prerelease()) {
                (false, false) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (true, true) => compare_prerelease(&self.prerelease, &other.prerelease),
            })
    }
}

fn parse_component(input: &str, name: &str, token: &str) -> Result<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChangeReleaseError::malformed_version(
            input,
            format!("{} version '{}' is not a number", name, token),
        ));
    }
    token.parse::<u64>().map_err(|e| {
        ChangeReleaseError::malformed_version(
            input,
            format!("{} version '{}': {}", name, token, e),
        )
    })
}

fn parse_suffix(input: &str, suffix: Option<&str>, kind: IdentifierKind) -> Result<Vec<String>> {
    let Some(suffix) = suffix else {
        return Ok(Vec::new());
    };
    if suffix.is_empty() {
        return Err(ChangeReleaseError::malformed_version(
            input,
            format!("empty {} after separator", kind.name()),
        ));
    }
    parse_identifiers(suffix, kind).map_err(|ident| {
        ChangeReleaseError::malformed_version(
            input,
            format!("invalid {} identifier '{}'", kind.name(), ident),
        )
    })
}

fn validate(input: &str, kind: IdentifierKind) -> Result<Vec<String>> {
    parse_identifiers(input, kind).map_err(|identifier| ChangeReleaseError::InvalidIdentifier {
        field: kind.name(),
        identifier,
        input: input.to_string(),
    })
}

impl FromStr for SemanticVersion {
    type Err = ChangeReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease.join("."))?;
        }
        if !self.metadata.is_empty() {
            write!(f, "+{}", self.metadata.join("."))?;
        }
        Ok(())
    }
}

/// Versions differing only in build metadata are unequal but have the same
/// precedence, so they are reported as incomparable.
impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_precedence(other) {
            Ordering::Equal if self.metadata != other.metadata => None,
            ord => Some(ord),
        }
    }
}
