//! Dot-separated identifier lists for prerelease and build metadata
//!
//! Identifiers are restricted to `[0-9A-Za-z-]+`. Numeric prerelease
//! identifiers must not carry a leading zero unless they are exactly "0".
//! According to semver.org: https://semver.org/#spec-item-9

use std::cmp::Ordering;

/// Which version field an identifier list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Prerelease,
    Metadata,
}

impl IdentifierKind {
    /// Field name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            IdentifierKind::Prerelease => "prerelease",
            IdentifierKind::Metadata => "metadata",
        }
    }
}

/// Split `input` on '.' and validate every identifier.
///
/// An empty input yields an empty list. On failure the first invalid
/// identifier is returned as the error value.
pub fn parse_identifiers(
    input: &str,
    kind: IdentifierKind,
) -> std::result::Result<Vec<String>, String> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    input
        .split('.')
        .map(|ident| {
            if is_valid(ident, kind) {
                Ok(ident.to_string())
            } else {
                Err(ident.to_string())
            }
        })
        .collect()
}

fn is_valid(ident: &str, kind: IdentifierKind) -> bool {
    if ident.is_empty() {
        return false;
    }
    if !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return false;
    }
    if kind == IdentifierKind::Prerelease && is_numeric(ident) {
        return ident == "0" || !ident.starts_with('0');
    }
    true
}

fn is_numeric(ident: &str) -> bool {
    ident.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two prerelease identifier lists by semver precedence.
///
/// Numeric identifiers compare numerically and sort before alphanumeric
/// ones; when all shared identifiers are equal the longer list wins.
/// Both lists are assumed non-empty prerelease lists.
pub fn compare_prerelease(left: &[String], right: &[String]) -> Ordering {
    for (a, b) in left.iter().zip(right.iter()) {
        let ord = match (is_numeric(a), is_numeric(b)) {
            (true, true) => compare_numeric(a, b),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.cmp(b),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

// Validated numeric identifiers have no leading zeros, so a longer digit
// string is always the larger number.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(s: &str) -> Vec<String> {
        s.split('.').map(str::to_string).collect()
    }

    #[test]
    fn test_parse_empty_clears() {
        assert_eq!(
            parse_identifiers("", IdentifierKind::Prerelease).unwrap(),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_parse_dotted() {
        let parsed = parse_identifiers("alpha.1", IdentifierKind::Prerelease).unwrap();
        assert_eq!(parsed, vec!["alpha".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_parse_hyphenated_metadata() {
        let parsed = parse_identifiers("build-123-x", IdentifierKind::Metadata).unwrap();
        assert_eq!(parsed, vec!["build-123-x".to_string()]);
    }

    #[test]
    fn test_leading_zero_rejected_for_prerelease_only() {
        assert_eq!(
            parse_identifiers("01", IdentifierKind::Prerelease),
            Err("01".to_string())
        );
        assert!(parse_identifiers("01", IdentifierKind::Metadata).is_ok());
        assert!(parse_identifiers("0", IdentifierKind::Prerelease).is_ok());
        assert!(parse_identifiers("0a", IdentifierKind::Prerelease).is_ok());
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            parse_identifiers("beta.in valid", IdentifierKind::Prerelease),
            Err("in valid".to_string())
        );
        assert!(parse_identifiers("sha_5114f85", IdentifierKind::Metadata).is_err());
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert_eq!(
            parse_identifiers("beta..1", IdentifierKind::Prerelease),
            Err(String::new())
        );
        assert!(parse_identifiers("exp.", IdentifierKind::Metadata).is_err());
    }

    #[test]
    fn test_compare_prerelease_semver_example_chain() {
        // 1.0.0-alpha < 1.0.0-alpha.1 < 1.0.0-alpha.beta < 1.0.0-beta
        //   < 1.0.0-beta.2 < 1.0.0-beta.11 < 1.0.0-rc.1
        let chain = [
            "alpha", "alpha.1", "alpha.beta", "beta", "beta.2", "beta.11", "rc.1",
        ];
        for pair in chain.windows(2) {
            assert_eq!(
                compare_prerelease(&ids(pair[0]), &ids(pair[1])),
                Ordering::Less,
                "{} should sort before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_compare_numeric_before_alphanumeric() {
        assert_eq!(compare_prerelease(&ids("1"), &ids("a")), Ordering::Less);
        assert_eq!(compare_prerelease(&ids("a"), &ids("1")), Ordering::Greater);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(IdentifierKind::Prerelease.name(), "prerelease");
        assert_eq!(IdentifierKind::Metadata.name(), "metadata");
    }
}
