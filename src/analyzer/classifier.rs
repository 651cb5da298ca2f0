use crate::domain::{CommitRecord, LogEntry, Severity};
use crate::error::{ChangeReleaseError, Result};
use regex::Regex;
use tracing::debug;

/// A compiled pattern that raises a matching commit to `severity`.
///
/// Only patch and major rules exist; minor is the unmatched default.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pattern: Regex,
    severity: Severity,
}

impl ClassificationRule {
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Immutable rule set for one release run.
///
/// Built once from configuration and passed to every classification call.
#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    rules: Vec<ClassificationRule>,
    ignore: Vec<Regex>,
}

impl ClassifierConfig {
    /// Compile the major, patch and ignore pattern lists.
    ///
    /// Fails on the first pattern that is not a valid regular expression.
    pub fn new<S: AsRef<str>>(match_major: &[S], match_patch: &[S], ignore: &[S]) -> Result<Self> {
        let mut rules = Vec::with_capacity(match_major.len() + match_patch.len());
        for pattern in match_major {
            rules.push(ClassificationRule {
                pattern: compile("match_major", pattern.as_ref())?,
                severity: Severity::Major,
            });
        }
        for pattern in match_patch {
            rules.push(ClassificationRule {
                pattern: compile("match_patch", pattern.as_ref())?,
                severity: Severity::Patch,
            });
        }

        let ignore = ignore
            .iter()
            .map(|pattern| compile("ignore_messages", pattern.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassifierConfig { rules, ignore })
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Whether any ignore pattern matches the subject
    pub fn is_ignored(&self, subject: &str) -> bool {
        self.ignore.iter().any(|re| re.is_match(subject))
    }

    /// Highest severity among matching rules, or minor when nothing matches
    pub fn classify(&self, subject: &str) -> Severity {
        self.rules
            .iter()
            .filter(|rule| rule.pattern.is_match(subject))
            .map(|rule| rule.severity)
            .max()
            .unwrap_or(Severity::Minor)
    }

    /// Parse raw log lines, drop ignored commits and classify the rest.
    ///
    /// Blank lines are skipped; any other malformed line fails the batch.
    pub fn classify_log<S: AsRef<str>>(&self, lines: &[S]) -> Result<ClassifiedLog> {
        let mut commits = Vec::new();
        let mut ignored = 0;

        for line in lines {
            let line = line.as_ref();
            if line.is_empty() {
                continue;
            }
            let entry = LogEntry::parse(line)?;

            if self.is_ignored(&entry.subject) {
                debug!(hash = %entry.short_hash, subject = %entry.subject, "ignoring commit");
                ignored += 1;
                continue;
            }

            let severity = self.classify(&entry.subject);
            debug!(hash = %entry.short_hash, subject = %entry.subject, %severity, "classified commit");
            commits.push(entry.resolve(severity));
        }

        Ok(ClassifiedLog { commits, ignored })
    }
}

fn compile(list: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ChangeReleaseError::RuleCompilation {
        list,
        pattern: pattern.to_string(),
        source,
    })
}

/// Commits that survived the ignore filter, plus how many were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLog {
    pub commits: Vec<CommitRecord>,
    pub ignored: usize,
}
