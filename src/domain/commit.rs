use crate::domain::Severity;
use crate::error::{ChangeReleaseError, Result};

/// Separator between fields of a commit-log line
pub const LOG_FIELD_SEPARATOR: char = '\t';

/// Number of fields in a commit-log line: short hash, subject, author name, author email
pub const LOG_FIELD_COUNT: usize = 4;

/// One commit as read from the log, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub short_hash: String,
    pub subject: String,
    pub author_name: String,
    pub author_email: String,
}

impl LogEntry {
    /// Parse a tab-separated log line with exactly four fields
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(LOG_FIELD_SEPARATOR).collect();
        if fields.len() != LOG_FIELD_COUNT {
            return Err(ChangeReleaseError::MalformedLogLine {
                line: line.to_string(),
                fields: fields.len(),
            });
        }

        Ok(LogEntry {
            short_hash: fields[0].to_string(),
            subject: fields[1].to_string(),
            author_name: fields[2].to_string(),
            author_email: fields[3].to_string(),
        })
    }

    /// Render back into the log-line format
    pub fn to_log_line(&self) -> String {
        [
            self.short_hash.as_str(),
            self.subject.as_str(),
            self.author_name.as_str(),
            self.author_email.as_str(),
        ]
        .join("\t")
    }

    /// Attach the severity resolved by the classifier
    pub fn resolve(self, severity: Severity) -> CommitRecord {
        CommitRecord {
            entry: self,
            severity,
        }
    }
}

/// A commit together with its resolved bump severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    entry: LogEntry,
    severity: Severity,
}

impl CommitRecord {
    pub fn subject(&self) -> &str {
        &self.entry.subject
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn entry(&self) -> &LogEntry {
        &self.entry
    }
}
