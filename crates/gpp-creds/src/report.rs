//! Check output assembled for the host tool.

use crate::engine::{CredentialRecord, Finding};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display name the host tool shows for this check.
pub const CHECK_NAME: &str = "Cached GPP Password";

/// Aggregated result of one scan invocation.
///
/// The host tool consumes the display name, the vulnerable flag and the
/// ordered detail lines; everything else is supporting evidence for the
/// serialized report.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub name: &'static str,
    pub vulnerable: bool,
    pub details: Vec<String>,
    pub findings: Vec<Finding>,
    pub files_considered: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self {
            name: CHECK_NAME,
            vulnerable: false,
            details: Vec::new(),
            findings: Vec::new(),
            files_considered: 0,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Record that a credential marker was seen, even when no record could
    /// be built from the document.
    pub fn flag_marker(&mut self) {
        self.vulnerable = true;
    }

    /// Add an extracted finding along with its formatted detail line.
    pub fn add_finding(&mut self, finding: Finding) {
        self.vulnerable = true;
        self.details.push(detail_line(&finding.record));
        self.findings.push(finding);
    }

    /// Stamp the report as finished.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }
}

impl Default for CheckReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed line shape the host tool prints per credential.
pub fn detail_line(record: &CredentialRecord) -> String {
    format!(
        "UserName: {} | NewName: {} | cPassword: {} | Changed: {}",
        record.user_name, record.new_name, record.password, record.changed
    )
}
