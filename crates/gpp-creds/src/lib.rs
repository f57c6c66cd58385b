//! Cached Group Policy Preference credential check.
//!
//! Group Policy Preferences could push local-account credentials to domain
//! machines, and the per-machine policy cache keeps those documents on disk
//! indefinitely. The protecting key has been public since MS14-025, so any
//! cached `cpassword` field is a recoverable plaintext credential. This
//! crate locates the cached documents, extracts the credential fields from
//! the six schemas that carry them, and recovers the plaintext.

pub mod cipher;
pub mod engine;
pub mod locate;
pub mod report;
pub mod schema;

pub use engine::{scan_file, scan_files, CredentialRecord, FileOutcome, Finding, BLANK};
pub use report::{CheckReport, CHECK_NAME};
pub use schema::{SchemaDescriptor, SchemaKind};

use std::path::Path;
use tracing::info;

/// Run the check against a policy-cache root.
///
/// The root must already be resolved by the caller; the scan itself never
/// reads ambient process state, so it stays deterministic and testable.
pub fn run(root: &Path) -> CheckReport {
    let files = locate::xml_files(root);
    info!(root = %root.display(), candidates = files.len(), "scanning policy cache");
    scan_files(&files)
}
