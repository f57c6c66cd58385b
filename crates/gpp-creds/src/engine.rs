//! Extraction of cached preference credentials.
//!
//! One record per matched file: only the first credential entry of a
//! document is inspected. Documents that carry several entries surface only
//! their first; this is a known limitation, kept deliberately.

use crate::cipher;
use crate::report::CheckReport;
use crate::schema::SchemaKind;
use privsweep_common::{Error, Result};
use roxmltree::{Document, Node};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Rendered in place of any attribute the source document left absent or
/// empty. Never the empty string.
pub const BLANK: &str = "[BLANK]";

/// Textual marker that a document carries a protected credential at all.
const CREDENTIAL_MARKER: &str = "cpassword";

/// One decoded credential entry. Built once per matched file, never mutated
/// afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRecord {
    pub user_name: String,
    pub new_name: String,
    pub password: String,
    pub changed: String,
}

/// A credential record plus the evidence trail back to its source file.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub source: PathBuf,
    pub schema: SchemaKind,
    /// SHA-256 of the matched document, so the report stays tied to the
    /// exact bytes that were read.
    pub sha256: String,
    #[serde(flatten)]
    pub record: CredentialRecord,
    /// Present when the credential field was matched but could not be
    /// decoded. The finding still counts as evidence of the exposure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

/// What scanning one candidate file produced.
#[derive(Debug)]
pub enum FileOutcome {
    /// Parsed cleanly but holds no credential marker.
    NoCredential,
    /// Carried the marker but the expected entry structure was missing.
    MarkerOnly,
    /// Carried the marker and produced a finding.
    Credential(Box<Finding>),
}

/// Scan a single candidate file.
///
/// A path that matches no known schema is `SchemaMismatch` and the file is
/// not even opened.
pub fn scan_file(path: &Path) -> Result<FileOutcome> {
    let kind = SchemaKind::from_path(path)
        .ok_or_else(|| Error::SchemaMismatch(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|e| Error::FileUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    scan_document(&content, kind, path)
}

/// Scan already-loaded document text under a resolved schema.
pub fn scan_document(content: &str, kind: SchemaKind, source: &Path) -> Result<FileOutcome> {
    let doc = Document::parse(content).map_err(|e| Error::ParseFailure {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !content.contains(CREDENTIAL_MARKER) {
        trace!(path = %source.display(), "no credential marker");
        return Ok(FileOutcome::NoCredential);
    }

    let desc = kind.descriptor();
    let Some(cred_node) = find_first(&doc, desc.credential_path) else {
        warn!(
            path = %source.display(),
            "credential marker present but the expected {} entry is missing",
            desc.file_name
        );
        return Ok(FileOutcome::MarkerOnly);
    };
    let meta_node = find_first(&doc, desc.metadata_path);

    let raw_password = cred_node.attribute(desc.password_attr).unwrap_or_default();
    let user_name = normalize(cred_node.attribute(desc.identity_attr));
    let new_name = normalize(desc.rename_attr.and_then(|attr| cred_node.attribute(attr)));
    let changed = normalize(meta_node.and_then(|node| node.attribute(desc.changed_attr)));

    let (password, decode_error) = if raw_password.is_empty() {
        (BLANK.to_string(), None)
    } else {
        match cipher::decrypt_cpassword(raw_password) {
            Ok(plain) => (plain, None),
            Err(e) => {
                warn!(path = %source.display(), error = %e, "credential field did not decode");
                (format!("[DECODE ERROR: {e}]"), Some(e.to_string()))
            }
        }
    };

    let record = CredentialRecord {
        user_name,
        new_name,
        password,
        changed,
    };
    debug!(path = %source.display(), schema = ?kind, "credential entry extracted");

    Ok(FileOutcome::Credential(Box::new(Finding {
        source: source.to_path_buf(),
        schema: kind,
        sha256: sha256_hex(content.as_bytes()),
        record,
        decode_error,
    })))
}

/// Scan a list of candidate files into a report.
///
/// Per-file failures are logged and skipped so one malformed document never
/// hides findings in the rest of the corpus.
pub fn scan_files(paths: &[PathBuf]) -> CheckReport {
    let mut report = CheckReport::new();
    for path in paths {
        report.files_considered += 1;
        match scan_file(path) {
            Ok(FileOutcome::NoCredential) => {}
            Ok(FileOutcome::MarkerOnly) => report.flag_marker(),
            Ok(FileOutcome::Credential(finding)) => report.add_finding(*finding),
            // Routine: most cache files are not credential carriers.
            Err(Error::SchemaMismatch(_)) => {
                trace!(path = %path.display(), "no schema match, skipping");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable or malformed file");
            }
        }
    }
    report.complete();
    report
}

fn normalize(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => BLANK.to_string(),
    }
}

/// First element matching the path, in document order. Later siblings are
/// ignored.
fn find_first<'a, 'input>(doc: &'a Document<'input>, path: &[&str]) -> Option<Node<'a, 'input>> {
    let mut node = doc.root();
    for name in path {
        node = node
            .children()
            .find(|child| child.is_element() && child.has_tag_name(*name))?;
    }
    Some(node)
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
