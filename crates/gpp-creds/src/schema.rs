//! Recognized policy-cache schemas.
//!
//! Each preference file kind keeps its credential in a different spot of the
//! document; the descriptor table maps a kind to the node path and attribute
//! names that hold it, so extraction stays one generic routine instead of a
//! branch per filename.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The closed set of preference file kinds that can carry a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    Groups,
    Services,
    ScheduledTasks,
    DataSources,
    Printers,
    Drives,
}

/// Where a schema keeps its credential and change metadata.
#[derive(Debug, Clone, Copy)]
pub struct SchemaDescriptor {
    /// Exact file name that selects this schema. Matched case-sensitively
    /// as a substring of the candidate path.
    pub file_name: &'static str,
    /// Element path from the document root to the credential-bearing node.
    pub credential_path: &'static [&'static str],
    /// Element path to the node carrying the change timestamp.
    pub metadata_path: &'static [&'static str],
    /// Attribute holding the protected credential.
    pub password_attr: &'static str,
    /// Attribute naming the account the credential belongs to.
    pub identity_attr: &'static str,
    /// Attribute holding the renamed account, where the schema defines one.
    pub rename_attr: Option<&'static str>,
    /// Attribute holding the last-change timestamp, read from the metadata
    /// node.
    pub changed_attr: &'static str,
}

const GROUPS: SchemaDescriptor = SchemaDescriptor {
    file_name: "Groups.xml",
    credential_path: &["Groups", "User", "Properties"],
    metadata_path: &["Groups", "User"],
    password_attr: "cpassword",
    identity_attr: "userName",
    rename_attr: Some("newName"),
    changed_attr: "changed",
};

const SERVICES: SchemaDescriptor = SchemaDescriptor {
    file_name: "Services.xml",
    credential_path: &["NTServices", "NTService", "Properties"],
    metadata_path: &["NTServices", "NTService"],
    password_attr: "cpassword",
    identity_attr: "accountName",
    rename_attr: None,
    changed_attr: "changed",
};

// The cache writes this one with a lowercase "t".
const SCHEDULED_TASKS: SchemaDescriptor = SchemaDescriptor {
    file_name: "Scheduledtasks.xml",
    credential_path: &["ScheduledTasks", "Task", "Properties"],
    metadata_path: &["ScheduledTasks", "Task"],
    password_attr: "cpassword",
    identity_attr: "runAs",
    rename_attr: None,
    changed_attr: "changed",
};

const DATA_SOURCES: SchemaDescriptor = SchemaDescriptor {
    file_name: "DataSources.xml",
    credential_path: &["DataSources", "DataSource", "Properties"],
    metadata_path: &["DataSources", "DataSource"],
    password_attr: "cpassword",
    identity_attr: "username",
    rename_attr: None,
    changed_attr: "changed",
};

const PRINTERS: SchemaDescriptor = SchemaDescriptor {
    file_name: "Printers.xml",
    credential_path: &["Printers", "SharedPrinter", "Properties"],
    metadata_path: &["Printers", "SharedPrinter"],
    password_attr: "cpassword",
    identity_attr: "username",
    rename_attr: None,
    changed_attr: "changed",
};

const DRIVES: SchemaDescriptor = SchemaDescriptor {
    file_name: "Drives.xml",
    credential_path: &["Drives", "Drive", "Properties"],
    metadata_path: &["Drives", "Drive"],
    password_attr: "cpassword",
    identity_attr: "username",
    rename_attr: None,
    changed_attr: "changed",
};

/// Match priority. The first kind whose file name appears in the candidate
/// path wins.
pub const SCHEMA_PRIORITY: [SchemaKind; 6] = [
    SchemaKind::Groups,
    SchemaKind::Services,
    SchemaKind::ScheduledTasks,
    SchemaKind::DataSources,
    SchemaKind::Printers,
    SchemaKind::Drives,
];

impl SchemaKind {
    /// The descriptor for this kind.
    pub fn descriptor(self) -> &'static SchemaDescriptor {
        match self {
            SchemaKind::Groups => &GROUPS,
            SchemaKind::Services => &SERVICES,
            SchemaKind::ScheduledTasks => &SCHEDULED_TASKS,
            SchemaKind::DataSources => &DATA_SOURCES,
            SchemaKind::Printers => &PRINTERS,
            SchemaKind::Drives => &DRIVES,
        }
    }

    /// Select the schema for a candidate path, or `None` when the file is
    /// not a recognized preference cache document. Files that return `None`
    /// are never opened.
    pub fn from_path(path: &Path) -> Option<SchemaKind> {
        let path = path.to_string_lossy();
        SCHEMA_PRIORITY
            .iter()
            .copied()
            .find(|kind| path.contains(kind.descriptor().file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_filename_maps_to_its_kind() {
        let cases = [
            ("/cache/{GUID}/Machine/Preferences/Groups/Groups.xml", SchemaKind::Groups),
            ("/cache/{GUID}/Machine/Preferences/Services/Services.xml", SchemaKind::Services),
            ("/cache/{GUID}/Machine/Preferences/ScheduledTasks/Scheduledtasks.xml", SchemaKind::ScheduledTasks),
            ("/cache/{GUID}/User/Preferences/DataSources/DataSources.xml", SchemaKind::DataSources),
            ("/cache/{GUID}/User/Preferences/Printers/Printers.xml", SchemaKind::Printers),
            ("/cache/{GUID}/User/Preferences/Drives/Drives.xml", SchemaKind::Drives),
        ];
        for (path, expected) in cases {
            assert_eq!(SchemaKind::from_path(Path::new(path)), Some(expected), "{path}");
        }
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(SchemaKind::from_path(Path::new("/cache/groups.xml")), None);
        assert_eq!(SchemaKind::from_path(Path::new("/cache/SCHEDULEDTASKS.XML")), None);
        // The cache spells this one with a lowercase "t"; the camel-cased
        // variant is a different file.
        assert_eq!(SchemaKind::from_path(Path::new("/cache/ScheduledTasks.xml")), None);
    }

    #[test]
    fn test_unrelated_files_do_not_match() {
        assert_eq!(SchemaKind::from_path(Path::new("/cache/Registry.xml")), None);
        assert_eq!(SchemaKind::from_path(Path::new("/cache/notes.txt")), None);
    }

    #[test]
    fn test_match_is_substring_based() {
        // Mirrors the cache layout where the file name also appears as a
        // parent directory component.
        assert_eq!(
            SchemaKind::from_path(Path::new("/cache/Groups.xml/Groups.xml")),
            Some(SchemaKind::Groups)
        );
        assert_eq!(
            SchemaKind::from_path(Path::new("/cache/CopyOfDrives.xml")),
            Some(SchemaKind::Drives)
        );
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // A path mentioning two recognized names resolves to the earlier
        // entry in the priority table.
        assert_eq!(
            SchemaKind::from_path(Path::new("/cache/Services.xml/Groups.xml")),
            Some(SchemaKind::Groups)
        );
    }

    #[test]
    fn test_identity_attribute_varies_by_kind() {
        assert_eq!(SchemaKind::Groups.descriptor().identity_attr, "userName");
        assert_eq!(SchemaKind::Services.descriptor().identity_attr, "accountName");
        assert_eq!(SchemaKind::ScheduledTasks.descriptor().identity_attr, "runAs");
        assert_eq!(SchemaKind::DataSources.descriptor().identity_attr, "username");
        assert_eq!(SchemaKind::Printers.descriptor().identity_attr, "username");
        assert_eq!(SchemaKind::Drives.descriptor().identity_attr, "username");
    }

    #[test]
    fn test_only_groups_defines_a_rename_attribute() {
        for kind in SCHEMA_PRIORITY {
            let desc = kind.descriptor();
            assert_eq!(desc.rename_attr.is_some(), kind == SchemaKind::Groups);
            assert_eq!(desc.password_attr, "cpassword");
            assert_eq!(desc.changed_attr, "changed");
        }
    }
}
