//! Department-code resolution and tracking-ID composition.
//!
//! Resolution order is fixed: an administrator-managed directory entry
//! wins, the static table below is consulted only when the directory has
//! no code for the name. Both lookups are case-insensitive.

use std::fmt;

use crate::models::option::DirectoryOption;

/// Organization prefix of every tracking ID.
pub const TRACKING_PREFIX: &str = "4649";

/// Well-known departments and their codes.
pub const FALLBACK_CODES: &[(&str, &str)] = &[
    ("computer engineering", "24510"),
    ("computer science", "24510"),
    ("civil engineering", "19110"),
    ("electrical engineering", "29310"),
    ("mechanical engineering", "61210"),
];

/// Look a department name up in [`FALLBACK_CODES`].
pub fn fallback_code(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    FALLBACK_CODES
        .iter()
        .find(|(dept, _)| *dept == key)
        .map(|(_, code)| *code)
}

/// Pick the code for `name` given what the directory returned.
pub fn resolve_code(directory_entry: Option<&DirectoryOption>, name: &str) -> Option<String> {
    directory_entry
        .and_then(|entry| entry.kind.code())
        .filter(|code| !code.is_empty())
        .map(str::to_owned)
        .or_else(|| fallback_code(name).map(str::to_owned))
}

/// Counter key for a department code.
pub fn counter_key(code: &str) -> String {
    format!("complaint_{code}")
}

/// A freshly issued tracking identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingId {
    pub department_code: String,
    pub sequence: u64,
}

impl TrackingId {
    pub fn new(department_code: impl Into<String>, sequence: u64) -> Self {
        Self {
            department_code: department_code.into(),
            sequence,
        }
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TRACKING_PREFIX}{}{}", self.department_code, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::option::OptionKind;

    fn department(value: &str, code: Option<&str>) -> DirectoryOption {
        DirectoryOption {
            id: Uuid::new_v4(),
            kind: OptionKind::Department {
                value: value.into(),
                code: code.map(Into::into),
            },
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn composition_is_prefix_code_sequence() {
        assert_eq!(TrackingId::new("24510", 7).to_string(), "4649245107");
        assert_eq!(TrackingId::new("24510", 3).to_string(), "4649245103");
        assert_eq!(TrackingId::new("19110", 12).to_string(), "46491911012");
    }

    #[test]
    fn fallback_is_case_insensitive() {
        assert_eq!(fallback_code("Civil Engineering"), Some("19110"));
        assert_eq!(fallback_code("  COMPUTER engineering "), Some("24510"));
        assert_eq!(fallback_code("Information Technology"), None);
    }

    #[test]
    fn directory_takes_precedence_over_fallback() {
        let entry = department("Civil Engineering", Some("77777"));
        assert_eq!(
            resolve_code(Some(&entry), "Civil Engineering").as_deref(),
            Some("77777")
        );
    }

    #[test]
    fn directory_entry_without_code_falls_back() {
        let entry = department("Civil Engineering", None);
        assert_eq!(
            resolve_code(Some(&entry), "Civil Engineering").as_deref(),
            Some("19110")
        );
    }

    #[test]
    fn unknown_department_resolves_to_none() {
        let entry = department("Information Technology", None);
        assert_eq!(resolve_code(Some(&entry), "Information Technology"), None);
        assert_eq!(resolve_code(None, "Philosophy"), None);
    }

    #[test]
    fn counter_key_embeds_code() {
        assert_eq!(counter_key("24510"), "complaint_24510");
    }
}
