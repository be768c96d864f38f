use serde::{Deserialize, Serialize};

use super::errors::{ProfileError, Result};

/// One profile as reported by the daemon.
///
/// JSON looks like `{ "name": "work", "is_active": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

impl ProfileRecord {
    pub fn new(name: impl Into<String>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            is_active,
        }
    }
}

/// The active record of a snapshot, if any.
pub fn active_profile(records: &[ProfileRecord]) -> Option<&ProfileRecord> {
    records.iter().find(|p| p.is_active)
}

/// Looks a record up by name.
pub fn find_profile<'a>(records: &'a [ProfileRecord], name: &str) -> Option<&'a ProfileRecord> {
    records.iter().find(|p| p.name == name)
}

/// Rejects empty and whitespace-only names before anything is sent.
pub(crate) fn validate_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(ProfileError::invalid("profile name cannot be empty"));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(
            validate_name("  "),
            Err(ProfileError::InvalidArgument(_))
        ));
        assert_eq!(validate_name("work").unwrap(), "work");
    }
}
