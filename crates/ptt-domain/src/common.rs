//! Shared traits, identifiers, and the mode partition tag.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Associates entities with the personal/business partition.
pub trait Partitioned {
    fn mode(&self) -> Mode;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Partition tag separating personal and business financial data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[default]
    Personal,
    Business,
}

impl Mode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" | "p" => Some(Mode::Personal),
            "business" | "b" => Some(Mode::Business),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Personal => "Personal",
            Mode::Business => "Business",
        };
        f.write_str(label)
    }
}

/// Generates a fresh identifier with the given prefix, e.g. `tx-3f2a...`.
pub fn fresh_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Mode::Business).unwrap(),
            "\"BUSINESS\""
        );
        let parsed: Mode = serde_json::from_str("\"PERSONAL\"").unwrap();
        assert_eq!(parsed, Mode::Personal);
    }

    #[test]
    fn fresh_ids_are_prefixed_and_unique() {
        let a = fresh_id("tx");
        let b = fresh_id("tx");
        assert!(a.starts_with("tx-"));
        assert_ne!(a, b);
    }

    #[test]
    fn mode_parses_short_forms() {
        assert_eq!(Mode::from_str("b"), Some(Mode::Business));
        assert_eq!(Mode::from_str(" Personal "), Some(Mode::Personal));
        assert_eq!(Mode::from_str("family"), None);
    }
}
