//! Access roles for role-scoped retrieval.
//!
//! A role identifies the access silo a query runs under. The backend
//! enforces the actual document-level permissions; this module owns the
//! closed enumeration, the exhaustive role → permission-group mapping
//! sent on the wire, and the display metadata attached to each role.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clearance level attached to a role, exposed for display purposes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Clearance {
    /// Restricted data partition.
    Restricted,
    /// Internal data partition.
    Internal,
    /// No restriction.
    Unrestricted,
}

/// An access silo determining which backend data a query may retrieve.
///
/// The enumeration is closed: every variant has exactly one
/// permission-group identifier, enforced by the exhaustive `match` in
/// [`Role::permission_group`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// P&L, audits and tax records.
    #[default]
    Finance,
    /// Ad spend and ROI metrics.
    Marketing,
    /// Payroll and benefit structures.
    Hr,
    /// Product development and roadmaps.
    Engineering,
    /// General info and news.
    General,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 5] = [
        Self::Finance,
        Self::Marketing,
        Self::Hr,
        Self::Engineering,
        Self::General,
    ];

    /// The backend permission-group identifier sent verbatim on the wire.
    #[must_use]
    pub const fn permission_group(self) -> &'static str {
        match self {
            Self::Finance => "Finance_Team",
            Self::Marketing => "Marketing_Team",
            Self::Hr => "HR_Team",
            Self::Engineering => "Engineering_Department",
            Self::General => "Employee_Level",
        }
    }

    /// Stable lowercase key, used by [`fmt::Display`] and [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Marketing => "marketing",
            Self::Hr => "hr",
            Self::Engineering => "engineering",
            Self::General => "general",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Finance => "Finance",
            Self::Marketing => "Marketing",
            Self::Hr => "HR",
            Self::Engineering => "Engineering",
            Self::General => "General",
        }
    }

    /// One-line description of the silo's contents.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Finance => "P&L, audits & tax records",
            Self::Marketing => "Ad spend & ROI metrics",
            Self::Hr => "Payroll & benefit structures",
            Self::Engineering => "Product dev & roadmaps",
            Self::General => "General info & news",
        }
    }

    /// Clearance level of the silo.
    #[must_use]
    pub const fn clearance(self) -> Clearance {
        match self {
            Self::Finance | Self::Marketing | Self::General => Clearance::Internal,
            Self::Hr | Self::Engineering => Clearance::Restricted,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finance" => Ok(Self::Finance),
            "marketing" => Ok(Self::Marketing),
            "hr" => Ok(Self::Hr),
            "engineering" => Ok(Self::Engineering),
            "general" => Ok(Self::General),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_permission_mapping_is_exhaustive_and_distinct() {
        let groups: HashSet<&str> = Role::ALL.iter().map(|r| r.permission_group()).collect();
        assert_eq!(groups.len(), Role::ALL.len());
        for role in Role::ALL {
            assert!(!role.permission_group().is_empty());
        }
    }

    #[test]
    fn test_mapping_values() {
        assert_eq!(Role::Finance.permission_group(), "Finance_Team");
        assert_eq!(Role::Marketing.permission_group(), "Marketing_Team");
        assert_eq!(Role::Hr.permission_group(), "HR_Team");
        assert_eq!(Role::Engineering.permission_group(), "Engineering_Department");
        assert_eq!(Role::General.permission_group(), "Employee_Level");
    }

    #[test]
    fn test_parse_display_round_trip() {
        for role in Role::ALL {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("HR".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("  Finance ".parse::<Role>().unwrap(), Role::Finance);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("c-level".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Role::Engineering).unwrap();
        assert_eq!(json, "\"engineering\"");
        let back: Role = serde_json::from_str("\"hr\"").unwrap();
        assert_eq!(back, Role::Hr);
    }

    #[test]
    fn test_default_role_is_finance() {
        assert_eq!(Role::default(), Role::Finance);
    }

    #[test]
    fn test_clearance_levels() {
        assert_eq!(Role::Hr.clearance(), Clearance::Restricted);
        assert_eq!(Role::General.clearance(), Clearance::Internal);
    }
}
