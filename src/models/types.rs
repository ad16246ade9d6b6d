//! Common domain type definitions
//!
//! Enum types shared across member and leaver records, plus the
//! classification rules that derive membership roles from source fields.

use std::fmt;

use serde::Serialize;

/// The source indicator of primary (paying) membership, value "Y" or
/// blank/absent
pub const PRINCIPAL_FLAG_YES: &str = "Y";

/// Sex of a member, normalized from the source column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
    /// Anything else, including blank
    Other,
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "M" | "MALE" => Self::Male,
            "F" | "FEMALE" => Self::Female,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "Other",
        };
        write!(f, "{label}")
    }
}

/// Coarse staff/dependent classification derived from the principal flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MemberType {
    /// Primary scheme member
    Staff,
    /// Anyone covered under a primary member
    Dependent,
}

impl MemberType {
    /// `Staff` iff the principal flag is exactly "Y"; blank or any other
    /// value classifies as `Dependent`
    #[must_use]
    pub fn from_flag(principal_flag: &str) -> Self {
        if principal_flag.trim() == PRINCIPAL_FLAG_YES {
            Self::Staff
        } else {
            Self::Dependent
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Staff => "Staff",
            Self::Dependent => "Dependent",
        };
        write!(f, "{label}")
    }
}

/// Relationship of a person to the scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipRole {
    /// Primary member under the staff/dependent layout
    Staff,
    /// Primary member under the full-list layout
    Member,
    /// Adult dependent (sex M or F, age 18 or over)
    Spouse,
    /// Any other dependent
    Child,
    /// Non-primary person under the full-list layout
    Dependent,
}

impl RelationshipRole {
    /// Classification for the nine-column layout, where no relationship
    /// column exists in the source.
    ///
    /// A null age never qualifies as adult, so an unparsable birth date
    /// classifies as `Child`.
    #[must_use]
    pub fn derive(principal_flag: &str, sex: Sex, age: Option<i64>) -> Self {
        if principal_flag.trim() == PRINCIPAL_FLAG_YES {
            Self::Staff
        } else if matches!(sex, Sex::Male | Sex::Female) && age.is_some_and(|a| a >= 18) {
            Self::Spouse
        } else {
            Self::Child
        }
    }

    /// Binary classification for the eleven-column layout. Ignores age and
    /// sex entirely and overrides whatever the raw relationship column held.
    #[must_use]
    pub fn declared(principal_flag: &str) -> Self {
        if principal_flag.trim() == PRINCIPAL_FLAG_YES {
            Self::Member
        } else {
            Self::Dependent
        }
    }
}

impl fmt::Display for RelationshipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Staff => "Staff",
            Self::Member => "Member",
            Self::Spouse => "Spouse",
            Self::Child => "Child",
            Self::Dependent => "Dependent",
        };
        write!(f, "{label}")
    }
}
