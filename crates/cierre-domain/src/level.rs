//! User hierarchy levels.

use serde::{Deserialize, Serialize};

/// Position in the management hierarchy.
///
/// Wire format: `u8` (1 = Admin … 4 = Contributor). Lower value means more
/// authority. A user's level must be numerically greater than their
/// manager's — the schema does not enforce this, the visibility policy
/// relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLevel {
    Admin = 1,
    TeamLeader = 2,
    Manager = 3,
    Contributor = 4,
}

impl UserLevel {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Admin),
            2 => Some(Self::TeamLeader),
            3 => Some(Self::Manager),
            4 => Some(Self::Contributor),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// True for level 1 only.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// True when `self` sits strictly above `other` in the hierarchy.
    pub fn outranks(self, other: Self) -> bool {
        self.as_u8() < other.as_u8()
    }
}
