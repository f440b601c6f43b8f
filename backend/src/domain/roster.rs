//! Draftable-player catalog types and the fixed roster composition.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of players a fantasy team drafts.
pub const ROSTER_SIZE: usize = 15;

/// Player position, ordered the way the catalog is presented: goalkeepers
/// first, attackers last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Role {
    /// Goalkeeper.
    #[serde(rename = "GK")]
    Goalkeeper,
    /// Defender.
    #[serde(rename = "DEF")]
    Defender,
    /// Midfielder.
    #[serde(rename = "MID")]
    Midfielder,
    /// Attacker.
    #[serde(rename = "ATT")]
    Attacker,
}

/// All roles in presentation order.
pub const ROLES: [Role; 4] = [
    Role::Goalkeeper,
    Role::Defender,
    Role::Midfielder,
    Role::Attacker,
];

impl Role {
    /// Stable storage code (`GK`, `DEF`, `MID`, `ATT`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::Defender => "DEF",
            Self::Midfielder => "MID",
            Self::Attacker => "ATT",
        }
    }

    /// Parse a storage code back into a role.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GK" => Some(Self::Goalkeeper),
            "DEF" => Some(Self::Defender),
            "MID" => Some(Self::Midfielder),
            "ATT" => Some(Self::Attacker),
            _ => None,
        }
    }

    /// How many players of this role a valid roster must contain.
    #[must_use]
    pub const fn quota(self) -> usize {
        match self {
            Self::Goalkeeper => 2,
            Self::Defender => 5,
            Self::Midfielder => 5,
            Self::Attacker => 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One draftable player as presented by the catalog: the player row joined
/// with its school's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPlayer {
    /// Player identifier.
    pub id: Uuid,
    /// Player display name.
    pub name: String,
    /// Roster position.
    pub role: Role,
    /// Name of the owning school.
    pub school_name: String,
    /// Draft cost in credits.
    pub value: i32,
}

/// The subset of player data the draft validator needs for a selected id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftPick {
    /// Player identifier.
    pub id: Uuid,
    /// Roster position.
    pub role: Role,
    /// Draft cost in credits.
    pub value: i32,
}
