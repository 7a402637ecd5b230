//! Subscription tiers: FREE < BASIC < ELITE.
//!
//! Access to a gated feature holds iff the current tier ranks at or above the
//! tier the feature requires.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription level gating feature access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    #[default]
    Free,
    Basic,
    Elite,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 3] = [Tier::Free, Tier::Basic, Tier::Elite];

    pub fn rank(self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Basic => 1,
            Tier::Elite => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "FREE",
            Tier::Basic => "BASIC",
            Tier::Elite => "ELITE",
        }
    }

    pub fn is_paid(self) -> bool {
        self != Tier::Free
    }
}

/// True when `current` unlocks features that require `required`.
pub fn has_access(current: Tier, required: Tier) -> bool {
    current.rank() >= required.rank()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subscription tier: {0:?} (expected FREE, BASIC or ELITE)")]
pub struct TierParseError(pub String);

impl FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FREE" => Ok(Tier::Free),
            "BASIC" => Ok(Tier::Basic),
            "ELITE" => Ok(Tier::Elite),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
