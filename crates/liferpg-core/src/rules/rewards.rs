//! Goal tiers, reward deltas and level derivation.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Experience needed per level step.
pub const EXPERIENCE_PER_LEVEL: i64 = 100;

/// Level is derived from experience, never stored independently.
pub const fn level_for_experience(experience: i64) -> i64 {
    let experience = if experience < 0 { 0 } else { experience };
    experience / EXPERIENCE_PER_LEVEL + 1
}

/// Experience and currency delta credited to a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reward {
    pub experience: i64,
    pub bronze: i64,
    pub silver: i64,
    pub gold: i64,
}

impl Reward {
    pub const fn new(experience: i64, bronze: i64, silver: i64, gold: i64) -> Self {
        Self {
            experience,
            bronze,
            silver,
            gold,
        }
    }
}

impl Add for Reward {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            experience: self.experience + rhs.experience,
            bronze: self.bronze + rhs.bronze,
            silver: self.silver + rhs.silver,
            gold: self.gold + rhs.gold,
        }
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} XP, +{} bronze, +{} silver, +{} gold",
            self.experience, self.bronze, self.silver, self.gold
        )
    }
}

/// Difficulty tier of a player-authored goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    /// Reward credited when a goal of this tier is completed.
    pub const fn reward(self) -> Reward {
        match self {
            Self::Tier1 => Reward::new(10, 2, 0, 0),
            Self::Tier2 => Reward::new(20, 0, 2, 0),
            Self::Tier3 => Reward::new(30, 0, 0, 1),
        }
    }

    /// Numeric form stored in the `goals.tier` column.
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
        }
    }
}

impl TryFrom<i64> for Tier {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Self::Tier1),
            2 => Ok(Self::Tier2),
            3 => Ok(Self::Tier3),
            other => Err(Error::InvalidInput(format!(
                "tier must be 1, 2 or 3, got {other}"
            ))),
        }
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.strip_prefix("tier").unwrap_or(s);
        let value: i64 = digits
            .parse()
            .map_err(|_| Error::InvalidInput(format!("tier must be 1, 2 or 3, got '{s}'")))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier{}", self.as_i64())
    }
}
