//! Achievement definitions and unlock predicates.
//!
//! The table is ordered; evaluation walks it top to bottom and every
//! predicate is checked against the same snapshot of player state, so
//! crediting one achievement never gates another within a single pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rewards::{Reward, level_for_experience};
use crate::error::{Error, Result};

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    Novice,
    Worker,
    Master,
    Legend,
    Level5,
    Level10,
    Milestone1000,
}

impl AchievementId {
    /// Name stored in the `achievements` table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Worker => "Worker",
            Self::Master => "Master",
            Self::Legend => "Legend",
            Self::Level5 => "Level5",
            Self::Level10 => "Level10",
            Self::Milestone1000 => "Milestone1000",
        }
    }

    pub fn def(self) -> &'static AchievementDef {
        // ACHIEVEMENTS is declared in the same order as the enum.
        &ACHIEVEMENTS[self as usize]
    }
}

impl FromStr for AchievementId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ACHIEVEMENTS
            .iter()
            .map(|def| def.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown achievement '{s}'")))
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate player state the predicates look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub experience: i64,
    pub level: i64,
    pub total_completed_goals: i64,
}

impl PlayerStats {
    pub const fn new(experience: i64, total_completed_goals: i64) -> Self {
        Self {
            experience,
            level: level_for_experience(experience),
            total_completed_goals,
        }
    }
}

/// Threshold an achievement waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    CompletedGoals(i64),
    Level(i64),
    Experience(i64),
}

impl Criterion {
    pub const fn is_met(self, stats: &PlayerStats) -> bool {
        match self {
            Self::CompletedGoals(n) => stats.total_completed_goals >= n,
            Self::Level(n) => stats.level >= n,
            Self::Experience(n) => stats.experience >= n,
        }
    }
}

/// Achievement metadata with its one-time reward.
#[derive(Debug)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub description: &'static str,
    pub criterion: Criterion,
    pub reward: Reward,
}

/// All achievements, in evaluation order.
pub static ACHIEVEMENTS: [AchievementDef; 7] = [
    AchievementDef {
        id: AchievementId::Novice,
        description: "Complete your first goal",
        criterion: Criterion::CompletedGoals(1),
        reward: Reward::new(50, 5, 0, 0),
    },
    AchievementDef {
        id: AchievementId::Worker,
        description: "Complete 10 goals",
        criterion: Criterion::CompletedGoals(10),
        reward: Reward::new(100, 10, 5, 0),
    },
    AchievementDef {
        id: AchievementId::Master,
        description: "Complete 50 goals",
        criterion: Criterion::CompletedGoals(50),
        reward: Reward::new(300, 20, 10, 5),
    },
    AchievementDef {
        id: AchievementId::Legend,
        description: "Complete 100 goals",
        criterion: Criterion::CompletedGoals(100),
        reward: Reward::new(500, 50, 25, 10),
    },
    AchievementDef {
        id: AchievementId::Level5,
        description: "Reach level 5",
        criterion: Criterion::Level(5),
        reward: Reward::new(100, 10, 5, 1),
    },
    AchievementDef {
        id: AchievementId::Level10,
        description: "Reach level 10",
        criterion: Criterion::Level(10),
        reward: Reward::new(200, 20, 10, 3),
    },
    AchievementDef {
        id: AchievementId::Milestone1000,
        description: "Accumulate 1000 experience",
        criterion: Criterion::Experience(1000),
        reward: Reward::new(300, 30, 15, 5),
    },
];

/// Achievements whose predicate holds for `stats` and that are not in
/// `unlocked` yet, in table order.
pub fn newly_met(stats: &PlayerStats, unlocked: &[String]) -> Vec<&'static AchievementDef> {
    ACHIEVEMENTS
        .iter()
        .filter(|def| def.criterion.is_met(stats))
        .filter(|def| !unlocked.iter().any(|name| name == def.id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_enum() {
        for (i, def) in ACHIEVEMENTS.iter().enumerate() {
            assert_eq!(def.id as usize, i);
            assert_eq!(def.id.def().id, def.id);
        }
    }

    #[test]
    fn fresh_player_meets_nothing() {
        assert!(newly_met(&PlayerStats::new(0, 0), &[]).is_empty());
    }

    #[test]
    fn first_goal_unlocks_novice_only() {
        let met = newly_met(&PlayerStats::new(10, 1), &[]);
        assert_eq!(met.len(), 1);
        assert_eq!(met[0].id, AchievementId::Novice);
        assert_eq!(met[0].reward, Reward::new(50, 5, 0, 0));
    }

    #[test]
    fn already_unlocked_are_skipped() {
        let unlocked = vec!["Novice".to_string()];
        assert!(newly_met(&PlayerStats::new(60, 3), &unlocked).is_empty());
    }

    #[test]
    fn independent_predicates_unlock_together() {
        // 1000 XP is level 11 and clears every experience-based threshold.
        let met: Vec<_> = newly_met(&PlayerStats::new(1000, 10), &[])
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(
            met,
            vec![
                AchievementId::Novice,
                AchievementId::Worker,
                AchievementId::Level5,
                AchievementId::Level10,
                AchievementId::Milestone1000,
            ]
        );
    }

    #[test]
    fn names_parse_back() {
        for def in &ACHIEVEMENTS {
            assert_eq!(def.id.as_str().parse::<AchievementId>().unwrap(), def.id);
        }
        assert!("Hero".parse::<AchievementId>().is_err());
    }
}
