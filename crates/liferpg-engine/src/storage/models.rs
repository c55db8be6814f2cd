//! Data models for `LifeRPG` storage.

use chrono::NaiveDate;
use liferpg_core::rules::{AchievementId, PlayerStats, Price, Reward, Tier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub experience: i64,
    /// Generated column, always `experience / 100 + 1`.
    pub level: i64,
    pub bronze: i64,
    pub silver: i64,
    pub gold: i64,
    pub total_completed_goals: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Player {
    pub const fn stats(&self) -> PlayerStats {
        PlayerStats::new(self.experience, self.total_completed_goals)
    }

    pub const fn balance(&self) -> Price {
        Price::new(self.bronze, self.silver, self.gold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Goal {
    pub id: i64,
    pub player_id: i64,
    pub title: String,
    pub tier: i64,
    pub completed: bool,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

impl Goal {
    /// `None` only if the row predates the tier CHECK constraint.
    pub fn tier(&self) -> Option<Tier> {
        Tier::try_from(self.tier).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyQuest {
    pub id: i64,
    pub player_id: i64,
    /// ISO `YYYY-MM-DD`.
    pub quest_date: String,
    pub slot: i64,
    pub quest_key: String,
    pub quest_text: String,
    pub completed: bool,
    pub reward_experience: i64,
    pub reward_bronze: i64,
    pub reward_silver: i64,
    pub reward_gold: i64,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

impl DailyQuest {
    pub const fn reward(&self) -> Reward {
        Reward::new(
            self.reward_experience,
            self.reward_bronze,
            self.reward_silver,
            self.reward_gold,
        )
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.quest_date.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SkillRecord {
    pub player_id: i64,
    pub skill_name: String,
    pub cost_bronze: i64,
    pub cost_silver: i64,
    pub cost_gold: i64,
    pub purchased_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AchievementRecord {
    pub player_id: i64,
    pub achievement_name: String,
    pub achieved_at: i64,
}

impl AchievementRecord {
    pub fn id(&self) -> Option<AchievementId> {
        self.achievement_name.parse().ok()
    }
}

/// Player row plus the owned skills and number of unlocked achievements.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub player: Player,
    pub skills: Vec<String>,
    pub achievement_count: i64,
}

/// An achievement unlocked (and credited) by the current call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnlockedAchievement {
    pub id: AchievementId,
    pub reward: Reward,
    pub achieved_at: i64,
}

/// Result of a successful goal or quest completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    /// Reward of the completed unit itself.
    pub reward: Reward,
    /// Achievements unlocked in the same transaction, in table order.
    pub unlocked: Vec<UnlockedAchievement>,
}

impl CompletionReport {
    /// Everything credited by the transaction, achievement rewards included.
    pub fn total_credited(&self) -> Reward {
        self.unlocked
            .iter()
            .fold(self.reward, |acc, a| acc + a.reward)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalCompletion {
    Completed(CompletionReport),
    AlreadyCompleted,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestCompletion {
    Completed(CompletionReport),
    AlreadyCompleted,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillPurchase {
    /// Debited; carries the balance left afterwards.
    Purchased { remaining: Price },
    AlreadyOwned,
    InsufficientFunds,
}
