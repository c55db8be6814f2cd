//! Fixed game rules.
//!
//! Everything here is pure: reward tables, level derivation, achievement
//! predicates and the quest and skill catalogs. Persistence lives in the
//! engine crate.

pub mod achievements;
pub mod advice;
pub mod quests;
pub mod rewards;
pub mod shop;

pub use achievements::{ACHIEVEMENTS, AchievementDef, AchievementId, Criterion, PlayerStats};
pub use quests::{DAILY_QUEST_COUNT, QUEST_CATALOG, QuestPicker, QuestTemplate, RandomPicker};
pub use rewards::{Reward, Tier, level_for_experience};
pub use shop::{Price, SKILL_CATALOG, SkillOffer};
