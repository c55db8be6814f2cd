//! Plain-text rendering of engine results.

use liferpg_core::rules::SKILL_CATALOG;
use liferpg_core::rules::rewards::EXPERIENCE_PER_LEVEL;
use liferpg_engine::GameError;
use liferpg_engine::storage::{
    AchievementRecord, CompletionReport, DailyQuest, Goal, Profile, SkillRecord,
};

pub fn profile(profile: &Profile) -> String {
    let p = &profile.player;
    let skills = if profile.skills.is_empty() {
        "none".to_string()
    } else {
        profile.skills.join(", ")
    };
    [
        format!("Player {}", p.id),
        format!(
            "Level {} ({} XP, next level at {})",
            p.level,
            p.experience,
            p.level * EXPERIENCE_PER_LEVEL
        ),
        format!("Coins: {} bronze, {} silver, {} gold", p.bronze, p.silver, p.gold),
        format!("Goals completed: {}", p.total_completed_goals),
        format!("Skills: {skills}"),
        format!("Achievements: {}", profile.achievement_count),
    ]
    .join("\n")
}

pub fn goals(goals: &[Goal], empty: &str) -> String {
    if goals.is_empty() {
        return empty.to_string();
    }
    goals
        .iter()
        .map(|g| {
            let tier = g.tier().map_or_else(|| g.tier.to_string(), |t| t.to_string());
            let mark = if g.completed { "x" } else { " " };
            format!("[{mark}] #{} {} ({tier})", g.id, g.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn quests(quests: &[DailyQuest]) -> String {
    quests
        .iter()
        .map(|q| {
            let mark = if q.completed { "x" } else { " " };
            format!("{}. [{mark}] {} ({})", q.slot, q.quest_text, q.reward())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reward line plus one line per achievement unlocked with it.
pub fn completion(what: &str, report: &CompletionReport) -> String {
    let mut lines = vec![format!("{what} completed: {}", report.reward)];
    for unlocked in &report.unlocked {
        lines.push(format!(
            "Achievement unlocked: {} - {} ({})",
            unlocked.id,
            unlocked.id.def().description,
            unlocked.reward
        ));
    }
    lines.join("\n")
}

pub fn achievements(records: &[AchievementRecord]) -> String {
    if records.is_empty() {
        return "No achievements yet".to_string();
    }
    records
        .iter()
        .map(|r| match r.id() {
            Some(id) => format!("{id} - {}", id.def().description),
            None => r.achievement_name.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn skills(records: &[SkillRecord]) -> String {
    if records.is_empty() {
        return "No skills yet".to_string();
    }
    records
        .iter()
        .map(|s| {
            format!(
                "{} (paid {} bronze, {} silver, {} gold)",
                s.skill_name, s.cost_bronze, s.cost_silver, s.cost_gold
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The shop catalog, marking skills the player already owns.
pub fn shop(owned: &[SkillRecord]) -> String {
    SKILL_CATALOG
        .iter()
        .map(|offer| {
            let owned = owned.iter().any(|s| s.skill_name == offer.name);
            let suffix = if owned { " [owned]" } else { "" };
            format!("{}: {} - {}{suffix}", offer.key, offer.name, offer.price)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User-facing text for an expected, non-fatal outcome.
pub fn rejection(err: &GameError) -> String {
    match err {
        GameError::NotFound(what) => {
            format!("Not found: {what}. Run `liferpg start` if this is a new player.")
        }
        GameError::AlreadyCompleted(what) => format!("{what} is already completed"),
        GameError::InsufficientFunds(what) => format!("Not enough coins: {what}"),
        GameError::AlreadyOwned(skill) => format!("You already own {skill}"),
        GameError::InvalidInput(msg) => format!("Invalid input: {msg}"),
        GameError::StorageUnavailable(msg) => format!("Storage unavailable: {msg}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liferpg_core::rules::{AchievementId, Reward};
    use liferpg_engine::storage::{Player, UnlockedAchievement};

    fn player() -> Player {
        Player {
            id: 7,
            experience: 160,
            level: 2,
            bronze: 4,
            silver: 1,
            gold: 0,
            total_completed_goals: 3,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn owned(name: &str) -> SkillRecord {
        SkillRecord {
            player_id: 7,
            skill_name: name.to_string(),
            cost_bronze: 30,
            cost_silver: 20,
            cost_gold: 5,
            purchased_at: 0,
        }
    }

    #[test]
    fn profile_lists_skills() {
        let text = profile(&Profile {
            player: player(),
            skills: vec!["Memory".to_string()],
            achievement_count: 1,
        });
        assert!(text.contains("Level 2 (160 XP, next level at 200)"));
        assert!(text.contains("Skills: Memory"));
        assert!(text.contains("Achievements: 1"));
    }

    #[test]
    fn completion_names_unlocked_achievements() {
        let report = CompletionReport {
            reward: Reward::new(10, 2, 0, 0),
            unlocked: vec![UnlockedAchievement {
                id: AchievementId::Novice,
                reward: Reward::new(50, 5, 0, 0),
                achieved_at: 0,
            }],
        };
        let text = completion("Goal #1", &report);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("Goal #1 completed: +10 XP"));
        assert!(text.contains("Achievement unlocked: Novice"));
    }

    #[test]
    fn shop_marks_owned_skills() {
        let text = shop(&[owned("Memory")]);
        assert!(text.contains("memory: Memory - 30 bronze, 20 silver, 5 gold [owned]"));
        assert!(text.contains("logic: Logic - 50 bronze, 30 silver, 10 gold\n"));
    }

    #[test]
    fn empty_lists_have_placeholders() {
        assert_eq!(goals(&[], "No active goals"), "No active goals");
        assert_eq!(achievements(&[]), "No achievements yet");
        assert_eq!(skills(&[]), "No skills yet");
    }
}
