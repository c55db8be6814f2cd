//! Boundary parsing for front-end input.
//!
//! Button payloads and free-text goal entries are turned into typed values
//! here, before anything reaches the engine.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::rules::Tier;
use crate::rules::shop::{self, SkillOffer};

/// Longest goal title accepted, in characters.
pub const MAX_TITLE_CHARS: usize = 256;

/// A player action carried by a button payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `complete_<goal_id>`
    CompleteGoal { goal_id: i64 },
    /// `quest_<index>`, index into today's set in slot order
    CompleteQuest { index: u32 },
    /// `buy_<skill_key>`
    BuySkill { skill: &'static SkillOffer },
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(payload: &str) -> Result<Self> {
        let (kind, arg) = payload
            .split_once('_')
            .ok_or_else(|| Error::InvalidInput(format!("malformed payload '{payload}'")))?;

        match kind {
            "complete" => {
                let goal_id = arg
                    .parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .ok_or_else(|| Error::InvalidInput(format!("bad goal id in '{payload}'")))?;
                Ok(Self::CompleteGoal { goal_id })
            }
            "quest" => {
                let index = arg
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidInput(format!("bad quest index in '{payload}'")))?;
                Ok(Self::CompleteQuest { index })
            }
            "buy" => Ok(Self::BuySkill {
                skill: shop::offer(arg)?,
            }),
            _ => Err(Error::InvalidInput(format!("unknown action '{payload}'"))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompleteGoal { goal_id } => write!(f, "complete_{goal_id}"),
            Self::CompleteQuest { index } => write!(f, "quest_{index}"),
            Self::BuySkill { skill } => write!(f, "buy_{}", skill.key),
        }
    }
}

/// Trim and check a goal title.
pub fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("goal title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(Error::InvalidInput(format!(
            "goal title longer than {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}

/// Parse `"<title> | <tier>"` free-text goal entry.
pub fn parse_goal_input(input: &str) -> Result<(String, Tier)> {
    let (title, tier) = input.rsplit_once('|').ok_or_else(|| {
        Error::InvalidInput("expected '<title> | <tier>' with tier 1, 2 or 3".into())
    })?;
    let tier: Tier = tier.parse()?;
    Ok((validate_title(title)?, tier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_payloads() {
        assert_eq!(
            "complete_42".parse::<Action>().unwrap(),
            Action::CompleteGoal { goal_id: 42 }
        );
        assert_eq!(
            "quest_2".parse::<Action>().unwrap(),
            Action::CompleteQuest { index: 2 }
        );
        match "buy_memory".parse::<Action>().unwrap() {
            Action::BuySkill { skill } => assert_eq!(skill.name, "Memory"),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_payloads() {
        for payload in [
            "", "complete", "complete_", "complete_x", "complete_-3", "quest_-1", "buy_wings",
            "delete_1",
        ] {
            assert!(payload.parse::<Action>().is_err(), "{payload} should fail");
        }
    }

    #[test]
    fn payload_display_roundtrips() {
        for payload in ["complete_7", "quest_0", "buy_logic"] {
            assert_eq!(payload.parse::<Action>().unwrap().to_string(), payload);
        }
    }

    #[test]
    fn goal_input_splits_title_and_tier() {
        let (title, tier) = parse_goal_input("  Run 5k | 3 ").unwrap();
        assert_eq!(title, "Run 5k");
        assert_eq!(tier, Tier::Tier3);
    }

    #[test]
    fn goal_input_errors() {
        assert!(parse_goal_input("no tier here").is_err());
        assert!(parse_goal_input("Run | 5").is_err());
        assert!(parse_goal_input("   | 1").is_err());
        assert!(parse_goal_input(&format!("{} | 1", "x".repeat(MAX_TITLE_CHARS + 1))).is_err());
    }
}
