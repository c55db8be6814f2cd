//! Subcommands and their mapping onto `GameService` operations.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::{self, Write};

use chrono::NaiveDate;
use liferpg_core::rules::{Price, Tier};
use liferpg_core::{Action, parse_goal_input};
use liferpg_engine::{ActionOutcome, GameError, GameService};

use crate::render;

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Register the player (if new) and show the profile.
    Start,
    /// Show level, coins, skills and achievement count.
    Profile,
    /// Get a motivational tip.
    Advice,
    /// Add a goal: `add-goal Read a book --tier 2` or `add-goal "Read a book | 2"`.
    AddGoal {
        /// Goal title, or `title | tier` when --tier is omitted.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Difficulty tier (1, 2 or 3).
        #[arg(short, long)]
        tier: Option<Tier>,
    },
    /// List active goals.
    Goals,
    /// List completed goals, newest first.
    History {
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Complete a goal by ID.
    Complete { goal_id: i64 },
    /// Show the daily quests, generating them on first request.
    Quests {
        /// Quest date (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Complete a daily quest by its index in the day's list.
    CompleteQuest {
        index: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List unlocked achievements.
    Achievements,
    /// Re-check achievement criteria and credit anything newly met.
    Evaluate,
    /// Show the skill shop.
    Shop,
    /// Buy a skill from the shop by key.
    Buy { key: String },
    /// Buy a skill at an explicit price.
    BuyCustom {
        name: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        bronze: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        silver: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        gold: i64,
    },
    /// List owned skills.
    Skills,
    /// Run a button payload such as `complete_3`, `quest_0` or `buy_logic`.
    Action { payload: String },
}

/// Execute a subcommand for `player_id` and print the result.
///
/// Expected outcomes (already completed, not enough coins, ...) are printed
/// as messages. Only storage failures propagate as errors.
pub async fn run(command: Command, service: &GameService, player_id: i64) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match execute(command, service, player_id).await {
        Ok(text) => writeln!(out, "{text}")?,
        Err(e) if !e.is_storage_failure() => writeln!(out, "{}", render::rejection(&e))?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn execute(
    command: Command,
    service: &GameService,
    player_id: i64,
) -> Result<String, GameError> {
    match command {
        Command::Start => {
            service.create_or_get_player(player_id).await?;
            let profile = service.get_profile(player_id).await?;
            Ok(format!(
                "Welcome to LifeRPG!\n{}",
                render::profile(&profile)
            ))
        }
        Command::Profile => Ok(render::profile(&service.get_profile(player_id).await?)),
        Command::Advice => service.get_advice(player_id).await,
        Command::AddGoal { text, tier } => {
            let joined = text.join(" ");
            let (title, tier) = match tier {
                Some(tier) => (joined, tier),
                None => parse_goal_input(&joined)?,
            };
            let goal = service.add_goal(player_id, &title, tier).await?;
            Ok(format!(
                "Goal #{} added: {} ({}, {})",
                goal.id,
                goal.title,
                tier,
                tier.reward()
            ))
        }
        Command::Goals => {
            let goals = service.list_active_goals(player_id).await?;
            Ok(render::goals(&goals, "No active goals"))
        }
        Command::History { limit } => {
            let goals = service.list_completed_goals(player_id, limit).await?;
            Ok(render::goals(&goals, "No completed goals yet"))
        }
        Command::Complete { goal_id } => {
            let report = service.complete_goal(goal_id, player_id).await?;
            Ok(render::completion(&format!("Goal #{goal_id}"), &report))
        }
        Command::Quests { date } => {
            let date = date.unwrap_or_else(|| service.today());
            let quests = service.get_daily_quests(player_id, date).await?;
            Ok(format!("Quests for {date}\n{}", render::quests(&quests)))
        }
        Command::CompleteQuest { index, date } => {
            let date = date.unwrap_or_else(|| service.today());
            let report = service.complete_daily_quest(player_id, date, index).await?;
            Ok(render::completion(&format!("Quest {index}"), &report))
        }
        Command::Achievements => {
            let records = service.list_achievements(player_id).await?;
            Ok(render::achievements(&records))
        }
        Command::Evaluate => {
            let unlocked = service.evaluate_achievements(player_id).await?;
            if unlocked.is_empty() {
                return Ok("No new achievements".to_string());
            }
            Ok(unlocked
                .iter()
                .map(|a| format!("Achievement unlocked: {} ({})", a.id, a.reward))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Shop => {
            let owned = service.list_skills(player_id).await?;
            Ok(render::shop(&owned))
        }
        Command::Buy { key } => {
            let remaining = service.purchase_catalog_skill(player_id, &key).await?;
            Ok(format!("Bought {key}. Remaining: {remaining}"))
        }
        Command::BuyCustom {
            name,
            bronze,
            silver,
            gold,
        } => {
            let remaining = service
                .purchase_skill(player_id, &name, Price::new(bronze, silver, gold))
                .await?;
            Ok(format!("Bought {name}. Remaining: {remaining}"))
        }
        Command::Skills => Ok(render::skills(&service.list_skills(player_id).await?)),
        Command::Action { payload } => {
            let action: Action = payload.parse()?;
            Ok(match service.handle_action(player_id, action).await? {
                ActionOutcome::GoalCompleted(report) => render::completion("Goal", &report),
                ActionOutcome::QuestCompleted(report) => render::completion("Quest", &report),
                ActionOutcome::SkillPurchased { skill, remaining } => {
                    format!("Bought {}. Remaining: {remaining}", skill.name)
                }
            })
        }
    }
}
