//! `GameService`: the operations the front end calls.
//!
//! Each method is one unit of work. Input is validated here, state changes
//! happen in a single storage transaction, and the outcome comes back as a
//! typed value or a `GameError`.

use std::sync::Arc;

use chrono::NaiveDate;
use liferpg_core::command::{Action, validate_title};
use liferpg_core::config::{DayBoundary, QuestConfig};
use liferpg_core::rules::advice::random_advice;
use liferpg_core::rules::quests::draw_daily_set;
use liferpg_core::rules::shop::{self, SkillOffer};
use liferpg_core::rules::{Price, QuestPicker, RandomPicker, Tier};
use tracing::{debug, instrument};

use crate::error::GameError;
use crate::storage::{
    AchievementRecord, CompletionReport, DailyQuest, GameDatabase, Goal, GoalCompletion, Player,
    Profile, QuestCompletion, SkillPurchase, SkillRecord, UnlockedAchievement,
};

/// Result of dispatching a button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    GoalCompleted(CompletionReport),
    QuestCompleted(CompletionReport),
    SkillPurchased {
        skill: &'static SkillOffer,
        remaining: Price,
    },
}

#[derive(Clone)]
pub struct GameService {
    db: GameDatabase,
    picker: Arc<dyn QuestPicker>,
    day_boundary: DayBoundary,
}

impl GameService {
    pub fn new(db: GameDatabase, quests: &QuestConfig) -> Self {
        Self {
            db,
            picker: Arc::new(RandomPicker),
            day_boundary: quests.day_boundary,
        }
    }

    /// Replace the quest sampler (tests use a fixed one).
    #[must_use]
    pub fn with_picker(mut self, picker: Arc<dyn QuestPicker>) -> Self {
        self.picker = picker;
        self
    }

    pub const fn database(&self) -> &GameDatabase {
        &self.db
    }

    /// Today's date on the configured day boundary.
    pub fn today(&self) -> NaiveDate {
        self.day_boundary.today()
    }

    async fn require_player(&self, player_id: i64) -> Result<Player, GameError> {
        Ok(self.db.get_player(player_id).await?)
    }

    // =========================================================================
    // Players
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn create_or_get_player(&self, player_id: i64) -> Result<Player, GameError> {
        Ok(self.db.create_or_get_player(player_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, player_id: i64) -> Result<Profile, GameError> {
        Ok(self.db.get_profile(player_id).await?)
    }

    /// A motivational tip drawn for the player's current progress.
    #[instrument(skip(self))]
    pub async fn get_advice(&self, player_id: i64) -> Result<String, GameError> {
        let player = self.require_player(player_id).await?;
        Ok(random_advice(&player.stats()))
    }

    // =========================================================================
    // Goals
    // =========================================================================

    #[instrument(skip(self, title))]
    pub async fn add_goal(
        &self,
        player_id: i64,
        title: &str,
        tier: Tier,
    ) -> Result<Goal, GameError> {
        let title = validate_title(title)?;
        self.require_player(player_id).await?;
        Ok(self.db.add_goal(player_id, &title, tier).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_active_goals(&self, player_id: i64) -> Result<Vec<Goal>, GameError> {
        self.require_player(player_id).await?;
        Ok(self.db.list_active_goals(player_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_completed_goals(
        &self,
        player_id: i64,
        limit: u32,
    ) -> Result<Vec<Goal>, GameError> {
        self.require_player(player_id).await?;
        Ok(self.db.list_completed_goals(player_id, limit).await?)
    }

    /// Complete a goal exactly once. Achievements unlocked by the new totals
    /// are credited in the same transaction and reported alongside.
    #[instrument(skip(self))]
    pub async fn complete_goal(
        &self,
        goal_id: i64,
        player_id: i64,
    ) -> Result<CompletionReport, GameError> {
        match self.db.complete_goal(goal_id, player_id).await? {
            GoalCompletion::Completed(report) => Ok(report),
            GoalCompletion::AlreadyCompleted => {
                Err(GameError::AlreadyCompleted(format!("Goal {goal_id}")))
            }
            GoalCompletion::NotFound => Err(GameError::NotFound(format!(
                "Goal {goal_id} for player {player_id}"
            ))),
        }
    }

    // =========================================================================
    // Daily quests
    // =========================================================================

    /// Generate the day's set unless one exists. Returns whether it was
    /// generated by this call.
    #[instrument(skip(self))]
    pub async fn ensure_daily_quests(
        &self,
        player_id: i64,
        date: NaiveDate,
    ) -> Result<bool, GameError> {
        self.require_player(player_id).await?;
        let set = draw_daily_set(self.picker.as_ref())?;
        Ok(self.db.ensure_daily_quests(player_id, date, &set).await?)
    }

    /// The day's quests in slot order, generating them on first request.
    #[instrument(skip(self))]
    pub async fn get_daily_quests(
        &self,
        player_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<DailyQuest>, GameError> {
        self.ensure_daily_quests(player_id, date).await?;
        Ok(self.db.list_daily_quests(player_id, date).await?)
    }

    #[instrument(skip(self))]
    pub async fn complete_daily_quest(
        &self,
        player_id: i64,
        date: NaiveDate,
        index: u32,
    ) -> Result<CompletionReport, GameError> {
        match self
            .db
            .complete_daily_quest(player_id, date, i64::from(index))
            .await?
        {
            QuestCompletion::Completed(report) => Ok(report),
            QuestCompletion::AlreadyCompleted => Err(GameError::AlreadyCompleted(format!(
                "Quest {index} on {date}"
            ))),
            QuestCompletion::NotFound => Err(GameError::NotFound(format!(
                "Quest {index} on {date} for player {player_id}"
            ))),
        }
    }

    // =========================================================================
    // Achievements
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn evaluate_achievements(
        &self,
        player_id: i64,
    ) -> Result<Vec<UnlockedAchievement>, GameError> {
        Ok(self.db.evaluate_achievements(player_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_achievements(
        &self,
        player_id: i64,
    ) -> Result<Vec<AchievementRecord>, GameError> {
        self.require_player(player_id).await?;
        Ok(self.db.list_achievements(player_id).await?)
    }

    // =========================================================================
    // Skills
    // =========================================================================

    /// Buy a skill at an explicit price. Returns the balance left.
    #[instrument(skip(self))]
    pub async fn purchase_skill(
        &self,
        player_id: i64,
        skill_name: &str,
        price: Price,
    ) -> Result<Price, GameError> {
        let skill_name = skill_name.trim();
        if skill_name.is_empty() {
            return Err(GameError::InvalidInput("skill name must not be empty".into()));
        }
        let price = price.validate()?;
        self.require_player(player_id).await?;

        match self.db.purchase_skill(player_id, skill_name, price).await? {
            SkillPurchase::Purchased { remaining } => Ok(remaining),
            SkillPurchase::AlreadyOwned => Err(GameError::AlreadyOwned(skill_name.to_string())),
            SkillPurchase::InsufficientFunds => Err(GameError::InsufficientFunds(format!(
                "{skill_name} costs {price}"
            ))),
        }
    }

    /// Buy a skill from the shop catalog by key.
    #[instrument(skip(self))]
    pub async fn purchase_catalog_skill(
        &self,
        player_id: i64,
        key: &str,
    ) -> Result<Price, GameError> {
        let offer = shop::offer(key)?;
        self.purchase_skill(player_id, offer.name, offer.price).await
    }

    #[instrument(skip(self))]
    pub async fn list_skills(&self, player_id: i64) -> Result<Vec<SkillRecord>, GameError> {
        self.require_player(player_id).await?;
        Ok(self.db.list_skills(player_id).await?)
    }

    // =========================================================================
    // Boundary dispatch
    // =========================================================================

    /// Run a parsed button action. Quest indices refer to today's set.
    #[instrument(skip(self, action), fields(action = %action))]
    pub async fn handle_action(
        &self,
        player_id: i64,
        action: Action,
    ) -> Result<ActionOutcome, GameError> {
        debug!(player_id, "Dispatching action");
        match action {
            Action::CompleteGoal { goal_id } => self
                .complete_goal(goal_id, player_id)
                .await
                .map(ActionOutcome::GoalCompleted),
            Action::CompleteQuest { index } => self
                .complete_daily_quest(player_id, self.today(), index)
                .await
                .map(ActionOutcome::QuestCompleted),
            Action::BuySkill { skill } => {
                let remaining = self
                    .purchase_skill(player_id, skill.name, skill.price)
                    .await?;
                Ok(ActionOutcome::SkillPurchased { skill, remaining })
            }
        }
    }
}
