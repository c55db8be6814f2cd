//! Goal queries and the goal completion transition.

use liferpg_core::db::unix_timestamp;
use liferpg_core::rules::Tier;
use tracing::{debug, info};

use super::db::{DatabaseError, GameDatabase};
use super::models::{CompletionReport, Goal, GoalCompletion};
use super::queries_achievements::unlock_pending_achievements;
use super::queries_players::credit_player;

impl GameDatabase {
    /// Create a pending goal.
    pub async fn add_goal(
        &self,
        player_id: i64,
        title: &str,
        tier: Tier,
    ) -> Result<Goal, DatabaseError> {
        let now = unix_timestamp();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO goals (player_id, title, tier, created_at) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(player_id)
        .bind(title)
        .bind(tier.as_i64())
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        info!(player_id, goal_id = id, %tier, "Goal added");

        self.get_goal(id).await
    }

    /// Get a goal by ID.
    pub async fn get_goal(&self, id: i64) -> Result<Goal, DatabaseError> {
        sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Goal {id}")))
    }

    /// Pending goals in creation order.
    pub async fn list_active_goals(&self, player_id: i64) -> Result<Vec<Goal>, DatabaseError> {
        let goals = sqlx::query_as::<_, Goal>(
            "SELECT * FROM goals WHERE player_id = ? AND completed = 0 ORDER BY id",
        )
        .bind(player_id)
        .fetch_all(self.pool())
        .await?;

        Ok(goals)
    }

    /// Completed goals, most recently completed first.
    pub async fn list_completed_goals(
        &self,
        player_id: i64,
        limit: u32,
    ) -> Result<Vec<Goal>, DatabaseError> {
        let goals = sqlx::query_as::<_, Goal>(
            "SELECT * FROM goals WHERE player_id = ? AND completed = 1 \
             ORDER BY completed_at DESC, id DESC LIMIT ?",
        )
        .bind(player_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(goals)
    }

    /// Mark a goal done, credit its tier reward, bump the goal counter and
    /// run achievement evaluation, all in one transaction.
    pub async fn complete_goal(
        &self,
        goal_id: i64,
        player_id: i64,
    ) -> Result<GoalCompletion, DatabaseError> {
        let now = unix_timestamp();
        let mut tx = self.pool().begin().await?;

        // The guarded update is the first statement: it takes the write lock
        // and only one caller can flip the flag.
        let tier: Option<i64> = sqlx::query_scalar(
            "UPDATE goals SET completed = 1, completed_at = ? \
             WHERE id = ? AND player_id = ? AND completed = 0 RETURNING tier",
        )
        .bind(now)
        .bind(goal_id)
        .bind(player_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(tier) = tier else {
            let completed: Option<bool> =
                sqlx::query_scalar("SELECT completed FROM goals WHERE id = ? AND player_id = ?")
                    .bind(goal_id)
                    .bind(player_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;

            debug!(goal_id, player_id, ?completed, "Goal not completable");
            return Ok(match completed {
                Some(true) => GoalCompletion::AlreadyCompleted,
                Some(false) | None => GoalCompletion::NotFound,
            });
        };

        let tier = Tier::try_from(tier).map_err(|e| DatabaseError::Query(e.to_string()))?;
        let reward = tier.reward();

        credit_player(&mut *tx, player_id, reward, 1, now).await?;
        let unlocked = unlock_pending_achievements(&mut *tx, player_id, now).await?;
        tx.commit().await?;

        info!(goal_id, player_id, %tier, reward = %reward, unlocked = unlocked.len(), "Goal completed");

        Ok(GoalCompletion::Completed(CompletionReport { reward, unlocked }))
    }
}
