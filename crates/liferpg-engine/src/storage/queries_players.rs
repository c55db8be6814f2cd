//! Player queries and the crediting primitive shared by every transition.

use liferpg_core::db::unix_timestamp;
use liferpg_core::rules::Reward;
use sqlx::SqliteConnection;
use tracing::info;

use super::db::{DatabaseError, GameDatabase};
use super::models::{Player, Profile};

const SELECT_PLAYER: &str = "SELECT id, experience, level, bronze, silver, gold, \
     total_completed_goals, created_at, updated_at FROM players WHERE id = ?";

impl GameDatabase {
    /// Insert the player if absent and return the current row.
    pub async fn create_or_get_player(&self, id: i64) -> Result<Player, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT OR IGNORE INTO players (id, created_at, updated_at) VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        if result.rows_affected() > 0 {
            info!(player_id = id, "Player created");
        }

        self.get_player(id).await
    }

    /// Get a player by ID.
    pub async fn get_player(&self, id: i64) -> Result<Player, DatabaseError> {
        sqlx::query_as::<_, Player>(SELECT_PLAYER)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Player {id}")))
    }

    /// Player row with owned skill names and achievement count.
    pub async fn get_profile(&self, id: i64) -> Result<Profile, DatabaseError> {
        let player = self.get_player(id).await?;

        let skills: Vec<String> = sqlx::query_scalar(
            "SELECT skill_name FROM skills WHERE player_id = ? ORDER BY purchased_at, skill_name",
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        let achievement_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM achievements WHERE player_id = ?")
                .bind(id)
                .fetch_one(self.pool())
                .await?;

        Ok(Profile {
            player,
            skills,
            achievement_count,
        })
    }
}

/// Add `reward` to the player's experience and currencies, and
/// `completed_goals` to the goal counter. Level follows experience through
/// the generated column.
pub(super) async fn credit_player(
    conn: &mut SqliteConnection,
    player_id: i64,
    reward: Reward,
    completed_goals: i64,
    now: i64,
) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        "UPDATE players SET experience = experience + ?, bronze = bronze + ?, \
         silver = silver + ?, gold = gold + ?, \
         total_completed_goals = total_completed_goals + ?, updated_at = ? WHERE id = ?",
    )
    .bind(reward.experience)
    .bind(reward.bronze)
    .bind(reward.silver)
    .bind(reward.gold)
    .bind(completed_goals)
    .bind(now)
    .bind(player_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("Player {player_id}")));
    }
    Ok(())
}
