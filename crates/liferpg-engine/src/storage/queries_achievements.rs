//! Achievement queries and idempotent unlocking.

use liferpg_core::db::unix_timestamp;
use liferpg_core::rules::PlayerStats;
use liferpg_core::rules::achievements::newly_met;
use sqlx::SqliteConnection;
use tracing::info;

use super::db::{DatabaseError, GameDatabase};
use super::models::{AchievementRecord, UnlockedAchievement};
use super::queries_players::credit_player;

impl GameDatabase {
    /// Unlocked achievements, oldest first.
    pub async fn list_achievements(
        &self,
        player_id: i64,
    ) -> Result<Vec<AchievementRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, AchievementRecord>(
            "SELECT * FROM achievements WHERE player_id = ? ORDER BY achieved_at, rowid",
        )
        .bind(player_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    /// Unlock and credit every achievement the player now qualifies for.
    ///
    /// Returns only the achievements unlocked by this call.
    pub async fn evaluate_achievements(
        &self,
        player_id: i64,
    ) -> Result<Vec<UnlockedAchievement>, DatabaseError> {
        let now = unix_timestamp();
        let mut tx = self.pool().begin().await?;

        // Take the write lock before reading aggregate state.
        let touched = sqlx::query("UPDATE players SET updated_at = updated_at WHERE id = ?")
            .bind(player_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NotFound(format!("Player {player_id}")));
        }

        let unlocked = unlock_pending_achievements(&mut *tx, player_id, now).await?;
        tx.commit().await?;

        Ok(unlocked)
    }
}

/// One evaluation pass inside an open write transaction.
///
/// Every predicate sees the state read at the start of the pass. An unlock
/// row is inserted before its reward is credited, and a row that already
/// exists means the reward was paid before, so nothing is credited twice.
pub(super) async fn unlock_pending_achievements(
    conn: &mut SqliteConnection,
    player_id: i64,
    now: i64,
) -> Result<Vec<UnlockedAchievement>, DatabaseError> {
    let (experience, total_completed_goals): (i64, i64) = sqlx::query_as(
        "SELECT experience, total_completed_goals FROM players WHERE id = ?",
    )
    .bind(player_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Player {player_id}")))?;

    let already: Vec<String> =
        sqlx::query_scalar("SELECT achievement_name FROM achievements WHERE player_id = ?")
            .bind(player_id)
            .fetch_all(&mut *conn)
            .await?;

    let stats = PlayerStats::new(experience, total_completed_goals);
    let mut unlocked = Vec::new();

    for def in newly_met(&stats, &already) {
        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO achievements (player_id, achievement_name, achieved_at) \
             VALUES (?, ?, ?)",
        )
        .bind(player_id)
        .bind(def.id.as_str())
        .bind(now)
        .execute(&mut *conn)
        .await?;

        if inserted.rows_affected() == 0 {
            continue;
        }

        credit_player(&mut *conn, player_id, def.reward, 0, now).await?;
        info!(
            player_id,
            achievement = def.id.as_str(),
            reward = %def.reward,
            "Achievement unlocked"
        );

        unlocked.push(UnlockedAchievement {
            id: def.id,
            reward: def.reward,
            achieved_at: now,
        });
    }

    Ok(unlocked)
}
