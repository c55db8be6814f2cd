//! Skill ownership queries and the purchase transition.

use liferpg_core::db::unix_timestamp;
use liferpg_core::rules::Price;
use tracing::{debug, info};

use super::db::{DatabaseError, GameDatabase};
use super::models::{SkillPurchase, SkillRecord};

impl GameDatabase {
    /// Owned skills in purchase order.
    pub async fn list_skills(&self, player_id: i64) -> Result<Vec<SkillRecord>, DatabaseError> {
        let skills = sqlx::query_as::<_, SkillRecord>(
            "SELECT * FROM skills WHERE player_id = ? ORDER BY purchased_at, skill_name",
        )
        .bind(player_id)
        .fetch_all(self.pool())
        .await?;

        Ok(skills)
    }

    /// Buy `skill_name` for `price`.
    ///
    /// The ownership row goes in first so a repeat purchase is rejected before
    /// any currency moves. The debit is guarded on every balance covering its
    /// cost; if it matches no row the whole transaction, ownership row
    /// included, is rolled back.
    pub async fn purchase_skill(
        &self,
        player_id: i64,
        skill_name: &str,
        price: Price,
    ) -> Result<SkillPurchase, DatabaseError> {
        let now = unix_timestamp();
        let mut tx = self.pool().begin().await?;

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO skills \
             (player_id, skill_name, cost_bronze, cost_silver, cost_gold, purchased_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(player_id)
        .bind(skill_name)
        .bind(price.bronze)
        .bind(price.silver)
        .bind(price.gold)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            debug!(player_id, skill = skill_name, "Skill already owned");
            return Ok(SkillPurchase::AlreadyOwned);
        }

        let remaining: Option<(i64, i64, i64)> = sqlx::query_as(
            "UPDATE players SET bronze = bronze - ?, silver = silver - ?, gold = gold - ?, \
             updated_at = ? \
             WHERE id = ? AND bronze >= ? AND silver >= ? AND gold >= ? \
             RETURNING bronze, silver, gold",
        )
        .bind(price.bronze)
        .bind(price.silver)
        .bind(price.gold)
        .bind(now)
        .bind(player_id)
        .bind(price.bronze)
        .bind(price.silver)
        .bind(price.gold)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((bronze, silver, gold)) = remaining else {
            tx.rollback().await?;
            debug!(player_id, skill = skill_name, %price, "Insufficient funds");
            return Ok(SkillPurchase::InsufficientFunds);
        };

        tx.commit().await?;

        let remaining = Price::new(bronze, silver, gold);
        info!(player_id, skill = skill_name, %price, %remaining, "Skill purchased");
        Ok(SkillPurchase::Purchased { remaining })
    }
}
