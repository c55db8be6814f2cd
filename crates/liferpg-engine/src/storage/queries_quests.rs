//! Daily quest generation, listing and completion.

use chrono::NaiveDate;
use liferpg_core::db::unix_timestamp;
use liferpg_core::rules::{QuestTemplate, Reward};
use tracing::{debug, info};

use super::db::{DatabaseError, GameDatabase};
use super::models::{CompletionReport, DailyQuest, QuestCompletion};
use super::queries_achievements::unlock_pending_achievements;
use super::queries_players::credit_player;

const INSERT_QUEST: &str = "INSERT INTO daily_quests (player_id, quest_date, slot, quest_key, \
     quest_text, reward_experience, reward_bronze, reward_silver, reward_gold, created_at) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const INSERT_QUEST_OR_IGNORE: &str = "INSERT OR IGNORE INTO daily_quests (player_id, quest_date, \
     slot, quest_key, quest_text, reward_experience, reward_bronze, reward_silver, reward_gold, \
     created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl GameDatabase {
    /// Store `set` as the player's quests for `date` unless a set already
    /// exists for that day. Returns whether this call generated it.
    ///
    /// Slot 0 is inserted first with `OR IGNORE`: whichever caller wins it
    /// writes the whole set, every later caller finds it taken and backs out.
    pub async fn ensure_daily_quests(
        &self,
        player_id: i64,
        date: NaiveDate,
        set: &[&QuestTemplate],
    ) -> Result<bool, DatabaseError> {
        if set.is_empty() {
            return Ok(false);
        }

        let now = unix_timestamp();
        let day = date_key(date);
        let mut tx = self.pool().begin().await?;

        for (slot, quest) in (0_i64..).zip(set) {
            let sql = if slot == 0 {
                INSERT_QUEST_OR_IGNORE
            } else {
                INSERT_QUEST
            };
            let result = sqlx::query(sql)
                .bind(player_id)
                .bind(&day)
                .bind(slot)
                .bind(quest.key)
                .bind(quest.text)
                .bind(quest.reward.experience)
                .bind(quest.reward.bronze)
                .bind(quest.reward.silver)
                .bind(quest.reward.gold)
                .bind(now)
                .execute(&mut *tx)
                .await?;

            if slot == 0 && result.rows_affected() == 0 {
                tx.rollback().await?;
                debug!(player_id, quest_date = %day, "Daily quests already generated");
                return Ok(false);
            }
        }

        tx.commit().await?;

        let keys: Vec<&str> = set.iter().map(|q| q.key).collect();
        info!(player_id, quest_date = %day, quests = ?keys, "Daily quests generated");
        Ok(true)
    }

    /// Quests for `date` in slot order.
    pub async fn list_daily_quests(
        &self,
        player_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<DailyQuest>, DatabaseError> {
        let quests = sqlx::query_as::<_, DailyQuest>(
            "SELECT * FROM daily_quests WHERE player_id = ? AND quest_date = ? ORDER BY slot",
        )
        .bind(player_id)
        .bind(date_key(date))
        .fetch_all(self.pool())
        .await?;

        Ok(quests)
    }

    /// Mark the quest in `slot` done, credit its stored reward and run
    /// achievement evaluation. Quests do not count towards the goal total.
    pub async fn complete_daily_quest(
        &self,
        player_id: i64,
        date: NaiveDate,
        slot: i64,
    ) -> Result<QuestCompletion, DatabaseError> {
        let now = unix_timestamp();
        let day = date_key(date);
        let mut tx = self.pool().begin().await?;

        let reward: Option<(i64, i64, i64, i64)> = sqlx::query_as(
            "UPDATE daily_quests SET completed = 1, completed_at = ? \
             WHERE player_id = ? AND quest_date = ? AND slot = ? AND completed = 0 \
             RETURNING reward_experience, reward_bronze, reward_silver, reward_gold",
        )
        .bind(now)
        .bind(player_id)
        .bind(&day)
        .bind(slot)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((experience, bronze, silver, gold)) = reward else {
            let completed: Option<bool> = sqlx::query_scalar(
                "SELECT completed FROM daily_quests \
                 WHERE player_id = ? AND quest_date = ? AND slot = ?",
            )
            .bind(player_id)
            .bind(&day)
            .bind(slot)
            .fetch_optional(&mut *tx)
            .await?;
            tx.rollback().await?;

            debug!(player_id, quest_date = %day, slot, ?completed, "Quest not completable");
            return Ok(match completed {
                Some(true) => QuestCompletion::AlreadyCompleted,
                Some(false) | None => QuestCompletion::NotFound,
            });
        };

        let reward = Reward::new(experience, bronze, silver, gold);
        credit_player(&mut *tx, player_id, reward, 0, now).await?;
        let unlocked = unlock_pending_achievements(&mut *tx, player_id, now).await?;
        tx.commit().await?;

        info!(player_id, quest_date = %day, slot, reward = %reward, unlocked = unlocked.len(), "Daily quest completed");

        Ok(QuestCompletion::Completed(CompletionReport { reward, unlocked }))
    }
}
