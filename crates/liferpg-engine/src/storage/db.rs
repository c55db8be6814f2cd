//! `SQLite` database for the `LifeRPG` engine.

use std::path::Path;

use liferpg_core::config::StorageConfig;
use liferpg_core::db::{open_pool, open_pool_in_memory};
use sqlx::{Pool, Sqlite};
use tracing::info;

pub use liferpg_core::db::DatabaseError;

/// Handle to the game store. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct GameDatabase {
    pool: Pool<Sqlite>,
}

impl GameDatabase {
    /// Open or create a database at the given path.
    pub async fn open(path: &Path, storage: &StorageConfig) -> Result<Self, DatabaseError> {
        let pool = open_pool(path, storage).await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub async fn open_in_memory() -> Result<Self, DatabaseError> {
        let pool = open_pool_in_memory().await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("Game database migrations complete");
        Ok(())
    }

    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
