//! `LifeRPG` gamification state engine.
//!
//! - `SQLite` store for players, goals, daily quests, skills and achievements
//! - Exactly-once completion of goals and quests with reward crediting
//! - Idempotent daily quest generation and achievement unlocking
//! - Solvency-checked skill purchases

pub mod error;
pub mod service;
pub mod storage;

pub use error::GameError;
pub use service::{ActionOutcome, GameService};
pub use storage::GameDatabase;
