//! `SQLite` storage for the `LifeRPG` engine.
//!
//! Persists players, goals, daily quests, owned skills and unlocked
//! achievements, and implements the atomic state transitions on top of them.

mod db;
mod models;
mod queries_achievements;
mod queries_goals;
mod queries_players;
mod queries_quests;
mod queries_skills;


pub use db::{DatabaseError, GameDatabase};
pub use models::*;
