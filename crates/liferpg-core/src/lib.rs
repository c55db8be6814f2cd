//! `LifeRPG` Core Library
//!
//! Shared functionality for `LifeRPG` components:
//! - Reward table, level derivation, achievement and quest catalogs
//! - Boundary parsing of player actions
//! - Configuration resolution and hierarchy
//! - `SQLite` pool helpers and common error types

pub mod command;
pub mod config;
pub mod db;
pub mod error;
pub mod rules;
pub mod tracing_init;

pub use command::{Action, parse_goal_input};
pub use config::Config;
pub use error::{Error, Result};
pub use rules::{Reward, Tier, level_for_experience};
