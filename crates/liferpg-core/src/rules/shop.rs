//! Skill shop catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Currency cost of a skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub bronze: i64,
    pub silver: i64,
    pub gold: i64,
}

impl Price {
    pub const fn new(bronze: i64, silver: i64, gold: i64) -> Self {
        Self {
            bronze,
            silver,
            gold,
        }
    }

    /// Reject negative components; a negative cost would credit the buyer.
    pub fn validate(self) -> Result<Self> {
        if self.bronze < 0 || self.silver < 0 || self.gold < 0 {
            return Err(Error::InvalidInput(format!(
                "skill cost must not be negative ({self})"
            )));
        }
        Ok(self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bronze, {} silver, {} gold",
            self.bronze, self.silver, self.gold
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SkillOffer {
    pub key: &'static str,
    pub name: &'static str,
    pub price: Price,
}

pub static SKILL_CATALOG: [SkillOffer; 3] = [
    SkillOffer {
        key: "logic",
        name: "Logic",
        price: Price::new(50, 30, 10),
    },
    SkillOffer {
        key: "memory",
        name: "Memory",
        price: Price::new(30, 20, 5),
    },
    SkillOffer {
        key: "creativity",
        name: "Creativity",
        price: Price::new(20, 10, 15),
    },
];

pub fn offer(key: &str) -> Result<&'static SkillOffer> {
    SKILL_CATALOG
        .iter()
        .find(|s| s.key == key)
        .ok_or_else(|| Error::InvalidInput(format!("unknown skill '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_prices() {
        assert_eq!(offer("logic").unwrap().price, Price::new(50, 30, 10));
        assert_eq!(offer("memory").unwrap().price, Price::new(30, 20, 5));
        assert_eq!(offer("creativity").unwrap().price, Price::new(20, 10, 15));
        assert!(offer("charisma").is_err());
    }

    #[test]
    fn negative_price_is_invalid() {
        assert!(Price::new(0, -1, 0).validate().is_err());
        assert!(Price::new(0, 0, 0).validate().is_ok());
    }
}
