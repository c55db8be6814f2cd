//! Daily quest catalog and sampling.

use super::rewards::Reward;
use crate::error::{Error, Result};

/// Quests handed out per player per day.
pub const DAILY_QUEST_COUNT: usize = 3;

/// A catalog entry. Its reward is copied onto the quest row at generation
/// time and replayed on completion.
#[derive(Debug, PartialEq, Eq)]
pub struct QuestTemplate {
    pub key: &'static str,
    pub text: &'static str,
    pub reward: Reward,
}

pub static QUEST_CATALOG: [QuestTemplate; 8] = [
    QuestTemplate {
        key: "read_pages",
        text: "Read 10 pages of a book",
        reward: Reward::new(20, 2, 1, 0),
    },
    QuestTemplate {
        key: "morning_exercise",
        text: "Do a morning workout",
        reward: Reward::new(15, 1, 1, 0),
    },
    QuestTemplate {
        key: "drink_water",
        text: "Drink 2 litres of water",
        reward: Reward::new(10, 3, 0, 0),
    },
    QuestTemplate {
        key: "learn_words",
        text: "Learn 5 new words",
        reward: Reward::new(25, 0, 2, 1),
    },
    QuestTemplate {
        key: "tidy_room",
        text: "Tidy your room",
        reward: Reward::new(30, 2, 2, 0),
    },
    QuestTemplate {
        key: "plan_tomorrow",
        text: "Write down tomorrow's plan",
        reward: Reward::new(15, 2, 1, 0),
    },
    QuestTemplate {
        key: "creative_time",
        text: "Spend time on something creative",
        reward: Reward::new(25, 1, 2, 1),
    },
    QuestTemplate {
        key: "meditate",
        text: "Meditate for 10 minutes",
        reward: Reward::new(20, 2, 2, 0),
    },
];

/// Chooses which catalog entries make up a day's set.
pub trait QuestPicker: Send + Sync {
    /// Return `count` distinct indices in `0..catalog_len`.
    fn pick(&self, catalog_len: usize, count: usize) -> Vec<usize>;
}

/// Uniform sampling without replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl QuestPicker for RandomPicker {
    fn pick(&self, catalog_len: usize, count: usize) -> Vec<usize> {
        let mut rng = rand::rng();
        rand::seq::index::sample(&mut rng, catalog_len, count.min(catalog_len)).into_vec()
    }
}

/// Draw a day's quest set from the catalog, in slot order.
pub fn draw_daily_set(picker: &dyn QuestPicker) -> Result<Vec<&'static QuestTemplate>> {
    let indices = picker.pick(QUEST_CATALOG.len(), DAILY_QUEST_COUNT);
    if indices.len() != DAILY_QUEST_COUNT {
        return Err(Error::InvalidInput(format!(
            "quest picker returned {} entries, expected {DAILY_QUEST_COUNT}",
            indices.len()
        )));
    }

    let mut set: Vec<&'static QuestTemplate> = Vec::with_capacity(DAILY_QUEST_COUNT);
    for idx in indices {
        let template = QUEST_CATALOG.get(idx).ok_or_else(|| {
            Error::InvalidInput(format!("quest picker returned out-of-range index {idx}"))
        })?;
        if set.iter().any(|q| q.key == template.key) {
            return Err(Error::InvalidInput(format!(
                "quest picker returned duplicate entry '{}'",
                template.key
            )));
        }
        set.push(template);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<usize>);

    impl QuestPicker for Fixed {
        fn pick(&self, _catalog_len: usize, _count: usize) -> Vec<usize> {
            self.0.clone()
        }
    }

    #[test]
    fn catalog_keys_are_unique() {
        for (i, a) in QUEST_CATALOG.iter().enumerate() {
            for b in &QUEST_CATALOG[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn random_picker_draws_three_distinct() {
        for _ in 0..50 {
            let set = draw_daily_set(&RandomPicker).unwrap();
            assert_eq!(set.len(), DAILY_QUEST_COUNT);
            assert_ne!(set[0].key, set[1].key);
            assert_ne!(set[0].key, set[2].key);
            assert_ne!(set[1].key, set[2].key);
        }
    }

    #[test]
    fn fixed_picker_preserves_order() {
        let set = draw_daily_set(&Fixed(vec![4, 0, 7])).unwrap();
        let keys: Vec<_> = set.iter().map(|q| q.key).collect();
        assert_eq!(keys, vec!["tidy_room", "read_pages", "meditate"]);
    }

    #[test]
    fn bad_picker_output_is_rejected() {
        assert!(draw_daily_set(&Fixed(vec![0, 1])).is_err());
        assert!(draw_daily_set(&Fixed(vec![0, 1, 8])).is_err());
        assert!(draw_daily_set(&Fixed(vec![2, 2, 3])).is_err());
    }
}
