//! Motivational tips.

use super::achievements::PlayerStats;

const TIPS: [&str; 7] = [
    "Small steps every day lead to big results!",
    "Break a big goal into small tasks, it makes starting easier.",
    "Every completed goal makes you stronger!",
    "Learn something new every day, it levels up your brain.",
    "The hardest part is starting. Take the first step right now!",
    "Rest matters too. Don't forget to take breaks.",
    "Believe in yourself, you can do it!",
];

/// Number of distinct tips, the progress tip included.
pub const ADVICE_COUNT: usize = TIPS.len() + 1;

/// Tip number `choice` (wrapped to `ADVICE_COUNT`) for a player with `stats`.
/// A player with nothing done yet is always nudged to add a goal.
pub fn advice(stats: &PlayerStats, choice: usize) -> String {
    if stats.total_completed_goals == 0 && stats.experience == 0 {
        return "Start the game! Add your first goal.".to_string();
    }
    match TIPS.get(choice % ADVICE_COUNT) {
        Some(tip) => (*tip).to_string(),
        None => format!(
            "You have completed {} goals already. Keep it up!",
            stats.total_completed_goals
        ),
    }
}

/// A uniformly random tip.
pub fn random_advice(stats: &PlayerStats) -> String {
    let choice = rand::seq::index::sample(&mut rand::rng(), ADVICE_COUNT, 1).index(0);
    advice(stats, choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_player_is_told_to_start() {
        let stats = PlayerStats::new(0, 0);
        for choice in 0..ADVICE_COUNT {
            assert_eq!(advice(&stats, choice), "Start the game! Add your first goal.");
        }
    }

    #[test]
    fn progress_tip_counts_goals() {
        let stats = PlayerStats::new(120, 12);
        assert_eq!(
            advice(&stats, TIPS.len()),
            "You have completed 12 goals already. Keep it up!"
        );
        assert_eq!(advice(&stats, ADVICE_COUNT), TIPS[0]);
    }

    #[test]
    fn random_tip_comes_from_the_set() {
        let stats = PlayerStats::new(30, 3);
        let tip = random_advice(&stats);
        assert!(TIPS.contains(&tip.as_str()) || tip.contains("3 goals"));
    }
}
