//! XP levels, rewards, badges and leaderboard.

use crate::models::{Achievement, Badge, Competitor, Priority};
use serde::Serialize;

/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 500;

/// XP for mastering a high-yield topic.
pub const XP_TOPIC_HIGH_YIELD: u32 = 25;
/// XP for mastering any other topic.
pub const XP_TOPIC: u32 = 15;
/// XP for completing a timetable task.
pub const XP_TASK: u32 = 10;
/// XP for a correct flashcard answer.
pub const XP_REVIEW_CORRECT: u32 = 3;
/// XP for an incorrect flashcard answer.
pub const XP_REVIEW_INCORRECT: u32 = 1;
/// XP for setting a new goal.
pub const XP_GOAL_CREATED: u32 = 15;
/// Bonus on top of the score tier for logging a mock test.
pub const XP_TEST_COMPLETED: u32 = 25;

/// Display name of the current user on the leaderboard.
pub const CURRENT_USER: &str = "You";

pub fn level(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Computed from the remainder so totals near `u32::MAX` cannot overflow.
pub fn xp_to_next_level(xp: u32) -> u32 {
    XP_PER_LEVEL - xp % XP_PER_LEVEL
}

/// Progress through the current level, rounded percent.
pub fn level_progress(xp: u32) -> u8 {
    let into_level = xp % XP_PER_LEVEL;
    (into_level as f64 / XP_PER_LEVEL as f64 * 100.0).round() as u8
}

pub fn topic_reward(high_yield: bool) -> u32 {
    if high_yield {
        XP_TOPIC_HIGH_YIELD
    } else {
        XP_TOPIC
    }
}

pub fn review_reward(correct: bool) -> u32 {
    if correct {
        XP_REVIEW_CORRECT
    } else {
        XP_REVIEW_INCORRECT
    }
}

/// One-time reward for finishing a goal.
pub fn goal_completion_reward(priority: Priority) -> u32 {
    match priority {
        Priority::High => 50,
        Priority::Medium => 30,
        Priority::Low => 20,
    }
}

/// Reward for a logged mock test: a tier by accuracy plus the completion bonus.
pub fn mock_test_reward(accuracy: f64) -> u32 {
    let tier = if accuracy >= 90.0 {
        100
    } else if accuracy >= 80.0 {
        75
    } else if accuracy >= 70.0 {
        50
    } else {
        25
    };
    tier + XP_TEST_COMPLETED
}

/// Level summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub xp: u32,
    pub level: u32,
    pub xp_to_next: u32,
    pub progress: u8,
}

impl LevelInfo {
    pub fn from_xp(xp: u32) -> Self {
        Self {
            xp,
            level: level(xp),
            xp_to_next: xp_to_next_level(xp),
            progress: level_progress(xp),
        }
    }
}

/// (earned, total)
pub fn badge_counts<'a>(badges: impl IntoIterator<Item = &'a Badge>) -> (usize, usize) {
    badges
        .into_iter()
        .fold((0, 0), |(earned, total), b| (earned + b.earned as usize, total + 1))
}

pub fn completed_achievements(achievements: &[Achievement]) -> usize {
    achievements.iter().filter(|a| a.is_completed()).count()
}

/// A ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub xp: u32,
    pub level: u32,
    pub is_current_user: bool,
}

/// Rank rivals and the current user by XP, highest first.
pub fn leaderboard(rivals: &[Competitor], user_xp: u32) -> Vec<LeaderboardRow> {
    let mut entries: Vec<(&str, u32, bool)> = rivals
        .iter()
        .map(|c| (c.name.as_str(), c.xp, false))
        .collect();
    entries.push((CURRENT_USER, user_xp, true));
    // Ties favour the current user.
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, xp, is_current_user))| LeaderboardRow {
            rank: i + 1,
            name: name.to_string(),
            xp,
            level: level(xp),
            is_current_user,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Dataset;
    use proptest::prelude::*;

    #[test]
    fn test_level_formula() {
        assert_eq!(level(0), 1);
        assert_eq!(level(499), 1);
        assert_eq!(level(500), 2);
        assert_eq!(level(2450), 5);
    }

    #[test]
    fn test_goal_and_test_rewards() {
        assert_eq!(goal_completion_reward(Priority::High), 50);
        assert_eq!(goal_completion_reward(Priority::Medium), 30);
        assert_eq!(goal_completion_reward(Priority::Low), 20);

        assert_eq!(mock_test_reward(95.0), 125);
        assert_eq!(mock_test_reward(90.0), 125);
        assert_eq!(mock_test_reward(81.7), 100);
        assert_eq!(mock_test_reward(70.0), 75);
        assert_eq!(mock_test_reward(69.99), 50);
        assert_eq!(mock_test_reward(0.0), 50);
    }

    #[test]
    fn test_level_info_at_saturated_xp() {
        let info = LevelInfo::from_xp(u32::MAX);
        assert_eq!(info.level, u32::MAX / XP_PER_LEVEL + 1);
        assert_eq!(info.xp_to_next, XP_PER_LEVEL - u32::MAX % XP_PER_LEVEL);
        assert!(info.progress <= 100);
    }

    #[test]
    fn test_level_info_for_sample_user() {
        let info = LevelInfo::from_xp(2450);
        assert_eq!(info.level, 5);
        assert_eq!(info.xp_to_next, 50);
        assert_eq!(info.progress, 90);
    }

    #[test]
    fn test_rewards() {
        assert_eq!(topic_reward(true), 25);
        assert_eq!(topic_reward(false), 15);
        assert_eq!(review_reward(true), 3);
        assert_eq!(review_reward(false), 1);
    }

    #[test]
    fn test_badge_counts() {
        let data = Dataset::sample();
        assert_eq!(badge_counts(data.all_badges()), (3, 8));
        assert_eq!(badge_counts(&data.user.badges), (3, 4));
    }

    #[test]
    fn test_no_sample_achievement_complete() {
        let data = Dataset::sample();
        assert_eq!(completed_achievements(&data.achievements), 0);
    }

    #[test]
    fn test_leaderboard_places_user_by_xp() {
        let data = Dataset::sample();
        let board = leaderboard(&data.rivals, 2450);
        assert_eq!(board.len(), 5);
        assert_eq!(board[0].name, "Alex Kumar");
        assert_eq!(board[0].level, 7);
        let me = board.iter().find(|r| r.is_current_user).unwrap();
        assert_eq!(me.rank, 3);
        assert_eq!(me.level, 5);

        let board = leaderboard(&data.rivals, 3500);
        assert_eq!(board[0].name, CURRENT_USER);
        assert_eq!(board[0].rank, 1);

        let board = leaderboard(&data.rivals, 2800);
        assert_eq!(board[1].name, CURRENT_USER);
    }

    proptest! {
        #[test]
        fn level_progress_in_range(xp in 0u32..1_000_000) {
            let info = LevelInfo::from_xp(xp);
            prop_assert!(info.progress <= 100);
            prop_assert!(info.xp_to_next >= 1 && info.xp_to_next <= XP_PER_LEVEL);
            prop_assert_eq!(level(xp + info.xp_to_next), info.level + 1);
        }
    }
}
