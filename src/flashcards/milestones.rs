//! Streak milestones and achievements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::StreakAchievement;

/// Streak lengths (in days) that earn an achievement, ascending
pub const MILESTONES: [u32; 5] = [7, 14, 30, 100, 365];

/// Where a streak sits between two milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
    pub next_milestone: Option<u32>,
    /// Percent of the way from the previous milestone to the next (0-100)
    pub progress: u32,
    pub days_remaining: u32,
}

/// Achievements earned by `current_streak` that are not in `existing` yet
pub fn check_for_new_milestones(
    current_streak: u32,
    existing: &[StreakAchievement],
    achieved_at: DateTime<Utc>,
) -> Vec<StreakAchievement> {
    MILESTONES
        .iter()
        .copied()
        .filter(|m| *m <= current_streak)
        .filter(|m| !existing.iter().any(|a| a.milestone == *m))
        .map(|milestone| StreakAchievement {
            milestone,
            achieved_at,
        })
        .collect()
}

/// Smallest milestone strictly above `streak`
pub fn next_milestone(streak: u32) -> Option<u32> {
    MILESTONES.iter().copied().find(|m| *m > streak)
}

pub fn milestone_progress(streak: u32) -> MilestoneProgress {
    let next = match next_milestone(streak) {
        Some(next) => next,
        None => {
            return MilestoneProgress {
                next_milestone: None,
                progress: 100,
                days_remaining: 0,
            }
        }
    };

    let previous = MILESTONES
        .iter()
        .copied()
        .filter(|m| *m <= streak)
        .last()
        .unwrap_or(0);

    let span = (next - previous) as f64;
    let progress = ((streak - previous) as f64 / span * 100.0).round() as u32;

    MilestoneProgress {
        next_milestone: Some(next),
        progress,
        days_remaining: next - streak,
    }
}

/// Human-readable name for a milestone
pub fn milestone_label(milestone: u32) -> String {
    match milestone {
        7 => "1 Week".to_string(),
        14 => "2 Weeks".to_string(),
        30 => "1 Month".to_string(),
        100 => "100 Days".to_string(),
        365 => "1 Year".to_string(),
        n => format!("{} Days", n),
    }
}
