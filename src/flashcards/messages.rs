//! User-facing streak status text

use super::milestones::{milestone_label, milestone_progress};

pub fn streak_message(current_streak: u32, studied_today: bool) -> String {
    if current_streak == 0 {
        return if studied_today {
            "Great start! Come back tomorrow to build your streak.".to_string()
        } else {
            "Start a streak today!".to_string()
        };
    }

    if !studied_today {
        return format!("Study today to keep your {}-day streak alive!", current_streak);
    }

    let progress = milestone_progress(current_streak);
    match progress.next_milestone {
        None => "Amazing! You've reached every milestone!".to_string(),
        Some(next) if progress.days_remaining == 1 => {
            format!("Just 1 more day to {}!", milestone_label(next))
        }
        Some(next) => format!(
            "{} days until {}!",
            progress.days_remaining,
            milestone_label(next)
        ),
    }
}
