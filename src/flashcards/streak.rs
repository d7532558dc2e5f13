//! Study streak calculation
//!
//! A streak is the number of consecutive calendar days, ending today or
//! yesterday, on which at least one card was reviewed. Yesterday still counts
//! because today might not be over yet.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::milestones::check_for_new_milestones;
use super::models::{DailyReviewRecord, StreakHistory};

/// Result of walking the review history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStatus {
    pub current_streak: u32,
    /// Most recent day with reviews, even if the streak is broken
    pub last_study_date: Option<NaiveDate>,
}

/// Calculate the current streak from an unordered review history
pub fn calculate_streak(records: &[DailyReviewRecord], today: NaiveDate) -> StreakStatus {
    let active_dates: BTreeSet<NaiveDate> = records
        .iter()
        .filter(|r| r.is_active())
        .map(|r| r.date)
        .collect();

    let anchor = match active_dates.iter().next_back() {
        Some(date) => *date,
        None => {
            return StreakStatus {
                current_streak: 0,
                last_study_date: None,
            }
        }
    };

    let yesterday = today - Duration::days(1);
    if anchor != today && anchor != yesterday {
        return StreakStatus {
            current_streak: 0,
            last_study_date: Some(anchor),
        };
    }

    // Count consecutive days backwards
    let mut streak = 0;
    let mut check_date = anchor;
    while active_dates.contains(&check_date) {
        streak += 1;
        check_date = check_date - Duration::days(1);
    }

    StreakStatus {
        current_streak: streak,
        last_study_date: Some(anchor),
    }
}

/// Whether any reviews were recorded on the given day
pub fn studied_on(records: &[DailyReviewRecord], day: NaiveDate) -> bool {
    records.iter().any(|r| r.date == day && r.is_active())
}

/// Recompute streak state after a review and award any newly crossed milestones
pub fn update_streak_after_review(
    history: &StreakHistory,
    records: &[DailyReviewRecord],
    today: NaiveDate,
    now: DateTime<Utc>,
) -> StreakHistory {
    let status = calculate_streak(records, today);
    let new_achievements =
        check_for_new_milestones(status.current_streak, &history.achievements, now);

    let mut achievements = history.achievements.clone();
    achievements.extend(new_achievements);

    StreakHistory {
        current_streak: status.current_streak,
        longest_streak: history.longest_streak.max(status.current_streak),
        last_study_date: status.last_study_date,
        achievements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::{ReviewRating, StreakAchievement};
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active(date: NaiveDate, reviews: u32) -> DailyReviewRecord {
        let mut record = DailyReviewRecord::new(date);
        for _ in 0..reviews {
            record.record(Uuid::new_v4(), ReviewRating::Good, 1);
        }
        record
    }

    fn run_ending(end: NaiveDate, days: i64) -> Vec<DailyReviewRecord> {
        (0..days).map(|i| active(end - Duration::days(i), 2)).collect()
    }

    #[test]
    fn test_empty_history() {
        let status = calculate_streak(&[], day(2024, 5, 10));
        assert_eq!(status.current_streak, 0);
        assert_eq!(status.last_study_date, None);
    }

    #[test]
    fn test_only_zero_review_records() {
        let today = day(2024, 5, 10);
        let records = vec![
            DailyReviewRecord::new(today),
            DailyReviewRecord::new(today - Duration::days(1)),
        ];
        let status = calculate_streak(&records, today);
        assert_eq!(status.current_streak, 0);
        assert_eq!(status.last_study_date, None);
    }

    #[test]
    fn test_streak_ending_today() {
        let today = day(2024, 5, 10);
        let status = calculate_streak(&run_ending(today, 5), today);
        assert_eq!(status.current_streak, 5);
        assert_eq!(status.last_study_date, Some(today));
    }

    #[test]
    fn test_streak_ending_yesterday() {
        let today = day(2024, 5, 10);
        let yesterday = today - Duration::days(1);
        let status = calculate_streak(&run_ending(yesterday, 3), today);
        assert_eq!(status.current_streak, 3);
        assert_eq!(status.last_study_date, Some(yesterday));
    }

    #[test]
    fn test_broken_streak_keeps_last_date() {
        let today = day(2024, 5, 10);
        let last = today - Duration::days(2);
        let status = calculate_streak(&run_ending(last, 10), today);
        assert_eq!(status.current_streak, 0);
        assert_eq!(status.last_study_date, Some(last));
    }

    #[test]
    fn test_unsorted_history() {
        let today = day(2024, 5, 10);
        let mut records = run_ending(today, 4);
        records.reverse();
        records.swap(0, 2);
        let status = calculate_streak(&records, today);
        assert_eq!(status.current_streak, 4);
    }

    #[test]
    fn test_gap_stops_walk() {
        let today = day(2024, 5, 10);
        let mut records = run_ending(today, 2);
        // Day 3 missing, then older activity
        records.extend(run_ending(today - Duration::days(3), 6));
        let status = calculate_streak(&records, today);
        assert_eq!(status.current_streak, 2);
    }

    #[test]
    fn test_zero_review_record_is_a_gap() {
        let today = day(2024, 5, 10);
        let records = vec![
            active(today, 1),
            DailyReviewRecord::new(today - Duration::days(1)),
            active(today - Duration::days(2), 3),
        ];
        let status = calculate_streak(&records, today);
        assert_eq!(status.current_streak, 1);
    }

    #[test]
    fn test_interleaved_zero_records_for_other_dates() {
        let today = day(2024, 5, 10);
        let mut records = run_ending(today, 3);
        records.insert(1, DailyReviewRecord::new(today - Duration::days(10)));
        records.push(DailyReviewRecord::new(today - Duration::days(4)));
        let status = calculate_streak(&records, today);
        assert_eq!(status.current_streak, 3);
    }

    #[test]
    fn test_duplicate_dates_count_once() {
        let today = day(2024, 5, 10);
        let records = vec![
            active(today, 1),
            active(today, 2),
            DailyReviewRecord::new(today - Duration::days(1)),
            active(today - Duration::days(1), 1),
        ];
        let status = calculate_streak(&records, today);
        assert_eq!(status.current_streak, 2);
    }

    #[test]
    fn test_future_anchor_is_not_current() {
        let today = day(2024, 5, 10);
        let tomorrow = today + Duration::days(1);
        let status = calculate_streak(&[active(tomorrow, 1)], today);
        assert_eq!(status.current_streak, 0);
        assert_eq!(status.last_study_date, Some(tomorrow));
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let today = day(2024, 3, 2);
        let status = calculate_streak(&run_ending(today, 5), today);
        assert_eq!(status.current_streak, 5);
    }

    #[test]
    fn test_studied_on() {
        let today = day(2024, 5, 10);
        let records = vec![active(today, 1), DailyReviewRecord::new(today - Duration::days(1))];
        assert!(studied_on(&records, today));
        assert!(!studied_on(&records, today - Duration::days(1)));
        assert!(!studied_on(&records, today - Duration::days(2)));
    }

    #[test]
    fn test_update_awards_milestone_and_raises_longest() {
        let today = day(2024, 5, 10);
        let now = Utc::now();
        let history = StreakHistory::default();

        let updated = update_streak_after_review(&history, &run_ending(today, 7), today, now);

        assert_eq!(updated.current_streak, 7);
        assert_eq!(updated.longest_streak, 7);
        assert_eq!(updated.last_study_date, Some(today));
        assert_eq!(updated.achievements.len(), 1);
        assert_eq!(updated.achievements[0].milestone, 7);
        assert_eq!(updated.achievements[0].achieved_at, now);
    }

    #[test]
    fn test_update_is_monotone_when_streak_breaks() {
        let today = day(2024, 5, 10);
        let earned = Utc::now() - Duration::days(30);
        let history = StreakHistory {
            current_streak: 20,
            longest_streak: 20,
            last_study_date: Some(today - Duration::days(5)),
            achievements: vec![
                StreakAchievement { milestone: 7, achieved_at: earned },
                StreakAchievement { milestone: 14, achieved_at: earned },
            ],
        };

        let records = run_ending(today - Duration::days(5), 20);
        let updated = update_streak_after_review(&history, &records, today, Utc::now());

        assert_eq!(updated.current_streak, 0);
        assert_eq!(updated.longest_streak, 20);
        assert_eq!(updated.achievements, history.achievements);
    }

    #[test]
    fn test_update_keeps_prior_achievements_in_order() {
        let today = day(2024, 5, 10);
        let earned = Utc::now() - Duration::days(100);
        let history = StreakHistory {
            current_streak: 6,
            longest_streak: 9,
            last_study_date: Some(today - Duration::days(1)),
            achievements: vec![StreakAchievement { milestone: 7, achieved_at: earned }],
        };

        let updated = update_streak_after_review(&history, &run_ending(today, 35), today, Utc::now());

        let milestones: Vec<u32> = updated.achievements.iter().map(|a| a.milestone).collect();
        assert_eq!(milestones, vec![7, 14, 30]);
        assert_eq!(updated.achievements[0].achieved_at, earned);
        assert_eq!(updated.longest_streak, 35);
    }
}
