//! Typed access to persisted flashcard data
//!
//! [`FlashcardStorage`] sits on top of any [`KeyValueStore`], validates what
//! comes out of it, and runs the review flow: update today's record, update
//! lifetime stats, recompute the streak, write everything back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::dates::DayBoundary;
use super::messages::streak_message;
use super::milestones::{milestone_label, milestone_progress, MilestoneProgress};
use super::models::*;
use super::store::{load_collection, save_collection, KeyValueStore, StorageKey};
use super::streak::{calculate_streak, studied_on, update_streak_after_review};

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported export version: {0}")]
    UnsupportedVersion(u32),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Pack not found: {0}")]
    PackNotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// Everything that changed as a result of one graded review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// Today's record after the review was added
    pub record: DailyReviewRecord,
    pub streak_history: StreakHistory,
    /// Achievements earned by this review, ascending by milestone
    pub new_achievements: Vec<StreakAchievement>,
}

/// Streak state prepared for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakOverview {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: Option<NaiveDate>,
    pub studied_today: bool,
    pub message: String,
    pub progress: MilestoneProgress,
    pub achievements: Vec<StreakAchievement>,
}

/// Storage manager for flashcard study data
pub struct FlashcardStorage<S: KeyValueStore> {
    store: S,
    day_boundary: DayBoundary,
}

impl<S: KeyValueStore> FlashcardStorage<S> {
    pub fn new(store: S, day_boundary: DayBoundary) -> Self {
        Self {
            store,
            day_boundary,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    // ==================== Collections ====================

    pub fn cards(&self) -> Vec<Flashcard> {
        load_collection(&self.store, StorageKey::Cards)
    }

    pub fn packs(&self) -> Vec<CardPack> {
        load_collection(&self.store, StorageKey::Packs)
    }

    pub fn stats(&self) -> FlashcardStats {
        load_collection(&self.store, StorageKey::Stats)
    }

    pub fn review_history(&self) -> Vec<DailyReviewRecord> {
        load_collection(&self.store, StorageKey::History)
    }

    pub fn streak_history(&self) -> StreakHistory {
        load_collection(&self.store, StorageKey::Streak)
    }

    pub fn sessions(&self) -> Vec<ReviewSession> {
        load_collection(&self.store, StorageKey::Sessions)
    }

    pub fn save_cards(&mut self, cards: &[Flashcard]) -> Result<()> {
        save_collection(&mut self.store, StorageKey::Cards, cards)
    }

    pub fn save_packs(&mut self, packs: &[CardPack]) -> Result<()> {
        save_collection(&mut self.store, StorageKey::Packs, packs)
    }

    pub fn save_stats(&mut self, stats: &FlashcardStats) -> Result<()> {
        save_collection(&mut self.store, StorageKey::Stats, stats)
    }

    pub fn save_review_history(&mut self, history: &[DailyReviewRecord]) -> Result<()> {
        save_collection(&mut self.store, StorageKey::History, history)
    }

    pub fn save_streak_history(&mut self, streak: &StreakHistory) -> Result<()> {
        save_collection(&mut self.store, StorageKey::Streak, streak)
    }

    pub fn save_sessions(&mut self, sessions: &[ReviewSession]) -> Result<()> {
        save_collection(&mut self.store, StorageKey::Sessions, sessions)
    }

    // ==================== Cards & Packs ====================

    /// Create a new pack
    pub fn add_pack(&mut self, name: String, description: Option<String>) -> Result<CardPack> {
        let mut pack = CardPack::new(name);
        pack.description = description;

        let mut packs = self.packs();
        packs.push(pack.clone());
        self.save_packs(&packs)?;

        log::debug!("Created pack {} ({})", pack.name, pack.id);
        Ok(pack)
    }

    /// Store a card, checking that its pack exists
    pub fn add_card(&mut self, card: Flashcard) -> Result<Flashcard> {
        if let Some(pack_id) = card.pack_id {
            if !self.packs().iter().any(|p| p.id == pack_id) {
                return Err(FlashcardStorageError::PackNotFound(pack_id));
            }
        }

        let mut cards = self.cards();
        cards.push(card.clone());
        self.save_cards(&cards)?;

        log::debug!("Created card {}", card.id);
        Ok(card)
    }

    // ==================== Reviews ====================

    /// Record a graded review happening now
    pub fn record_review(
        &mut self,
        card_id: Uuid,
        rating: ReviewRating,
        minutes: u32,
    ) -> Result<ReviewOutcome> {
        self.record_review_at(card_id, rating, minutes, Utc::now())
    }

    /// Record a graded review at a given instant
    pub fn record_review_at(
        &mut self,
        card_id: Uuid,
        rating: ReviewRating,
        minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome> {
        let today = self.day_boundary.day_of(now);

        let mut history = self.review_history();
        let position = match history.iter().position(|r| r.date == today) {
            Some(pos) => pos,
            None => {
                history.push(DailyReviewRecord::new(today));
                history.len() - 1
            }
        };
        history[position].record(card_id, rating, minutes);
        let record = history[position].clone();
        history.sort_by(|a, b| a.date.cmp(&b.date));

        let mut stats = self.stats();
        stats.record(rating, minutes, now);

        let previous = self.streak_history();
        let streak_history = update_streak_after_review(&previous, &history, today, now);
        let new_achievements = streak_history.achievements[previous.achievements.len()..].to_vec();

        self.save_review_history(&history)?;
        self.save_stats(&stats)?;
        self.save_streak_history(&streak_history)?;

        for achievement in &new_achievements {
            log::info!(
                "Reached {} streak milestone ({} days)",
                milestone_label(achievement.milestone),
                achievement.milestone
            );
        }

        Ok(ReviewOutcome {
            record,
            streak_history,
            new_achievements,
        })
    }

    /// Append a finished session
    pub fn record_session(&mut self, session: ReviewSession) -> Result<()> {
        let mut sessions = self.sessions();
        sessions.push(session);
        self.save_sessions(&sessions)
    }

    // ==================== Status ====================

    /// Current streak state, recomputed against today
    pub fn status(&self) -> StreakOverview {
        self.status_on(self.day_boundary.today())
    }

    /// Streak state as seen on `today`, without persisting anything
    pub fn status_on(&self, today: NaiveDate) -> StreakOverview {
        let history = self.review_history();
        let stored = self.streak_history();

        let status = calculate_streak(&history, today);
        let studied_today = studied_on(&history, today);

        StreakOverview {
            current_streak: status.current_streak,
            longest_streak: stored.longest_streak.max(status.current_streak),
            last_study_date: status.last_study_date,
            studied_today,
            message: streak_message(status.current_streak, studied_today),
            progress: milestone_progress(status.current_streak),
            achievements: stored.achievements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::store::{FileStore, MemoryStore};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn memory_storage() -> FlashcardStorage<MemoryStore> {
        FlashcardStorage::new(MemoryStore::new(), DayBoundary::Utc)
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_review_creates_record_and_streak() {
        let mut storage = memory_storage();
        let card = Uuid::new_v4();

        let outcome = storage
            .record_review_at(card, ReviewRating::Good, 3, at(2024, 5, 10))
            .unwrap();

        assert_eq!(outcome.record.total_reviews, 1);
        assert_eq!(outcome.record.good, 1);
        assert_eq!(outcome.streak_history.current_streak, 1);
        assert_eq!(outcome.streak_history.longest_streak, 1);
        assert!(outcome.new_achievements.is_empty());

        assert_eq!(storage.review_history().len(), 1);
        assert_eq!(storage.stats().total_reviews, 1);
        assert_eq!(storage.stats().total_minutes, 3);
        assert_eq!(storage.streak_history().current_streak, 1);
    }

    #[test]
    fn test_huge_minutes_do_not_overflow() {
        let mut storage = memory_storage();
        let card = Uuid::new_v4();
        let now = at(2024, 5, 10);

        storage.record_review_at(card, ReviewRating::Good, u32::MAX, now).unwrap();
        let outcome = storage.record_review_at(card, ReviewRating::Good, 1, now).unwrap();

        assert_eq!(outcome.record.minutes_studied, u32::MAX);
        assert_eq!(outcome.record.total_reviews, 2);
        assert_eq!(storage.stats().total_minutes, u32::MAX as u64 + 1);
    }

    #[test]
    fn test_same_day_reviews_share_a_record() {
        let mut storage = memory_storage();
        let card = Uuid::new_v4();
        let now = at(2024, 5, 10);

        storage.record_review_at(card, ReviewRating::Again, 1, now).unwrap();
        let outcome = storage
            .record_review_at(card, ReviewRating::Easy, 1, now + Duration::hours(2))
            .unwrap();

        assert_eq!(outcome.record.total_reviews, 2);
        assert_eq!(outcome.record.unique_cards.len(), 1);
        assert_eq!(storage.review_history().len(), 1);
        assert_eq!(outcome.streak_history.current_streak, 1);
    }

    #[test]
    fn test_seventh_day_awards_first_milestone_once() {
        let mut storage = memory_storage();
        let card = Uuid::new_v4();
        let start = at(2024, 5, 1);

        let mut last = None;
        for offset in 0..7 {
            last = Some(
                storage
                    .record_review_at(card, ReviewRating::Good, 1, start + Duration::days(offset))
                    .unwrap(),
            );
        }
        let outcome = last.unwrap();
        assert_eq!(outcome.streak_history.current_streak, 7);
        assert_eq!(outcome.new_achievements.len(), 1);
        assert_eq!(outcome.new_achievements[0].milestone, 7);

        let again = storage
            .record_review_at(card, ReviewRating::Good, 1, start + Duration::days(6))
            .unwrap();
        assert!(again.new_achievements.is_empty());
        assert_eq!(storage.streak_history().achievements.len(), 1);
    }

    #[test]
    fn test_broken_streak_keeps_longest() {
        let mut storage = memory_storage();
        let card = Uuid::new_v4();
        let start = at(2024, 5, 1);

        for offset in 0..4 {
            storage
                .record_review_at(card, ReviewRating::Good, 1, start + Duration::days(offset))
                .unwrap();
        }
        let outcome = storage
            .record_review_at(card, ReviewRating::Good, 1, start + Duration::days(10))
            .unwrap();

        assert_eq!(outcome.streak_history.current_streak, 1);
        assert_eq!(outcome.streak_history.longest_streak, 4);
    }

    #[test]
    fn test_status_recomputes_stale_streak() {
        let mut storage = memory_storage();
        let card = Uuid::new_v4();
        let start = at(2024, 5, 1);
        for offset in 0..3 {
            storage
                .record_review_at(card, ReviewRating::Good, 1, start + Duration::days(offset))
                .unwrap();
        }

        let later = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        let overview = storage.status_on(later);
        assert_eq!(overview.current_streak, 0);
        assert_eq!(overview.longest_streak, 3);
        assert!(!overview.studied_today);
        assert_eq!(overview.message, "Start a streak today!");
        assert_eq!(overview.last_study_date, NaiveDate::from_ymd_opt(2024, 5, 3));

        // Stored value is left alone
        assert_eq!(storage.streak_history().current_streak, 3);
    }

    #[test]
    fn test_status_studied_today() {
        let mut storage = memory_storage();
        let card = Uuid::new_v4();
        let start = at(2024, 5, 1);
        for offset in 0..6 {
            storage
                .record_review_at(card, ReviewRating::Hard, 1, start + Duration::days(offset))
                .unwrap();
        }

        let overview = storage.status_on(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert!(overview.studied_today);
        assert_eq!(overview.current_streak, 6);
        assert_eq!(overview.message, "Just 1 more day to 1 Week!");
        assert_eq!(overview.progress.days_remaining, 1);
    }

    #[test]
    fn test_add_card_requires_known_pack() {
        let mut storage = memory_storage();
        let orphan = Flashcard::new("Q".into(), "A".into()).in_pack(Uuid::new_v4());
        assert!(matches!(
            storage.add_card(orphan),
            Err(FlashcardStorageError::PackNotFound(_))
        ));

        let pack = storage.add_pack("Deep Learning".into(), None).unwrap();
        let card = Flashcard::new("Who wrote the perceptron paper?".into(), "Rosenblatt".into())
            .in_pack(pack.id);
        storage.add_card(card.clone()).unwrap();

        assert_eq!(storage.cards(), vec![card]);
        assert_eq!(storage.packs().len(), 1);
    }

    #[test]
    fn test_record_session() {
        let mut storage = memory_storage();
        let start = at(2024, 5, 1);
        storage
            .record_session(ReviewSession::new(start, start + Duration::minutes(15), 12))
            .unwrap();
        let sessions = storage.sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].minutes_studied, 15);
    }

    #[test]
    fn test_review_flow_on_disk() {
        let temp = TempDir::new().unwrap();
        let card = Uuid::new_v4();

        {
            let mut storage =
                FlashcardStorage::new(FileStore::new(temp.path().to_path_buf()), DayBoundary::Utc);
            storage
                .record_review_at(card, ReviewRating::Good, 2, at(2024, 5, 1))
                .unwrap();
            storage
                .record_review_at(card, ReviewRating::Good, 2, at(2024, 5, 2))
                .unwrap();
        }

        let reopened =
            FlashcardStorage::new(FileStore::new(temp.path().to_path_buf()), DayBoundary::Utc);
        assert_eq!(reopened.review_history().len(), 2);
        assert_eq!(reopened.streak_history().current_streak, 2);
        assert_eq!(reopened.stats().total_minutes, 4);
    }
}
