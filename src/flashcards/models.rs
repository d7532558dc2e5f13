//! Data models for the flashcard study tracker

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of flashcards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPack {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CardPack {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A flashcard with question (front) and answer (back)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<Uuid>,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Timeline event this card was generated from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_event_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(front: String, back: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            pack_id: None,
            front,
            back,
            tags: Vec::new(),
            source_event_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn in_pack(mut self, pack_id: Uuid) -> Self {
        self.pack_id = Some(pack_id);
        self
    }
}

/// How well a card was recalled during review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewRating {
    Again,
    Hard,
    Good,
    Easy,
}

impl ReviewRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "again" | "1" => Ok(Self::Again),
            "hard" | "2" => Ok(Self::Hard),
            "good" | "3" => Ok(Self::Good),
            "easy" | "4" => Ok(Self::Easy),
            other => Err(format!("unknown rating '{}', expected again|hard|good|easy", other)),
        }
    }
}

/// Aggregate review activity for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReviewRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub again: u32,
    #[serde(default)]
    pub hard: u32,
    #[serde(default)]
    pub good: u32,
    #[serde(default)]
    pub easy: u32,
    #[serde(default)]
    pub minutes_studied: u32,
    #[serde(default)]
    pub unique_cards: BTreeSet<Uuid>,
}

impl DailyReviewRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_reviews: 0,
            again: 0,
            hard: 0,
            good: 0,
            easy: 0,
            minutes_studied: 0,
            unique_cards: BTreeSet::new(),
        }
    }

    /// Add one graded review to this day
    pub fn record(&mut self, card_id: Uuid, rating: ReviewRating, minutes: u32) {
        self.total_reviews = self.total_reviews.saturating_add(1);
        let bucket = match rating {
            ReviewRating::Again => &mut self.again,
            ReviewRating::Hard => &mut self.hard,
            ReviewRating::Good => &mut self.good,
            ReviewRating::Easy => &mut self.easy,
        };
        *bucket = bucket.saturating_add(1);
        self.minutes_studied = self.minutes_studied.saturating_add(minutes);
        self.unique_cards.insert(card_id);
    }

    /// A day only counts toward a streak if something was reviewed
    pub fn is_active(&self) -> bool {
        self.total_reviews > 0
    }
}

/// One-time award for reaching a streak milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakAchievement {
    /// Streak length (in days) that earned this achievement
    pub milestone: u32,
    pub achieved_at: DateTime<Utc>,
}

/// Per-user streak state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakHistory {
    #[serde(default)]
    pub current_streak: u32,
    /// Never decreases, even when the current streak breaks
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_study_date: Option<NaiveDate>,
    /// Ordered by time earned, unique by milestone
    #[serde(default)]
    pub achievements: Vec<StreakAchievement>,
}

impl StreakHistory {
    pub fn has_milestone(&self, milestone: u32) -> bool {
        self.achievements.iter().any(|a| a.milestone == milestone)
    }

    /// Restore the invariants of data that came from outside: the longest
    /// streak covers the current one and each milestone is awarded once
    pub fn normalized(self) -> Self {
        let mut history = StreakHistory {
            longest_streak: self.longest_streak.max(self.current_streak),
            achievements: Vec::with_capacity(self.achievements.len()),
            ..self
        };
        for achievement in self.achievements {
            if !history.has_milestone(achievement.milestone) {
                history.achievements.push(achievement);
            }
        }
        history
    }
}

/// Lifetime review totals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardStats {
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub again: u64,
    #[serde(default)]
    pub hard: u64,
    #[serde(default)]
    pub good: u64,
    #[serde(default)]
    pub easy: u64,
    #[serde(default)]
    pub total_minutes: u64,
    #[serde(default)]
    pub last_review_at: Option<DateTime<Utc>>,
}

impl FlashcardStats {
    pub fn record(&mut self, rating: ReviewRating, minutes: u32, at: DateTime<Utc>) {
        self.total_reviews = self.total_reviews.saturating_add(1);
        let bucket = match rating {
            ReviewRating::Again => &mut self.again,
            ReviewRating::Hard => &mut self.hard,
            ReviewRating::Good => &mut self.good,
            ReviewRating::Easy => &mut self.easy,
        };
        *bucket = bucket.saturating_add(1);
        self.total_minutes = self.total_minutes.saturating_add(minutes as u64);
        self.last_review_at = Some(at);
    }
}

/// A completed study session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    #[serde(default)]
    pub cards_reviewed: u32,
    #[serde(default)]
    pub minutes_studied: u32,
}

impl ReviewSession {
    pub fn new(started_at: DateTime<Utc>, ended_at: DateTime<Utc>, cards_reviewed: u32) -> Self {
        let minutes_studied = (ended_at - started_at).num_minutes().max(0) as u32;
        Self {
            id: Uuid::new_v4(),
            started_at,
            ended_at,
            cards_reviewed,
            minutes_studied,
        }
    }
}
