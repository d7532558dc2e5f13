//! Flashcard study tracking for Recall
//!
//! This module provides:
//! - Calendar-day keys with an explicit timezone policy
//! - Daily review records and lifetime stats
//! - Streak calculation and milestone achievements
//! - Streak status messages
//! - Export, import, summary and reset over a pluggable key-value store

pub mod dates;
pub mod export;
pub mod messages;
pub mod milestones;
pub mod models;
pub mod storage;
pub mod store;
pub mod streak;

pub use dates::DayBoundary;
pub use models::*;
pub use storage::{FlashcardStorage, FlashcardStorageError, ReviewOutcome, StreakOverview};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageKey};
