//! Recall: flashcard study streaks, milestones and data export

pub mod config;
pub mod flashcards;

pub use config::{ConfigError, RecallConfig};
