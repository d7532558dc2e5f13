//! Whole-dataset export, import, summary and reset

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::*;
use super::storage::{FlashcardStorageError, Result};
use super::store::{load_collection, save_collection, KeyValueStore, StorageKey};

/// Snapshot format version written by this build
pub const EXPORT_VERSION: u32 = 1;

/// Every persisted collection in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
    #[serde(default)]
    pub packs: Vec<CardPack>,
    #[serde(default)]
    pub stats: FlashcardStats,
    #[serde(default)]
    pub review_history: Vec<DailyReviewRecord>,
    #[serde(default)]
    pub streak_history: StreakHistory,
}

/// Aggregate counts over stored data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    pub total_cards: usize,
    pub total_packs: usize,
    pub total_reviews: u64,
    /// Longest streak ever reached
    pub streak_days: u32,
    pub oldest_card_date: Option<DateTime<Utc>>,
}

pub fn export_all_flashcard_data<S: KeyValueStore + ?Sized>(
    store: &S,
    exported_at: DateTime<Utc>,
) -> ExportSnapshot {
    ExportSnapshot {
        version: EXPORT_VERSION,
        exported_at,
        cards: load_collection(store, StorageKey::Cards),
        packs: load_collection(store, StorageKey::Packs),
        stats: load_collection(store, StorageKey::Stats),
        review_history: load_collection(store, StorageKey::History),
        streak_history: load_collection(store, StorageKey::Streak),
    }
}

pub fn get_data_summary<S: KeyValueStore + ?Sized>(store: &S) -> DataSummary {
    let cards: Vec<Flashcard> = load_collection(store, StorageKey::Cards);
    let packs: Vec<CardPack> = load_collection(store, StorageKey::Packs);
    let history: Vec<DailyReviewRecord> = load_collection(store, StorageKey::History);
    let streak: StreakHistory = load_collection(store, StorageKey::Streak);

    DataSummary {
        total_cards: cards.len(),
        total_packs: packs.len(),
        total_reviews: history.iter().map(|r| r.total_reviews as u64).sum(),
        streak_days: streak.longest_streak,
        oldest_card_date: cards.iter().map(|c| c.created_at).min(),
    }
}

/// Remove every persisted key
pub fn clear_all_flashcard_data<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    for key in StorageKey::ALL {
        store.remove(key)?;
    }
    log::info!("Cleared all flashcard data");
    Ok(())
}

/// Replace stored data with the contents of a snapshot
///
/// Sessions are not part of a snapshot and are removed. The streak history
/// is normalized so imported data cannot break its invariants.
pub fn import_flashcard_data<S: KeyValueStore + ?Sized>(
    store: &mut S,
    snapshot: &ExportSnapshot,
) -> Result<()> {
    if snapshot.version > EXPORT_VERSION {
        return Err(FlashcardStorageError::UnsupportedVersion(snapshot.version));
    }

    save_collection(store, StorageKey::Cards, &snapshot.cards)?;
    save_collection(store, StorageKey::Packs, &snapshot.packs)?;
    save_collection(store, StorageKey::Stats, &snapshot.stats)?;
    save_collection(store, StorageKey::History, &snapshot.review_history)?;
    save_collection(
        store,
        StorageKey::Streak,
        &snapshot.streak_history.clone().normalized(),
    )?;
    store.remove(StorageKey::Sessions)?;

    log::info!(
        "Imported {} cards, {} packs, {} review days (exported {})",
        snapshot.cards.len(),
        snapshot.packs.len(),
        snapshot.review_history.len(),
        snapshot.exported_at
    );
    Ok(())
}

/// Write a snapshot as pretty-printed JSON
pub fn write_export(snapshot: &ExportSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}

pub fn read_export(path: &Path) -> Result<ExportSnapshot> {
    let content = fs::read_to_string(path)?;
    let snapshot: ExportSnapshot = serde_json::from_str(&content)?;
    Ok(snapshot)
}
