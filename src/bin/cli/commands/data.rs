use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use recall_lib::flashcards::export::{
    clear_all_flashcard_data, export_all_flashcard_data, get_data_summary, import_flashcard_data,
    read_export, write_export,
};

use crate::app::App;
use crate::OutputFormat;

pub fn run_summary(app: &App, format: &OutputFormat) -> Result<()> {
    let summary = get_data_summary(app.storage.store());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            println!("Cards:          {}", summary.total_cards);
            println!("Packs:          {}", summary.total_packs);
            println!("Reviews:        {}", summary.total_reviews);
            println!("Longest streak: {} days", summary.streak_days);
            match summary.oldest_card_date {
                Some(date) => println!("Oldest card:    {}", date.format("%Y-%m-%d")),
                None => println!("Oldest card:    -"),
            }
        }
    }

    Ok(())
}

pub fn run_export(app: &App, output: Option<&Path>) -> Result<()> {
    let snapshot = export_all_flashcard_data(app.storage.store(), Utc::now());

    match output {
        Some(path) => {
            write_export(&snapshot, path)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            eprintln!(
                "Exported {} cards and {} review days to {}",
                snapshot.cards.len(),
                snapshot.review_history.len(),
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&snapshot)?),
    }

    Ok(())
}

pub fn run_import(app: &mut App, path: &Path) -> Result<()> {
    let snapshot = read_export(path)
        .with_context(|| format!("Failed to read export from {}", path.display()))?;
    import_flashcard_data(app.storage.store_mut(), &snapshot).context("Failed to import data")?;

    println!(
        "Imported {} cards, {} packs, {} review days",
        snapshot.cards.len(),
        snapshot.packs.len(),
        snapshot.review_history.len()
    );
    Ok(())
}

pub fn run_clear(app: &mut App, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete all data without --yes");
    }

    clear_all_flashcard_data(app.storage.store_mut()).context("Failed to clear data")?;
    println!("All flashcard data deleted.");
    Ok(())
}
