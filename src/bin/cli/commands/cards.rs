use anyhow::{Context, Result};
use uuid::Uuid;

use recall_lib::flashcards::Flashcard;

use crate::app::App;
use crate::OutputFormat;

pub fn run_add_card(
    app: &mut App,
    front: String,
    back: String,
    pack: Option<Uuid>,
    tags: Option<&str>,
    event: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let mut card = Flashcard::new(front, back);
    card.pack_id = pack;
    card.source_event_id = event;
    if let Some(tags) = tags {
        card.tags = tags
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    let card = app.storage.add_card(card).context("Failed to add card")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            println!("Added card: \"{}\"", card.front);
            if !card.tags.is_empty() {
                println!("  Tags: {}", card.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "));
            }
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}

pub fn run_add_pack(
    app: &mut App,
    name: String,
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let pack = app
        .storage
        .add_pack(name, description)
        .context("Failed to add pack")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pack)?),
        OutputFormat::Plain => {
            println!("Added pack: \"{}\"", pack.name);
            println!("  ID: {}", pack.id);
        }
    }

    Ok(())
}
