use anyhow::{Context, Result};
use uuid::Uuid;

use recall_lib::flashcards::milestones::milestone_label;
use recall_lib::flashcards::ReviewRating;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    card_id: Uuid,
    rating: ReviewRating,
    minutes: Option<u32>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let minutes = minutes.unwrap_or(app.config.default_minutes);
    let outcome = app
        .storage
        .record_review(card_id, rating, minutes)
        .context("Failed to record review")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Plain => {
            println!(
                "Recorded '{}' for {} ({} reviews today)",
                rating, card_id, outcome.record.total_reviews
            );
            println!("  Streak: {} days", outcome.streak_history.current_streak);
            for achievement in &outcome.new_achievements {
                let line = format!("  Milestone reached: {}!", milestone_label(achievement.milestone));
                println!("{}", paint(&line, Color::GREEN, use_color));
            }
        }
    }

    Ok(())
}
