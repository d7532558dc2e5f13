use anyhow::Result;

use recall_lib::flashcards::dates::day_key;
use recall_lib::flashcards::milestones::{milestone_label, MILESTONES};

use crate::app::App;
use crate::render::terminal::{paint, progress_bar, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let overview = app.storage.status();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        OutputFormat::Plain => {
            let streak = format!("{} day streak", overview.current_streak);
            println!("{}", paint(&streak, Color::BOLD, use_color));
            println!("  Longest: {} days", overview.longest_streak);
            if let Some(last) = overview.last_study_date {
                println!("  Last studied: {}", day_key(last));
            }
            if let Some(next) = overview.progress.next_milestone {
                println!(
                    "  Next: {} {} {}% ({} days left)",
                    milestone_label(next),
                    progress_bar(overview.progress.progress, 20),
                    overview.progress.progress,
                    overview.progress.days_remaining
                );
            }
            let color = if overview.studied_today { Color::GREEN } else { Color::YELLOW };
            println!();
            println!("{}", paint(&overview.message, color, use_color));
        }
    }

    Ok(())
}

pub fn run_milestones(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let history = app.storage.streak_history();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = MILESTONES
                .iter()
                .map(|m| {
                    let achieved = history.achievements.iter().find(|a| a.milestone == *m);
                    serde_json::json!({
                        "milestone": m,
                        "label": milestone_label(*m),
                        "achievedAt": achieved.map(|a| a.achieved_at.to_rfc3339()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for m in MILESTONES {
                match history.achievements.iter().find(|a| a.milestone == m) {
                    Some(a) => {
                        let line = format!(
                            "[x] {:<9} reached {}",
                            milestone_label(m),
                            a.achieved_at.format("%Y-%m-%d")
                        );
                        println!("{}", paint(&line, Color::GREEN, use_color));
                    }
                    None => {
                        let line = format!("[ ] {}", milestone_label(m));
                        println!("{}", paint(&line, Color::DIM, use_color));
                    }
                }
            }
        }
    }

    Ok(())
}
