mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use recall_lib::flashcards::ReviewRating;

#[derive(Parser)]
#[command(name = "recall-cli", about = "Flashcard study streaks and milestones", version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overrides the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Record a graded review of a card
    Review {
        /// Card ID
        card_id: Uuid,
        /// again, hard, good or easy
        #[arg(long)]
        rating: ReviewRating,
        /// Minutes spent (defaults to the configured value)
        #[arg(long)]
        minutes: Option<u32>,
    },

    /// Show the current streak and progress to the next milestone
    Status,

    /// List streak milestones and when they were reached
    Milestones,

    /// Show totals over all stored data
    Summary,

    /// Add a card
    AddCard {
        front: String,
        back: String,
        /// Pack ID
        #[arg(long)]
        pack: Option<Uuid>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Timeline event the card belongs to
        #[arg(long)]
        event: Option<String>,
    },

    /// Add a pack
    AddPack {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Export all data as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace stored data with an exported snapshot (sessions are discarded)
    Import {
        path: PathBuf,
    },

    /// Delete all stored data
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Command::Review { card_id, rating, minutes } => {
            commands::review::run(&mut app, card_id, rating, minutes, &cli.format, use_color)?;
        }
        Command::Status => {
            commands::status::run(&app, &cli.format, use_color)?;
        }
        Command::Milestones => {
            commands::status::run_milestones(&app, &cli.format, use_color)?;
        }
        Command::Summary => {
            commands::data::run_summary(&app, &cli.format)?;
        }
        Command::AddCard { front, back, pack, tags, event } => {
            commands::cards::run_add_card(
                &mut app,
                front,
                back,
                pack,
                tags.as_deref(),
                event,
                &cli.format,
            )?;
        }
        Command::AddPack { name, description } => {
            commands::cards::run_add_pack(&mut app, name, description, &cli.format)?;
        }
        Command::Export { output } => {
            commands::data::run_export(&app, output.as_deref())?;
        }
        Command::Import { path } => {
            commands::data::run_import(&mut app, &path)?;
        }
        Command::Clear { yes } => {
            commands::data::run_clear(&mut app, yes)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
