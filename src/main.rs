use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

use workshift::api::{BoardView, CardSummary, WorkShiftApi};
use workshift::config::Config;
use workshift::constants::{
    DEMO_PASSWORD, DEMO_USERNAME, HEADER_DUE_SOON, HEADER_OVERDUE, NO_BOARDS, SUCCESS_CARD_CREATED,
    SUCCESS_CARD_MOVED, SUCCESS_DEMO_SEEDED, SUCCESS_SNAPSHOT_CLEARED, SUCCESS_SNAPSHOT_EXPORTED,
};
use workshift::entities::card;
use workshift::logger::Logger;
use workshift::persistence::{open_store, FileSnapshotStore, SnapshotStore};
use workshift::seed::seed_demo_data;
use workshift::utils::{color, datetime};

#[derive(Parser)]
#[command(name = "workshift")]
#[command(version, about = "Kanban boards in your terminal")]
struct Cli {
    /// Configuration file (defaults to ./workshift.toml, then the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Sign in as this user
    #[arg(short, long, global = true, default_value = DEMO_USERNAME)]
    user: String,

    #[arg(short, long, global = true, default_value = DEMO_PASSWORD)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    InitConfig {
        /// Target path (defaults to the user config directory)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Create the demo user and board
    Seed,
    /// List your boards
    Boards,
    /// Print a board with its lists and cards
    Show { board: i32 },
    /// Append a card to a list
    AddCard { list: i32, title: String },
    /// Move a card to a position in a list
    MoveCard { card: i32, list: i32, position: i32 },
    /// Overdue cards and cards due soon on a board
    Due {
        board: i32,
        /// Window in days (defaults to boards.due_soon_days)
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Write the whole store to a JSON file
    Export { path: PathBuf },
    /// Forget all saved data
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { path, force } = &cli.command {
        let path = match path {
            Some(path) => path.clone(),
            None => Config::get_default_config_path()?,
        };
        if path.exists() && !force {
            anyhow::bail!("{} already exists, use --force to overwrite", path.display());
        }
        return Config::generate_default_config(&path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let logger = Logger::from_config(&config.logging)?;
    logger.install()?;

    let store = open_store(&config)?;
    let api = WorkShiftApi::new(config.clone()).await?;
    api.load_from(store.as_ref()).await?;

    match cli.command {
        Commands::InitConfig { .. } => {}
        Commands::Seed => match seed_demo_data(&api).await? {
            Some(board) => {
                api.save_to(store.as_ref()).await?;
                println!("{}: board {} '{}'", SUCCESS_DEMO_SEEDED, board.id, board.title);
                println!("Sign in as '{}' with password '{}'", DEMO_USERNAME, DEMO_PASSWORD);
            }
            None => println!("Demo data already present"),
        },
        Commands::Boards => {
            sign_in(&api, &cli.user, &cli.password).await?;
            let boards = api.list_boards().await?;
            if boards.is_empty() {
                println!("{}", NO_BOARDS);
            }
            for board in boards {
                let star = if board.is_starred { "★" } else { " " };
                println!("{} {:>4}  {}", star, board.id, board.title);
            }
        }
        Commands::Show { board } => {
            sign_in(&api, &cli.user, &cli.password).await?;
            let view = api.get_board(board).await?;
            print_board(&config, &view);
        }
        Commands::AddCard { list, title } => {
            sign_in(&api, &cli.user, &cli.password).await?;
            let card = api.create_card(list, &title).await?;
            api.save_to(store.as_ref()).await?;
            println!("{}: {} '{}'", SUCCESS_CARD_CREATED, card.id, card.title);
        }
        Commands::MoveCard { card, list, position } => {
            sign_in(&api, &cli.user, &cli.password).await?;
            let card = api.move_card(card, list, position).await?;
            api.save_to(store.as_ref()).await?;
            println!(
                "{}: {} -> list {} position {}",
                SUCCESS_CARD_MOVED, card.id, card.list_id, card.position
            );
        }
        Commands::Due { board, days } => {
            sign_in(&api, &cli.user, &cli.password).await?;
            let due = api
                .due_cards(board, days.unwrap_or(config.boards.due_soon_days))
                .await?;
            print_cards(&config, HEADER_OVERDUE, &due.overdue);
            print_cards(&config, HEADER_DUE_SOON, &due.due_soon);
        }
        Commands::Export { path } => {
            let snapshot = api.snapshot().await?;
            FileSnapshotStore::new(&path).save(&snapshot).await?;
            println!("{}: {} rows to {}", SUCCESS_SNAPSHOT_EXPORTED, snapshot.row_count(), path.display());
        }
        Commands::Reset => {
            store.clear().await?;
            println!("{} ({})", SUCCESS_SNAPSHOT_CLEARED, store.describe());
        }
    }

    debug!("{} log lines buffered", logger.get_logs().len());
    Ok(())
}

async fn sign_in(api: &WorkShiftApi, user: &str, password: &str) -> Result<()> {
    api.login(user, password)
        .await
        .with_context(|| format!("Could not sign in as '{}' (run `workshift seed` first?)", user))?;
    Ok(())
}

fn display_due(config: &Config, due_date: &str) -> String {
    if config.display.relative_dates {
        return datetime::format_human_date(due_date);
    }
    match datetime::parse_date(due_date) {
        Ok(date) => date.format(&config.display.date_format).to_string(),
        Err(_) => due_date.to_string(),
    }
}

fn print_board(config: &Config, view: &BoardView) {
    let star = if view.board.is_starred { " ★" } else { "" };
    println!("{}{}  [{}]", view.board.title, star, view.role);
    if let Some(description) = &view.board.description {
        println!("{}", description);
    }

    for list in &view.lists {
        println!();
        println!("== {} ({}) ==", list.list.title, list.list.id);
        for summary in &list.cards {
            println!("  {}", card_line(config, view, summary));
        }
    }
}

fn card_line(config: &Config, view: &BoardView, summary: &CardSummary) -> String {
    let card = &summary.card;
    let mut line = format!(
        "[{}] {:>4}  {}",
        if card.is_completed { "x" } else { " " },
        card.id,
        card.title
    );

    let labels: Vec<String> = summary
        .label_ids
        .iter()
        .filter_map(|id| view.labels.iter().find(|l| l.id == *id))
        .map(|l| match (l.name.is_empty(), color::palette_name(&l.color)) {
            (false, _) => l.name.clone(),
            (true, Some(name)) => name.to_string(),
            (true, None) => l.color.clone(),
        })
        .collect();
    if !labels.is_empty() {
        line.push_str(&format!("  #{}", labels.join(" #")));
    }
    if let Some(due) = &card.due_date {
        line.push_str(&format!("  due {}", display_due(config, due)));
    }
    if summary.checklist_total > 0 {
        line.push_str(&format!("  ☑ {}/{}", summary.checklist_done, summary.checklist_total));
    }
    if summary.comment_count > 0 {
        line.push_str(&format!("  💬 {}", summary.comment_count));
    }
    if summary.attachment_count > 0 {
        line.push_str(&format!("  📎 {}", summary.attachment_count));
    }
    line
}

fn print_cards(config: &Config, header: &str, cards: &[card::Model]) {
    println!("{} ({})", header, cards.len());
    for card in cards {
        let due = card.due_date.as_deref().map(|d| display_due(config, d)).unwrap_or_default();
        println!("  {:>4}  {}  {}", card.id, card.title, due);
    }
}
