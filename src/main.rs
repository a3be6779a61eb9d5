use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use colored::Colorize;
use tracing::info;

use worktrip::config::{self, CONFIG_FILE};
use worktrip::tui::state::visible_rows;
use worktrip::tui::types::Row;
use worktrip::{logging, model, Config, FileStore, ItemId, Mode, TodoRepo};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "worktrip")]
#[command(author, version, about = "Two-list to-do tracker: Work and Travel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Data directory (default: $WORKTRIP_DATA_DIR, nearest .worktrip/, or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the items of one list
    List {
        /// List to show (default: the current mode)
        #[arg(short, long)]
        mode: Option<ModeArg>,

        /// Show both lists
        #[arg(long, conflicts_with = "mode")]
        all: bool,

        /// Emit JSON rows instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add an item
    Add {
        /// Item text
        text: String,

        /// List to add to (default: the current mode)
        #[arg(short, long)]
        mode: Option<ModeArg>,
    },

    /// Toggle an item's done flag
    Done {
        /// Item id
        id: String,
    },

    /// Replace an item's text
    Edit {
        /// Item id
        id: String,

        /// New text
        text: String,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print or set the current mode
    Mode {
        /// Mode to switch to
        mode: Option<ModeArg>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Work,
    Travel,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Work => Mode::Work,
            ModeArg::Travel => Mode::Travel,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(Command::Completions { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "worktrip", &mut io::stdout());
        return Ok(());
    }

    let data_dir = config::resolve_data_dir(cli.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let config_path = cli.config.unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    let config = Config::load(&config_path)?;
    logging::init(&data_dir, &config.logging)?;
    info!(data_dir = %data_dir.display(), "starting");

    let repo = TodoRepo::new(FileStore::open(&data_dir), &config.storage);

    match cli.command {
        None => worktrip::tui::run(repo, &config.ui),
        Some(Command::List { mode, all, json }) => cmd_list(&repo, mode.map(Mode::from), all, json),
        Some(Command::Add { text, mode }) => cmd_add(&repo, &text, mode.map(Mode::from)),
        Some(Command::Done { id }) => cmd_done(&repo, &ItemId::from(id)),
        Some(Command::Edit { id, text }) => cmd_edit(&repo, &ItemId::from(id), &text),
        Some(Command::Delete { id, yes }) => cmd_delete(&repo, &ItemId::from(id), yes),
        Some(Command::Mode { mode }) => cmd_mode(&repo, mode.map(Mode::from)),
        Some(Command::Completions { .. }) => Ok(()),
    }
}

fn cmd_list(repo: &TodoRepo<FileStore>, mode: Option<Mode>, all: bool, json: bool) -> Result<()> {
    let items = repo.load_items()?;
    let modes = if all {
        Mode::ALL.to_vec()
    } else {
        vec![mode.map_or_else(|| repo.load_mode(), Ok)?]
    };

    if json {
        let rows: Vec<Row> = modes
            .iter()
            .flat_map(|m| visible_rows(&items, *m))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for m in modes {
        let rows = visible_rows(&items, m);
        println!("{} ({})", m.label().bold(), rows.len());
        if rows.is_empty() {
            println!("  {}", m.placeholder().dimmed());
        }
        for row in rows {
            print_row(&row);
        }
    }
    Ok(())
}

fn print_row(row: &Row) {
    let check = if row.done {
        "✔".truecolor(0xDC, 0x14, 0x3C)
    } else {
        "✔".dimmed()
    };
    let text = if row.done {
        row.text.dimmed().strikethrough()
    } else {
        row.text.normal()
    };
    println!("  {} {}  {}", check, row.id.as_str().dimmed(), text);
}

fn cmd_add(repo: &TodoRepo<FileStore>, text: &str, mode: Option<Mode>) -> Result<()> {
    let items = repo.load_items()?;
    let mode = mode.map_or_else(|| repo.load_mode(), Ok)?;
    let Some((items, id)) = items.add(text, mode, model::now_millis()) else {
        return Err("item text must not be empty".into());
    };
    repo.save_items(&items)?;
    println!("{} {} to {}", "Added".green(), id, mode);
    Ok(())
}

fn cmd_done(repo: &TodoRepo<FileStore>, id: &ItemId) -> Result<()> {
    let items = repo.load_items()?.set_done(id)?;
    repo.save_items(&items)?;
    let done = items.get(id).is_some_and(|item| item.done);
    println!("{} {}", id, if done { "done".green() } else { "not done".yellow() });
    Ok(())
}

fn cmd_edit(repo: &TodoRepo<FileStore>, id: &ItemId, text: &str) -> Result<()> {
    let items = repo.load_items()?;
    if items.get(id).is_some_and(|item| item.done) {
        return Err(format!(
            "item {id} is done; toggle it back with `worktrip done {id}` to edit"
        )
        .into());
    }
    let Some(items) = items.set_text(id, text)? else {
        return Err("item text must not be empty".into());
    };
    repo.save_items(&items)?;
    println!("{} {}", "Edited".green(), id);
    Ok(())
}

fn cmd_delete(repo: &TodoRepo<FileStore>, id: &ItemId, yes: bool) -> Result<()> {
    let items = repo.load_items()?;
    let Some(item) = items.get(id) else {
        return Err(worktrip::StoreError::NotFound(id.clone()).into());
    };

    if !yes && !confirm(&item.text)? {
        println!("Cancelled");
        return Ok(());
    }

    let items = items.delete(id);
    repo.save_items(&items)?;
    println!("{} {}", "Deleted".red(), id);
    Ok(())
}

/// Ask on stdin; only an explicit yes confirms
fn confirm(text: &str) -> Result<bool> {
    print!("{}\nAre you sure? [y/N] ", text.bold());
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn cmd_mode(repo: &TodoRepo<FileStore>, mode: Option<Mode>) -> Result<()> {
    match mode {
        Some(mode) => {
            repo.save_mode(mode)?;
            println!("Switched to {}", mode.label().bold());
        }
        None => println!("{}", repo.load_mode()?),
    }
    Ok(())
}
