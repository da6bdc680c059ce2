use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use listkeep::core::server::Services;
use listkeep::core::{
    ClientConfig, ConfigStore, Configurable, DEFAULT_CONFIG_FILE, LogConfig, ServerConfig,
    init_logging,
};
use listkeep::{
    AppState, NoteStore, NotesBoard, NotesClient, ProfileCard, TodoBoard, TodoClient, TodoStore,
};
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, Parser)]
#[command(name = "listkeep", version, about = "To-do and notes services with their front ends")]
struct Cli {
    /// Configuration file merged over ./listkeep.toml (when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the to-do and notes backends until Ctrl-C
    Serve,
    /// Work with the to-do backend
    Todos {
        #[command(subcommand)]
        action: TodoAction,
    },
    /// Work with the notes backend
    Notes {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Print the profile card HTML
    Profile,
}

#[derive(Debug, Subcommand)]
enum TodoAction {
    List,
    Add {
        #[arg(required = true)]
        task: Vec<String>,
    },
    Delete {
        id: i64,
    },
    /// Flip completion for display only, nothing is saved
    Toggle {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum NoteAction {
    List,
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigStore::layered(DEFAULT_CONFIG_FILE, cli.config.as_deref())?;

    let log_config: LogConfig = config.get()?;
    let _log_guard = init_logging(&log_config)?;
    match config.path() {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No configuration file, using defaults"),
    }

    match cli.command {
        Command::Serve => serve(&config).await,
        Command::Todos { action } => todos(config.get()?, action).await,
        Command::Notes { action } => notes(config.get()?, action).await,
        Command::Profile => {
            print!("{}", load_profile(&config)?.render_html());
            Ok(())
        }
    }
}

fn load_profile(config: &ConfigStore) -> Result<ProfileCard> {
    if !config.has_section(ProfileCard::PREFIX) {
        warn!("No [{}] section, using the default card", ProfileCard::PREFIX);
    }
    config.get()
}

async fn serve(config: &ConfigStore) -> Result<()> {
    let server: ServerConfig = config.get()?;
    let profile = load_profile(config)?;

    let todos = if server.seed_todos {
        TodoStore::seeded()
    } else {
        TodoStore::new()
    };
    info!(seeded = server.seed_todos, "Starting services");
    let state = AppState::new(todos, NoteStore::new(), profile);

    let services = Services::bind(server, state).await?;
    services
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}

async fn todos(config: ClientConfig, action: TodoAction) -> Result<()> {
    let client = TodoClient::new(&config.todos_url, config.timeout())
        .context("Failed to create to-do client")?;
    let mut board = TodoBoard::new(client);
    board.refresh().await;

    match action {
        TodoAction::List => {}
        TodoAction::Add { task } => {
            if !board.add(&task.join(" ")).await && board.error().is_none() {
                bail!("Task is required");
            }
        }
        TodoAction::Delete { id } => {
            board.delete(id).await;
        }
        TodoAction::Toggle { id } => {
            if !board.toggle(id) && board.error().is_none() {
                bail!("No to-do with id {}", id);
            }
            info!(id, "completion toggled locally");
        }
    }

    println!("{}", board.render());
    match board.error() {
        Some(error) => bail!("{}", error),
        None => Ok(()),
    }
}

async fn notes(config: ClientConfig, action: NoteAction) -> Result<()> {
    let client = NotesClient::new(&config.notes_url, config.timeout())
        .context("Failed to create notes client")?;
    let mut board = NotesBoard::new(client);
    board.refresh().await;

    match action {
        NoteAction::List => {}
        NoteAction::Add { title, content } => {
            board.set_title(title);
            board.set_content(content);
            board.submit().await;
        }
        NoteAction::Edit { id, title, content } => {
            let Some(note) = board.notes().iter().find(|n| n.id == id).cloned() else {
                bail!("No note with id {}", id);
            };
            board.edit(&note);
            if let Some(title) = title {
                board.set_title(title);
            }
            if let Some(content) = content {
                board.set_content(content);
            }
            board.submit().await;
        }
        NoteAction::Delete { id } => {
            board.delete(&id).await;
        }
    }

    print!("{}", board.render());
    match board.error() {
        Some(error) => bail!("{}", error),
        None => Ok(()),
    }
}
