//! # Deckhand CLI Entry Point
//!
//! Deckhand is a terminal deck for named command contexts: switch the active
//! context, run jobs with captured output, and browse everything from a
//! two-panel interface.
//!
//! ## Usage
//!
//! ```bash
//! # Create the example configuration
//! deckhand init
//!
//! # Non-interactive commands
//! deckhand list
//! deckhand switch vpn
//! deckhand run monitoring
//! deckhand add --name docs --label "Docs Server" --command "mkdocs serve"
//! deckhand remove docs
//!
//! # Interactive interface (also the default with no subcommand)
//! deckhand tui
//! ```
//!
//! ## Key Bindings (TUI)
//!
//! - `j` / `Down`, `k` / `Up` - move the cursor
//! - `Space` / `Enter` - run the job under the cursor and record the result
//! - `q` / `Ctrl+C` - quit
//!
//! ## Architecture
//!
//! 1. **Store**: contexts are loaded from a JSON config once at start
//! 2. **Execution**: commands are variable-expanded and run through `sh -c`
//! 3. **UI**: a single-threaded event loop feeds the selection model; every
//!    mutation is persisted synchronously before the next event is read

use deckhand::cli;
use deckhand::config::Config;
use deckhand::store::ContextStore;
use deckhand::ui::{self, App, AppEvent};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Deckhand - a terminal deck for switching command contexts and running jobs
#[derive(Parser, Debug)]
#[command(name = "deckhand")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Switch command contexts and run recorded jobs", long_about = None)]
struct Args {
    /// Path to the configuration file (defaults to the platform config dir)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize the configuration with example contexts
    Init {
        /// Overwrite an existing configuration without prompting
        #[arg(long)]
        force: bool,
    },
    /// List all contexts
    #[command(alias = "ls")]
    List,
    /// Show the current context
    Current,
    /// Make a context current, running its activation command
    Switch { name: String },
    /// Run a context's job and record the result
    Run { name: String },
    /// Add a new context
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        label: String,
        #[arg(long)]
        description: Option<String>,
        /// Shell command for the "run" role
        #[arg(long)]
        command: Option<String>,
        /// Variables as KEY=VALUE (repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },
    /// Remove a context
    #[command(alias = "rm")]
    Remove { name: String },
    /// Start the interactive interface (the default)
    Tui,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    run_application(args).await
}

async fn run_application(args: Args) -> Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path().context("Failed to resolve config path")?,
    };

    match args.command {
        Some(Command::Init { force }) => cli::init(&config_path, force),
        Some(Command::List) => {
            let store = ContextStore::open_at(config_path)?;
            cli::list(&store);
            Ok(())
        }
        Some(Command::Current) => {
            let store = ContextStore::open_at(config_path)?;
            cli::current(&store);
            Ok(())
        }
        Some(Command::Switch { name }) => {
            let mut store = ContextStore::open_at(config_path)?;
            cli::switch(&mut store, &name)
        }
        Some(Command::Run { name }) => {
            let mut store = ContextStore::open_at(config_path)?;
            cli::run(&mut store, &name)
        }
        Some(Command::Add {
            name,
            label,
            description,
            command,
            vars,
        }) => {
            let mut store = ContextStore::open_at(config_path)?;
            cli::add(&mut store, name, label, description, command, vars)
        }
        Some(Command::Remove { name }) => {
            let mut store = ContextStore::open_at(config_path)?;
            cli::remove(&mut store, &name)
        }
        Some(Command::Tui) | None => {
            let store = ContextStore::open_at(config_path)?;
            run_tui(store)
        }
    }
}

fn run_tui(store: ContextStore) -> Result<()> {
    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(store);
    if let Ok(size) = terminal.size() {
        app.width = size.width;
        app.height = size.height;
    }

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader);

    let cleanup_result = cleanup_terminal(&mut terminal);
    let _ = panic::take_hook();

    run_result?;
    cleanup_result?;

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        let Some(event) = event_reader.read_event(Duration::from_millis(100))? else {
            continue;
        };

        let app_event = match event {
            Event::Key(key) => AppEvent::from_key(key),
            Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
            _ => None,
        };

        if let Some(app_event) = app_event {
            // Persistence failures must surface, not be swallowed; anything
            // else is rendered into the output panel by the model itself.
            app.handle(app_event)
                .context("Failed to persist context state")?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}
