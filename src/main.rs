//! CinemApp - popular movies and TV shows in your terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinemapp
//!
//! # CLI mode (for automation)
//! cinemapp popular movie --pages 2 --search "spider"
//! cinemapp info 1396 --type tv --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use cinemapp::api::CatalogClient;
use cinemapp::app::{App, AppEvent};
use cinemapp::catalog::FavoritesStore;
use cinemapp::cli::{Cli, Command, ExitCode, Output};
use cinemapp::config::Config;
use cinemapp::{commands, logging, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_stderr(cli.verbose);
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        logging::init_file(cli.verbose);
        let config = Config::resolve(cli.config.as_deref())?;
        run_tui(config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
    };
    let client: Arc<dyn CatalogClient> = Arc::new(config.tmdb_client());

    match cli.command {
        Some(Command::Popular(cmd)) => commands::popular_cmd(cmd, client, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, client, &config, &output).await,

        Some(Command::Login(cmd)) => {
            let service = config.login_service();
            commands::login_cmd(cmd, &service, &output).await
        }

        Some(Command::Profile(cmd)) => commands::profile_cmd(cmd, &config, &output),

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config) -> Result<()> {
    let client: Arc<dyn CatalogClient> = Arc::new(config.tmdb_client());
    let mut app = App::new(
        client,
        FavoritesStore::new(),
        config.login_service(),
        config.profile.clone(),
    )
    .with_image_base_url(config.image_base_url());

    info!("starting TUI");
    let mut terminal = init_terminal()?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, spawns async work, applies results, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    while app.running {
        // Start anything queued by the last key press or event
        for task in app.take_tasks() {
            let tx = tx.clone();
            tokio::spawn(async move {
                // Receiver only goes away on shutdown
                let _ = tx.send(task.await);
            });
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll off the runtime threads so spawned fetches keep progressing
        let key = tokio::task::spawn_blocking(|| -> std::io::Result<Option<Event>> {
            if event::poll(TICK_RATE)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
        .await??;

        if let Some(Event::Key(key)) = key {
            // Only handle key press events (ignore releases on Windows)
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        // Apply completed fetches
        while let Ok(event) = rx.try_recv() {
            debug!(?event, "async result");
            app.on_event(event);
        }
        app.sync_favorites();
    }

    Ok(())
}
