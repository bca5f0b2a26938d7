mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
};
use tracing::info;

use typespeed::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    keys::{map_key, KeyAction},
    logging,
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner, POLL_INTERVAL},
    session::{Session, StateChange},
};

use crate::ui::{ui, Theme};

/// one-minute typing speed and accuracy test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the sentence on screen as fast and accurately as you can. The clock starts on your first keystroke and runs for sixty seconds; press Enter to finish early."
)]
pub struct Cli {
    /// seed for choosing sentences, for repeatable sessions
    #[clap(long)]
    seed: Option<u64>,

    /// tracing filter directive, e.g. "typespeed=debug"
    #[clap(long)]
    log_filter: Option<String>,

    /// stronger colors for correct and incorrect characters
    #[clap(long)]
    high_contrast: bool,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command line flags layered over the stored config
    fn merge(&self, stored: Config) -> Config {
        Config {
            log_filter: logging::resolve_filter(
                self.log_filter.as_deref(),
                std::env::var(logging::LOG_ENV).ok().as_deref(),
                &stored.log_filter,
            ),
            high_contrast: self.high_contrast || stored.high_contrast,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub theme: Theme,
}

impl App {
    pub fn new(cli: &Cli, config: &Config) -> Self {
        Self::with_session(Session::new(cli.seed), config.high_contrast)
    }

    pub fn with_session(session: Session, high_contrast: bool) -> Self {
        Self {
            session,
            theme: Theme::new(high_contrast),
        }
    }

    /// Apply a key press. `None` means the user asked to quit.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<StateChange> {
        match map_key(key, self.session.input(), self.session.input_enabled()) {
            KeyAction::Quit => None,
            KeyAction::Restart => Some(self.session.reset()),
            KeyAction::Edit(value) => Some(self.session.handle_input_change(&value)),
            KeyAction::Ignore => Some(StateChange::Unchanged),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli.config_store();
    let config = cli.merge(store.load());

    let _log_guard = match AppDirs::log_path() {
        Some(path) => logging::init(&path, &config.log_filter)?,
        None => None,
    };
    info!(seed = ?cli.seed, high_contrast = config.high_contrast, "starting");

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    install_terminal_restore_hook();

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli, &config);
    let runner = Runner::new(CrosstermEventSource::new(), POLL_INTERVAL);
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

/// Leave raw mode and the alternate screen, ignoring failures.
fn restore_terminal<W: Write>(out: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen, Show);
}

/// Restore the terminal before any earlier hook prints the panic message.
fn install_terminal_restore_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal(&mut io::stdout());
        previous(info);
    }));
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step(app.session.time_until_next_tick());
        let mut redraw = app.session.fire_due_ticks().needs_redraw();

        match event {
            AppEvent::Poll => {}
            AppEvent::Resize => redraw = true,
            AppEvent::Key(key) => match app.on_key(key) {
                Some(change) => redraw |= change.needs_redraw(),
                None => break,
            },
        }

        if redraw {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}
