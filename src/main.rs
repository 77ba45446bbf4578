pub mod ui;

use std::error::Error;
use std::fs;
use std::io::{self, stdin};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::warn;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use kubik::config::{Config, ConfigStore, FileConfigStore};
use kubik::runtime::{CrosstermEventSource, FixedTicker, Runner, TimerEvent};
use kubik::scramble::{PuzzleKind, ScrambleGenerator};
use kubik::session::TimerSession;
use kubik::solve::Solve;
use kubik::store::{FileSolveStore, SolveStore};
use kubik::transfer::{self, ExportDocument};

const TICK_RATE_MS: u64 = 50;

/// sleek cube timer tui with rolling averages and portable solve history
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A sleek speedcubing timer TUI with WCA-style rolling averages, a solve trend chart, and a portable JSON solve history supporting import, export, and merge."
)]
pub struct Cli {
    /// puzzle to generate scrambles for
    #[clap(short = 'p', long, value_enum)]
    puzzle: Option<PuzzleKind>,

    /// merge solves from an exported JSON document, then exit
    #[clap(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// write the solve history as a JSON export document, then exit
    #[clap(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// write the solve history as CSV, then exit
    #[clap(long, value_name = "FILE")]
    export_csv: Option<PathBuf>,

    /// override the solve snapshot location
    #[clap(long, value_name = "FILE")]
    storage_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Timing,
    Confirm(PendingAction),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingAction {
    DeleteSelected,
    ClearAll,
}

#[derive(Debug)]
pub struct App {
    pub solves: Vec<Solve>,
    pub session: TimerSession,
    pub scramble: String,
    pub generator: ScrambleGenerator,
    pub state: AppState,
    pub selected: usize,
    pub config: Config,
    store: Box<dyn SolveStore>,
}

impl App {
    pub fn new(config: Config, store: Box<dyn SolveStore>) -> Self {
        let solves = store.load();
        let generator = ScrambleGenerator::new(config.puzzle);
        Self {
            solves,
            session: TimerSession::new(),
            scramble: generator.generate(),
            generator,
            state: AppState::Timing,
            selected: 0,
            config,
            store,
        }
    }

    /// Record a finished attempt as the newest solve.
    /// The size cap only applies to import merges; organic growth is unbounded.
    pub fn record_solve(&mut self, ms: u64) {
        self.solves.insert(0, Solve::new(ms));
        self.selected = 0;
        self.persist();
        self.scramble = self.generator.generate();
    }

    pub fn delete_selected(&mut self) {
        if self.selected < self.solves.len() {
            self.solves.remove(self.selected);
            if self.selected >= self.solves.len() && self.selected > 0 {
                self.selected -= 1;
            }
            self.persist();
        }
    }

    pub fn clear_all(&mut self) {
        self.session.abandon();
        self.solves.clear();
        self.selected = 0;
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.solves) {
            warn!("failed to save solves: {e}");
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store: Box<dyn SolveStore> = match &cli.storage_path {
        Some(path) => Box::new(FileSolveStore::with_path(path)),
        None => Box::new(FileSolveStore::new()),
    };

    if let Some(path) = &cli.import {
        return run_import(store.as_ref(), path);
    }
    if let Some(path) = &cli.export {
        return run_export(store.as_ref(), path);
    }
    if let Some(path) = &cli.export_csv {
        return run_export_csv(store.as_ref(), path);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    if let Some(puzzle) = cli.puzzle {
        config.puzzle = puzzle;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, store);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(e) = config_store.save(&app.config) {
        warn!("failed to save config: {e}");
    }

    result
}

fn run_import(store: &dyn SolveStore, path: &Path) -> Result<(), Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let existing = store.load();

    match transfer::import_document(&raw, &existing) {
        Ok((merged, summary)) => {
            store.save(&merged)?;
            println!("imported {} of {} solves", summary.kept, summary.total);
            Ok(())
        }
        Err(e) => {
            // The existing collection is left untouched.
            eprintln!("import failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run_export(store: &dyn SolveStore, path: &Path) -> Result<(), Box<dyn Error>> {
    let solves = store.load();
    fs::write(path, ExportDocument::new(&solves).to_json())?;
    println!("exported {} solves to {}", solves.len(), path.display());
    Ok(())
}

fn run_export_csv(store: &dyn SolveStore, path: &Path) -> Result<(), Box<dyn Error>> {
    let solves = store.load();
    let file = fs::File::create(path)?;
    transfer::export_csv(&solves, file)?;
    println!("exported {} solves to {}", solves.len(), path.display());
    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            TimerEvent::Tick => {
                // Redraw only while the clock is live.
                if app.session.is_running() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            TimerEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            TimerEvent::Key(key) => {
                if handle_key(key, app) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

/// Returns true when the app should quit.
fn handle_key(key: KeyEvent, app: &mut App) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.state {
        AppState::Confirm(action) => {
            if key.code == KeyCode::Char('y') {
                match action {
                    PendingAction::DeleteSelected => app.delete_selected(),
                    PendingAction::ClearAll => app.clear_all(),
                }
            }
            app.state = AppState::Timing;
            false
        }
        AppState::Timing => match key.code {
            KeyCode::Esc => true,
            KeyCode::Char(' ') => {
                if app.session.is_running() {
                    if let Some(ms) = app.session.stop() {
                        app.record_solve(ms);
                    }
                } else {
                    app.session.start();
                }
                false
            }
            KeyCode::Char('n') => {
                app.scramble = app.generator.generate();
                false
            }
            KeyCode::Char('d') => {
                if !app.solves.is_empty() && !app.session.is_running() {
                    app.state = AppState::Confirm(PendingAction::DeleteSelected);
                }
                false
            }
            KeyCode::Char('c') => {
                if !app.solves.is_empty() {
                    app.state = AppState::Confirm(PendingAction::ClearAll);
                }
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.selected + 1 < app.solves.len() {
                    app.selected += 1;
                }
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.selected = app.selected.saturating_sub(1);
                false
            }
            KeyCode::Char('[') => {
                app.config.right_panel_width =
                    Config::clamp_width(app.config.right_panel_width.saturating_sub(2));
                false
            }
            KeyCode::Char(']') => {
                app.config.right_panel_width =
                    Config::clamp_width(app.config.right_panel_width + 2);
                false
            }
            _ => false,
        },
    }
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
