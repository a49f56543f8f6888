use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal};

use todos::{
    application::todo_store::TodoStore,
    config::Config,
    domain::slot::PersistenceSlot,
    infrastructure::file_slot::FileSlot,
    logging,
    ui::{app::{App, Control}, view},
};

fn main() -> Result<()> {
    let config = Config::from_env();
    let _log_guard = logging::init(&config)?;

    let slot = FileSlot::new(&config.data_dir, &config.slot_key)?;
    tracing::info!(path = %slot.path().display(), "starting");
    let store = TodoStore::open(slot);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    tracing::info!("shutdown");
    res
}

fn run_app<S: PersistenceSlot>(terminal: &mut Terminal<CrosstermBackend<Stdout>>, store: TodoStore<S>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App::new(store);

    loop {
        terminal.draw(|f| view::render(f, &app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) == Control::Quit { break; }
            }
        }
    }
    Ok(())
}
