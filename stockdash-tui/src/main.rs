//! StockDash terminal dashboard binary.

use std::fs::File;
use std::io::{self, stdout};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use stockdash_core::ProxyClient;
use stockdash_tui::worker::{self, WorkerCommand};
use stockdash_tui::{input, ui, AppState, DashboardConfig};

fn main() -> Result<()> {
    let config = DashboardConfig::parse();
    init_logging(&config)?;

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let client = ProxyClient::new(config.proxy_url.as_str())
        .context("failed to build proxy client")?;
    log::info!("using proxy at {}", client.base_url());

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(Arc::new(client), cmd_rx, resp_tx)
        .context("failed to spawn worker thread")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx);
    // Initial selection loads immediately.
    app.request_fetch();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    // An in-flight request is abandoned rather than awaited.
    drop(worker_handle);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        app.drain_worker();

        // 50ms poll: ~20 FPS, also drives the loading spinner.
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Resize(w, h) => log::debug!("terminal resized to {w}x{h}"),
                _ => {}
            }
        }
        app.tick = app.tick.wrapping_add(1);

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// The UI owns the terminal, so logs only go to a file when one is given.
fn init_logging(config: &DashboardConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
