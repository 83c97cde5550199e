use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use sleep_runner::ui::{render_runner_scene, Theme};
use sleep_runner::{GameMode, RunnerConfig, RunnerSession};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Redraw/input poll interval (~60 FPS).
const FRAME_MS: u64 = 16;

/// Sleep Runner - hop over obstacles, beat your best score
#[derive(Parser, Debug)]
#[command(name = "sleep-runner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file overriding geometry and timing
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color theme: light or dark
    #[arg(long, default_value = "light")]
    theme: Theme,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => RunnerConfig::load(path).map_err(io::Error::other)?,
        None => RunnerConfig::default(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let session = {
        let _guard = runtime.enter();
        RunnerSession::spawn(config.clone()).map_err(io::Error::other)?
    };
    tracing::info!(theme = cli.theme.name(), "sleep runner started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &session, &config, cli.theme);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let snapshot = session.snapshot();
    runtime.block_on(session.shutdown());
    println!("Best score this session: {}", snapshot.high_score);

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &RunnerSession,
    config: &RunnerConfig,
    mut theme: Theme,
) -> io::Result<()> {
    loop {
        let mut snapshot = session.snapshot();
        // The tracker moves on every clock step; read it directly for drawing
        snapshot.player_offset = session.tracker().player_offset();
        snapshot.obstacle_offset = session.tracker().obstacle_offset();

        let palette = theme.palette();
        terminal.draw(|frame| {
            let area = frame.size();
            render_runner_scene(frame, area, &snapshot, config, &palette);
        })?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let sent = match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('t') | KeyCode::Char('T') => {
                theme = theme.toggled();
                Ok(())
            }
            KeyCode::Char(' ') | KeyCode::Up => session.jump(),
            KeyCode::Enter | KeyCode::Char('s') => match snapshot.mode {
                GameMode::Ready => session.start(),
                GameMode::Over => session.reset(),
                GameMode::Running => Ok(()),
            },
            _ => Ok(()),
        };
        sent.map_err(io::Error::other)?;
    }
}
