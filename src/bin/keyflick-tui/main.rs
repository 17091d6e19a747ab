// Keyflick TUI
// Drive the on-screen keyboard with the mouse inside a terminal

mod app;
mod handlers;
mod theme;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use keyflick_core::Settings;

use app::App;
use handlers::{handle_key, handle_mouse};
use ui::draw_ui;

/// Interactive on-screen keyboard
#[derive(Parser, Debug)]
#[command(name = "keyflick-tui")]
#[command(author = "keyflick contributors")]
#[command(version = "0.3.0")]
#[command(about = "Interactive on-screen keyboard", long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    match args.config {
        Some(ref path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Settings::load_default().context("failed to load default settings"),
    }
}

fn run(settings: &Settings) -> io::Result<()> {
    let mut app = App::new(settings);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = loop {
        if let Err(err) = terminal.draw(|f| {
            app.resize(f.area());
            draw_ui(f, &app);
        }) {
            break Err(err);
        }

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, key.code) {
                    break Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
            _ => {}
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    run_result
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs would corrupt the alternate screen unless redirected
    let default_filter = if args.verbose { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let settings = load_settings(&args)?;
    run(&settings)?;
    Ok(())
}
