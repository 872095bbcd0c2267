//! Slow Keyboard - type with artificial per-keystroke latency
//!
//! Keys are queued as fast as you press them and committed one at a time.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
    Terminal,
};
use std::fs::File;
use std::io::stdout;

use slow_keyboard::{
    config::{self, Config},
    ui::{App, AppState, AppView, HelpPanel, KeyboardVisual, OutputPanel, QueuePanel, StatusBar},
};

/// Send log output to a file next to the config; the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let path = config::config_dir()?.join("slow-keyboard.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {:#}", e);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };
    let tick_rate = config.refresh_interval();
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, tick_rate);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    if app.config_dirty {
        if let Err(e) = app.config.save() {
            log::error!("Failed to save config: {}", e);
        }
    }

    let stats = app.keyboard.stats();
    println!("\nSlow Keyboard session complete.");
    println!("Keys committed: {} of {} submitted", stats.committed, stats.submitted);
    if let Some(avg) = stats.avg_latency_ms() {
        println!("Average key latency: {:.0}ms", avg);
    }
    println!("Session duration: {}", app.elapsed_formatted());

    Ok(())
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: std::time::Duration,
) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|frame| {
            let colors = app.colors();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(6),    // Output
                    Constraint::Length(4), // Queue
                    Constraint::Length(7), // Keyboard visual
                    Constraint::Length(1), // Status bar
                ])
                .split(frame.area());

            match app.view {
                AppView::Help => frame.render_widget(HelpPanel::new(colors), chunks[0]),
                AppView::Typing => {
                    frame.render_widget(OutputPanel::new(&app.keyboard, colors), chunks[0])
                }
            }

            let pending = app.keyboard.pending_queue();
            let queue = QueuePanel::new(&pending, app.keyboard.currently_processing(), colors);
            frame.render_widget(queue, chunks[1]);

            let kb_block = Block::default()
                .title(" ⌨ Virtual Keyboard ")
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(colors.dim));
            let kb_inner = kb_block.inner(chunks[2]);
            frame.render_widget(kb_block, chunks[2]);
            frame.render_widget(KeyboardVisual::new(&app.keyboard, colors), kb_inner);

            let status = StatusBar::new(&app.keyboard, colors).message(app.get_status());
            frame.render_widget(status, chunks[3]);
        })?;

        // Wake early when a commit falls due before the next frame
        if event::poll(app.poll_timeout(tick_rate))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.state == AppState::Quitting {
            return Ok(());
        }
    }
}
