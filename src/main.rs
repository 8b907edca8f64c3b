use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use revealterm::config::CardConfig;
use revealterm::engine::Scheduler;
use revealterm::page::{Page, PageOptions};
use revealterm::render;

/// A reveal card for the terminal: a matrix-rain splash, a locked card that
/// opens on click, and a celebration burst.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// YAML file with the card text; the built-in card is used when omitted.
    card: Option<PathBuf>,

    /// Open directly on the card page.
    #[arg(long)]
    skip_splash: bool,

    /// Randomize the decorative field layout for this run.
    #[arg(long)]
    shuffle: bool,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 33)]
    frame_interval: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let card = match &cli.card {
        Some(path) => CardConfig::load(path)
            .with_context(|| format!("loading card file '{}'", path.display()))?,
        None => CardConfig::default(),
    };
    let options = PageOptions {
        skip_splash: cli.skip_splash,
        field_offset: if cli.shuffle { fastrand::u64(1..1_000_000) } else { 0 },
    };

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    let result = run(&mut stdout, card, options, cli.frame_interval.max(1));
    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    out: &mut impl Write,
    card: CardConfig,
    options: PageOptions,
    frame_interval: u64,
) -> anyhow::Result<()> {
    let mut timers = Scheduler::new();
    let mut page = Page::new(card, options);
    page.start(&mut timers);

    let started = Instant::now();
    loop {
        if event::poll(Duration::from_millis(frame_interval))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Enter | KeyCode::Char(' ') => page.reveal(&mut timers),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if matches!(mouse.kind, MouseEventKind::Down(_)) {
                        page.reveal(&mut timers);
                    }
                }
                _ => {}
            }
        }

        // Bridge wall-clock time into the timer queue, one fired timer at a
        // time so handlers see their own cancellations.
        let target = started.elapsed().as_millis() as u64;
        while let Some(id) = timers.fire_before(target) {
            page.dispatch(id, &mut timers);
        }

        let size = terminal::size()?;
        render::draw(out, &page, size, timers.now())?;
    }

    page.teardown(&mut timers);
    Ok(())
}
