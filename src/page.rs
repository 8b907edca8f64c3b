use std::cell::Cell;
use std::rc::Rc;

use crate::config::CardConfig;
use crate::engine::{
    background_field_with, matrix_field_with, BackgroundParticle, Celebration, MatrixColumn,
    Particle, ProgressSimulator, Scheduler, TimerId, FIELD_SIZE,
};

/// Which full-screen view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Matrix-rain loader with the simulated progress bar.
    Splash,
    /// The locked (or revealed) card page.
    Card,
}

/// Page construction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions {
    /// Open directly on the card page, skipping the splash.
    pub skip_splash: bool,
    /// Index offset fed to the field builder; 0 is the canonical layout.
    pub field_offset: u64,
}

/// Top-level page state: the splash flow, the one-way reveal, and both
/// particle fields.
///
/// The fields are built once here and never rebuilt, so their layout and
/// animation phases survive any amount of redrawing.
pub struct Page {
    screen: Screen,
    card: CardConfig,
    revealed: bool,
    show_final: bool,
    background: Vec<BackgroundParticle>,
    columns: Vec<MatrixColumn>,
    progress: ProgressSimulator,
    splash_done: Rc<Cell<bool>>,
    celebration: Celebration,
}

impl Page {
    pub fn new(card: CardConfig, options: PageOptions) -> Self {
        let splash_done = Rc::new(Cell::new(false));
        let progress = ProgressSimulator::new({
            let done = splash_done.clone();
            move || done.set(true)
        });
        Self {
            screen: if options.skip_splash { Screen::Card } else { Screen::Splash },
            card,
            revealed: false,
            show_final: false,
            background: background_field_with(FIELD_SIZE, options.field_offset),
            columns: matrix_field_with(FIELD_SIZE, options.field_offset),
            progress,
            splash_done,
            celebration: Celebration::new(),
        }
    }

    /// Start the splash progress simulation, unless the splash was skipped.
    pub fn start(&mut self, timers: &mut Scheduler) {
        if self.screen == Screen::Splash {
            self.progress.start(timers);
        }
    }

    /// The reveal action. One-way: once revealed, further triggers are
    /// silently ignored, and triggers during the splash do nothing.
    pub fn reveal(&mut self, timers: &mut Scheduler) {
        if self.screen != Screen::Card || self.revealed {
            return;
        }
        self.revealed = true;
        self.celebration.launch(timers.now(), timers);
    }

    /// Route one fired timer to the component owning it, then apply the
    /// page-level follow-ups: the splash hands off to the card page when the
    /// progress callback has run, and the closing panel appears when the
    /// celebration batch clears.
    pub fn dispatch(&mut self, id: TimerId, timers: &mut Scheduler) {
        if self.progress.handle_timer(id, timers) {
            if self.screen == Screen::Splash && self.splash_done.get() {
                self.screen = Screen::Card;
            }
        } else if self.celebration.handle_timer(id) {
            self.show_final = true;
        }
    }

    /// Cancel every outstanding timer owned by this page.
    pub fn teardown(&mut self, timers: &mut Scheduler) {
        self.progress.cancel(timers);
        self.celebration.cancel(timers);
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn card(&self) -> &CardConfig {
        &self.card
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn show_final(&self) -> bool {
        self.show_final
    }

    /// Splash progress percentage, 0 to 100.
    pub fn progress_value(&self) -> u8 {
        self.progress.value()
    }

    pub fn background(&self) -> &[BackgroundParticle] {
        &self.background
    }

    pub fn columns(&self) -> &[MatrixColumn] {
        &self.columns
    }

    /// The celebration batch; empty outside the burst window.
    pub fn sparkles(&self) -> &[Particle] {
        self.celebration.particles()
    }
}
