use super::random::sample;
use super::scheduler::{Scheduler, TimerId};

/// Number of particles in one celebration burst.
pub const BURST_SIZE: usize = 30;

/// How long a burst stays published before it is cleared, in milliseconds.
pub const CLEAR_DELAY: u64 = 2_000;

/// Seed offsets decorrelating the x and y samples drawn for the same index.
const X_SEED_STEP: u64 = 111;
const Y_SEED_STEP: u64 = 222;

/// An ephemeral celebration particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Batch stamp plus index; unique within a batch.
    pub id: u64,
    /// Horizontal position as a percentage of the page width.
    pub x: f64,
    /// Vertical position as a percentage of the page height.
    pub y: f64,
}

/// The one-shot celebration burst shown when the card is revealed.
///
/// A batch of particles is published immediately on launch and emptied by a
/// one-shot cleanup timer. The once-only launch guard lives with the page's
/// revealed flag, not here.
#[derive(Debug, Default)]
pub struct Celebration {
    particles: Vec<Particle>,
    clear_timer: Option<TimerId>,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// The published batch; empty outside the burst window.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Publish a batch stamped with `stamp` and schedule its cleanup. A
    /// cleanup timer still pending from an earlier launch is cancelled
    /// before the new one is scheduled.
    pub fn launch(&mut self, stamp: u64, timers: &mut Scheduler) {
        if let Some(id) = self.clear_timer.take() {
            timers.cancel(id);
        }
        self.particles = (0..BURST_SIZE as u64)
            .map(|i| Particle {
                id: stamp + i,
                x: sample(stamp + i * X_SEED_STEP) * 100.0,
                y: sample(stamp + i * Y_SEED_STEP) * 100.0,
            })
            .collect();
        self.clear_timer = Some(timers.once(CLEAR_DELAY));
    }

    /// Route a fired timer here. Returns `true` when it was the cleanup
    /// timer, which empties the batch.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.clear_timer == Some(id) {
            self.clear_timer = None;
            self.particles.clear();
            true
        } else {
            false
        }
    }

    /// Cancel the pending cleanup timer, if any.
    pub fn cancel(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.clear_timer.take() {
            timers.cancel(id);
        }
    }
}
