use super::random::sample;
use super::scheduler::{Scheduler, TimerId};

/// Interval between progress ticks, in milliseconds.
pub const TICK_INTERVAL: u64 = 120;

/// Delay between reaching 100% and delivering the completion callback, in
/// milliseconds.
pub const FINISH_DELAY: u64 = 500;

/// Where the simulator is in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    /// Created; no tick has run yet and the value is 0.
    Idle,
    /// Ticking; the displayed value is below 100.
    Running,
    /// The value reached 100; the next tick stops the interval and schedules
    /// completion.
    Complete,
    /// The interval is cancelled and completion is scheduled or delivered.
    Finished,
}

/// Simulated loading progress for the splash screen.
///
/// A periodic tick advances the value by a seeded pseudo-random increment in
/// 3..=8 until it reaches 100. One tick later the interval is cancelled and a
/// one-shot timer delivers the completion callback, exactly once.
pub struct ProgressSimulator {
    /// Raw accumulated value. May overshoot 100 by one increment; the
    /// accessor clamps before display.
    value: u32,
    /// Seed for the next increment draw, advanced on every draw so
    /// consecutive ticks sample distinct values.
    counter: u64,
    phase: ProgressPhase,
    tick_timer: Option<TimerId>,
    finish_timer: Option<TimerId>,
    on_finish: Option<Box<dyn FnOnce()>>,
}

impl ProgressSimulator {
    pub fn new(on_finish: impl FnOnce() + 'static) -> Self {
        Self {
            value: 0,
            counter: 0,
            phase: ProgressPhase::Idle,
            tick_timer: None,
            finish_timer: None,
            on_finish: Some(Box::new(on_finish)),
        }
    }

    /// Begin ticking. Starting an already-started simulator is a no-op.
    pub fn start(&mut self, timers: &mut Scheduler) {
        if self.phase == ProgressPhase::Idle && self.tick_timer.is_none() {
            self.tick_timer = Some(timers.every(TICK_INTERVAL));
        }
    }

    /// The displayed percentage, clamped to 100.
    pub fn value(&self) -> u8 {
        self.value.min(100) as u8
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Route a fired timer to this simulator. Returns `true` when the id
    /// belonged to it.
    pub fn handle_timer(&mut self, id: TimerId, timers: &mut Scheduler) -> bool {
        if self.tick_timer == Some(id) {
            self.tick(timers);
            true
        } else if self.finish_timer == Some(id) {
            self.finish_timer = None;
            self.finish();
            true
        } else {
            false
        }
    }

    /// Cancel both timers; the completion callback will not be delivered.
    pub fn cancel(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.tick_timer.take() {
            timers.cancel(id);
        }
        if let Some(id) = self.finish_timer.take() {
            timers.cancel(id);
        }
    }

    /// One periodic transition: stop and schedule completion once the value
    /// has reached 100, otherwise draw the next increment.
    fn tick(&mut self, timers: &mut Scheduler) {
        if self.phase == ProgressPhase::Finished {
            return;
        }
        if self.value >= 100 {
            if let Some(id) = self.tick_timer.take() {
                timers.cancel(id);
            }
            if self.finish_timer.is_none() {
                self.finish_timer = Some(timers.once(FINISH_DELAY));
            }
            self.phase = ProgressPhase::Finished;
            return;
        }
        self.value += increment_from(sample(self.counter));
        self.counter += 1;
        self.phase = if self.value >= 100 {
            ProgressPhase::Complete
        } else {
            ProgressPhase::Running
        };
    }

    /// Deliver the completion callback. The callback is taken out of its
    /// slot, so a repeated delivery attempt finds it empty and does nothing.
    fn finish(&mut self) {
        self.phase = ProgressPhase::Finished;
        if let Some(callback) = self.on_finish.take() {
            callback();
        }
    }
}

/// Map one unit-range sample to a tick increment in 3..=8.
fn increment_from(x: f64) -> u32 {
    (x * 6.0) as u32 + 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_simulator() -> (ProgressSimulator, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let simulator = ProgressSimulator::new(move || counter.set(counter.get() + 1));
        (simulator, calls)
    }

    /// Drive the scheduler forward in whole-tick steps, routing every fired
    /// timer back into the simulator.
    fn run_for(simulator: &mut ProgressSimulator, timers: &mut Scheduler, span: u64) {
        let target = timers.now() + span;
        while let Some(id) = timers.fire_before(target) {
            simulator.handle_timer(id, timers);
            assert!(simulator.value() <= 100);
        }
    }

    #[rstest]
    #[case(0.0, 3)]
    #[case(0.1, 3)]
    #[case(0.5, 6)]
    #[case(0.9, 8)]
    #[case(0.999, 8)]
    fn test_increment_mapping(#[case] x: f64, #[case] expected: u32) {
        assert_eq!(increment_from(x), expected);
    }

    #[test]
    fn test_increments_stay_bounded() {
        for counter in 0..1_000 {
            let increment = increment_from(sample(counter));
            assert!((3..=8).contains(&increment));
        }
    }

    #[test]
    fn test_completes_within_worst_case_tick_count() {
        let (mut simulator, _) = counting_simulator();
        let mut timers = Scheduler::new();
        simulator.start(&mut timers);

        let mut ticks = 0;
        while simulator.phase() == ProgressPhase::Idle
            || simulator.phase() == ProgressPhase::Running
        {
            let fired = timers.fire_before(timers.now() + TICK_INTERVAL);
            assert!(fired.is_some(), "tick interval went quiet before completion");
            simulator.handle_timer(fired.unwrap(), &mut timers);
            ticks += 1;
            assert!(ticks <= 34, "no completion after {ticks} ticks");
        }
        assert_eq!(simulator.phase(), ProgressPhase::Complete);
        assert_eq!(simulator.value(), 100);
    }

    #[test]
    fn test_callback_fires_exactly_once() {
        let (mut simulator, calls) = counting_simulator();
        let mut timers = Scheduler::new();
        simulator.start(&mut timers);

        run_for(&mut simulator, &mut timers, 10_000);
        assert_eq!(calls.get(), 1);
        assert_eq!(simulator.phase(), ProgressPhase::Finished);
        assert_eq!(timers.pending(), 0);

        run_for(&mut simulator, &mut timers, 10_000);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_finish_waits_for_the_post_delay() {
        let (mut simulator, calls) = counting_simulator();
        let mut timers = Scheduler::new();
        simulator.start(&mut timers);

        // Tick until the interval cancels itself, then the only pending
        // timer is the completion one-shot.
        while timers.pending() == 1 && simulator.phase() != ProgressPhase::Finished {
            run_for(&mut simulator, &mut timers, TICK_INTERVAL);
        }
        assert_eq!(simulator.phase(), ProgressPhase::Finished);
        assert_eq!(calls.get(), 0);

        run_for(&mut simulator, &mut timers, FINISH_DELAY - 1);
        assert_eq!(calls.get(), 0);
        run_for(&mut simulator, &mut timers, 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_stale_tick_after_finish_is_ignored() {
        let (mut simulator, calls) = counting_simulator();
        let mut timers = Scheduler::new();
        simulator.start(&mut timers);
        let tick_id = timers.fire_before(TICK_INTERVAL).unwrap();

        run_for(&mut simulator, &mut timers, 20_000);
        assert_eq!(calls.get(), 1);

        // A stray delivery of the old tick id must not revive the machine.
        simulator.handle_timer(tick_id, &mut timers);
        simulator.handle_timer(tick_id, &mut timers);
        assert_eq!(calls.get(), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_cancel_prevents_delivery() {
        let (mut simulator, calls) = counting_simulator();
        let mut timers = Scheduler::new();
        simulator.start(&mut timers);

        run_for(&mut simulator, &mut timers, TICK_INTERVAL * 3);
        simulator.cancel(&mut timers);
        assert_eq!(timers.pending(), 0);

        run_for(&mut simulator, &mut timers, 60_000);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_value_is_monotonic() {
        let (mut simulator, _) = counting_simulator();
        let mut timers = Scheduler::new();
        simulator.start(&mut timers);

        let mut last = 0;
        for _ in 0..40 {
            run_for(&mut simulator, &mut timers, TICK_INTERVAL);
            assert!(simulator.value() >= last);
            last = simulator.value();
        }
        assert_eq!(last, 100);
    }
}
