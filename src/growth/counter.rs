use std::cell::{Cell, RefCell};
use std::iter::FusedIterator;
use std::rc::Rc;

use futures::future::{abortable, AbortHandle};
use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;

use crate::growth::stats::{Stat, StatTarget};
use crate::growth::visibility::BecameVisible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterTiming {
    pub duration_ms: u32,
    pub steps: u32,
}

impl CounterTiming {
    pub fn tick_ms(&self) -> u32 {
        self.duration_ms / self.steps.max(1)
    }
}

/// Values a counter shows on its way from zero to `target`.
///
/// Yields exactly `steps` values (at least one). Each adds `target / steps`
/// to the previous one, never passes the target, and the last one is the
/// target itself. The ramp is consumed as it runs and cannot be rewound.
#[derive(Debug)]
pub struct CounterRamp {
    target: f64,
    increment: f64,
    current: f64,
    remaining: u32,
}

impl CounterRamp {
    pub fn new(target: f64, steps: u32) -> Self {
        let steps = steps.max(1);
        CounterRamp {
            target,
            increment: target / f64::from(steps),
            current: 0.0,
            remaining: steps,
        }
    }
}

impl Iterator for CounterRamp {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        self.current = if self.remaining == 0 {
            self.target
        } else {
            let next = self.current + self.increment;
            if self.target >= 0.0 {
                next.min(self.target)
            } else {
                next.max(self.target)
            }
        };
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CounterRamp {}

impl FusedIterator for CounterRamp {}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    pub current: f64,
    pub done: bool,
}

/// Runs a callback a fixed number of times on a fixed period.
///
/// Dropping the returned handle cancels the schedule: the callback is not
/// called again afterwards.
pub trait TickScheduler {
    type Handle;

    fn schedule(&self, period_ms: u32, ticks: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Browser scheduler: one local task per schedule, sleeping on
/// `gloo-timers` between ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTicker;

/// Aborts the tick task, and with it the pending browser timeout, on drop.
#[derive(Debug)]
pub struct TickTask {
    abort: AbortHandle,
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

impl TickScheduler for GlooTicker {
    type Handle = TickTask;

    fn schedule(&self, period_ms: u32, ticks: u32, mut tick: Box<dyn FnMut()>) -> TickTask {
        let (task, abort) = abortable(async move {
            for _ in 0..ticks {
                TimeoutFuture::new(period_ms).await;
                tick();
            }
        });
        spawn_local(async move {
            let _ = task.await;
        });
        TickTask { abort }
    }
}

/// Counts every numeric stat of a section up from zero, all at once, the
/// first time the section becomes visible.
///
/// Stats whose target is not a bare number are marked done immediately and
/// never ticked. Each animated stat owns its own timer and its own
/// [`AnimationState`]. After [`CounterEngine::dispose`] (or drop) no state
/// changes and no callbacks happen.
pub struct CounterEngine<S: TickScheduler> {
    scheduler: S,
    timing: CounterTiming,
    targets: Vec<StatTarget>,
    slots: Vec<Rc<RefCell<AnimationState>>>,
    handles: Vec<S::Handle>,
    alive: Rc<Cell<bool>>,
    started: bool,
}

impl<S: TickScheduler> CounterEngine<S> {
    pub fn new(stats: &[Stat], timing: CounterTiming, scheduler: S) -> Self {
        let targets: Vec<StatTarget> = stats.iter().map(|s| s.target.clone()).collect();
        let slots = targets
            .iter()
            .map(|target| {
                Rc::new(RefCell::new(AnimationState {
                    current: 0.0,
                    done: !target.is_animated(),
                }))
            })
            .collect();

        CounterEngine {
            scheduler,
            timing,
            targets,
            slots,
            handles: Vec::new(),
            alive: Rc::new(Cell::new(true)),
            started: false,
        }
    }

    /// Starts every numeric counter. Consumes the visibility token, so the
    /// engine can only be started by the first visibility of its section.
    /// `on_tick` receives the stat index and its new value.
    pub fn start<F>(&mut self, _visible: BecameVisible, on_tick: F)
    where
        F: Fn(usize, f64) + 'static,
    {
        if !self.alive.get() {
            warn!("ignoring counter start after teardown");
            return;
        }
        if self.started {
            warn!("counters already started, ignoring restart");
            return;
        }
        self.started = true;

        let on_tick = Rc::new(on_tick);
        let period_ms = self.timing.tick_ms();

        for (index, target) in self.targets.iter().enumerate() {
            let Some(target) = target.numeric() else {
                continue;
            };

            let mut ramp = CounterRamp::new(target, self.timing.steps);
            let ticks = ramp.len() as u32;
            let slot = Rc::clone(&self.slots[index]);
            let alive = Rc::clone(&self.alive);
            let on_tick = Rc::clone(&on_tick);

            let handle = self.scheduler.schedule(
                period_ms,
                ticks,
                Box::new(move || {
                    if !alive.get() {
                        return;
                    }
                    let Some(value) = ramp.next() else {
                        return;
                    };
                    {
                        let mut state = slot.borrow_mut();
                        state.current = value;
                        state.done = ramp.len() == 0;
                    }
                    on_tick(index, value);
                }),
            );
            self.handles.push(handle);
        }

        debug!(
            "started {} counter(s), {} ticks every {}ms",
            self.handles.len(),
            self.timing.steps.max(1),
            period_ms
        );
    }

    pub fn state(&self, index: usize) -> Option<AnimationState> {
        self.slots.get(index).map(|slot| *slot.borrow())
    }

    pub fn states(&self) -> Vec<AnimationState> {
        self.slots.iter().map(|slot| *slot.borrow()).collect()
    }

    pub fn display(&self, index: usize) -> Option<String> {
        let state = self.state(index)?;
        self.targets.get(index).map(|target| target.display(state.current))
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_disposed(&self) -> bool {
        !self.alive.get()
    }

    /// Cancels every running timer. Idempotent.
    pub fn dispose(&mut self) {
        if !self.alive.get() {
            return;
        }
        self.alive.set(false);
        if !self.handles.is_empty() {
            debug!("releasing {} counter timer(s)", self.handles.len());
        }
        self.handles.clear();
    }
}

impl<S: TickScheduler> Drop for CounterEngine<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::stats::market_stats;
    use crate::growth::visibility::VisibilityLatch;

    struct ManualTimer {
        period_ms: u32,
        remaining: u32,
        elapsed_ms: u32,
        tick: Box<dyn FnMut()>,
        cancelled: Rc<Cell<bool>>,
    }

    /// Deterministic scheduler driven by `advance`.
    #[derive(Clone, Default)]
    struct ManualTicker {
        timers: Rc<RefCell<Vec<ManualTimer>>>,
    }

    struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl TickScheduler for ManualTicker {
        type Handle = ManualHandle;

        fn schedule(&self, period_ms: u32, ticks: u32, tick: Box<dyn FnMut()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            self.timers.borrow_mut().push(ManualTimer {
                period_ms,
                remaining: ticks,
                elapsed_ms: 0,
                tick,
                cancelled: Rc::clone(&cancelled),
            });
            ManualHandle { cancelled }
        }
    }

    impl ManualTicker {
        fn advance(&self, ms: u32) {
            let mut timers = std::mem::take(&mut *self.timers.borrow_mut());
            for timer in timers.iter_mut() {
                timer.elapsed_ms += ms;
                while timer.remaining > 0
                    && !timer.cancelled.get()
                    && timer.elapsed_ms >= timer.period_ms
                {
                    timer.elapsed_ms -= timer.period_ms;
                    timer.remaining -= 1;
                    (timer.tick)();
                }
            }
            timers.retain(|t| t.remaining > 0 && !t.cancelled.get());
            let mut current = self.timers.borrow_mut();
            timers.append(&mut current);
            *current = timers;
        }

        fn active(&self) -> usize {
            self.timers
                .borrow()
                .iter()
                .filter(|t| t.remaining > 0 && !t.cancelled.get())
                .count()
        }
    }

    const TIMING: CounterTiming = CounterTiming { duration_ms: 2000, steps: 60 };

    fn visible() -> BecameVisible {
        VisibilityLatch::new().observe(true).unwrap()
    }

    fn recorder() -> (Rc<RefCell<Vec<(usize, f64)>>>, impl Fn(usize, f64) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |index, value| sink.borrow_mut().push((index, value)))
    }

    #[test]
    fn ramp_is_non_decreasing_and_ends_on_target() {
        for target in [65.0, 40.0, 0.1, 180.0, 7.7] {
            let values: Vec<f64> = CounterRamp::new(target, 60).collect();
            assert_eq!(values.len(), 60);
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert!(values.iter().all(|v| *v <= target));
            assert_eq!(*values.last().unwrap(), target);
        }
    }

    #[test]
    fn ramp_steps_by_equal_increments() {
        let values: Vec<f64> = CounterRamp::new(60.0, 4).collect();
        assert_eq!(values, vec![15.0, 30.0, 45.0, 60.0]);
    }

    #[test]
    fn ramp_is_exhausted_after_last_value() {
        let mut ramp = CounterRamp::new(10.0, 2);
        assert_eq!(ramp.len(), 2);
        assert_eq!(ramp.next(), Some(5.0));
        assert_eq!(ramp.next(), Some(10.0));
        assert_eq!(ramp.next(), None);
        assert_eq!(ramp.next(), None);
        assert_eq!(ramp.len(), 0);
    }

    #[test]
    fn zero_steps_jumps_to_target() {
        let values: Vec<f64> = CounterRamp::new(42.0, 0).collect();
        assert_eq!(values, vec![42.0]);
    }

    #[test]
    fn negative_target_never_passes_target() {
        let values: Vec<f64> = CounterRamp::new(-30.0, 3).collect();
        assert_eq!(values, vec![-10.0, -20.0, -30.0]);
    }

    #[test]
    fn tick_period_divides_duration() {
        assert_eq!(TIMING.tick_ms(), 33);
        assert_eq!(CounterTiming { duration_ms: 500, steps: 0 }.tick_ms(), 500);
    }

    #[test]
    fn nothing_moves_until_started() {
        let ticker = ManualTicker::default();
        let engine = CounterEngine::new(&market_stats(), TIMING, ticker.clone());
        ticker.advance(10_000);

        assert!(!engine.is_started());
        assert_eq!(engine.state(0), Some(AnimationState { current: 0.0, done: false }));
        assert_eq!(engine.display(0).as_deref(), Some("0%"));
        // static targets are shown as-is from the start
        assert_eq!(engine.display(1).as_deref(), Some("3x"));
        assert_eq!(engine.state(1), Some(AnimationState { current: 0.0, done: true }));
    }

    #[test]
    fn numeric_stats_count_up_to_target() {
        let ticker = ManualTicker::default();
        let mut engine = CounterEngine::new(&market_stats(), TIMING, ticker.clone());
        let (seen, on_tick) = recorder();

        engine.start(visible(), on_tick);
        assert_eq!(ticker.active(), 2);

        ticker.advance(33 * 30);
        let halfway = engine.state(0).unwrap();
        assert!(!halfway.done);
        assert!((halfway.current - 32.5).abs() < 1e-9);

        ticker.advance(33 * 30);
        assert_eq!(engine.state(0), Some(AnimationState { current: 65.0, done: true }));
        assert_eq!(engine.state(3), Some(AnimationState { current: 40.0, done: true }));
        assert_eq!(engine.display(0).as_deref(), Some("65%"));
        assert_eq!(engine.display(3).as_deref(), Some("40%"));
        assert_eq!(ticker.active(), 0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 120);
        assert!(seen.iter().all(|(index, _)| *index == 0 || *index == 3));

        let usage: Vec<f64> = seen.iter().filter(|(i, _)| *i == 0).map(|(_, v)| *v).collect();
        assert!(usage.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*usage.last().unwrap(), 65.0);
    }

    #[test]
    fn second_start_is_ignored() {
        let ticker = ManualTicker::default();
        let mut engine = CounterEngine::new(&market_stats(), TIMING, ticker.clone());
        let (seen, on_tick) = recorder();
        let (_, other) = recorder();

        engine.start(visible(), on_tick);
        engine.start(visible(), other);
        assert_eq!(ticker.active(), 2);

        ticker.advance(2000);
        assert_eq!(seen.borrow().len(), 120);
    }

    #[test]
    fn dispose_stops_every_timer() {
        let ticker = ManualTicker::default();
        let mut engine = CounterEngine::new(&market_stats(), TIMING, ticker.clone());
        let (seen, on_tick) = recorder();

        engine.start(visible(), on_tick);
        ticker.advance(33 * 10);
        let before = engine.states();
        let calls = seen.borrow().len();

        engine.dispose();
        assert!(engine.is_disposed());
        assert_eq!(ticker.active(), 0);

        ticker.advance(10_000);
        assert_eq!(engine.states(), before);
        assert_eq!(seen.borrow().len(), calls);
    }

    #[test]
    fn dropping_the_engine_releases_its_timers() {
        let ticker = ManualTicker::default();
        let (seen, on_tick) = recorder();
        {
            let mut engine = CounterEngine::new(&market_stats(), TIMING, ticker.clone());
            engine.start(visible(), on_tick);
            ticker.advance(33);
        }
        assert_eq!(ticker.active(), 0);
        ticker.advance(10_000);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn start_after_dispose_is_ignored() {
        let ticker = ManualTicker::default();
        let mut engine = CounterEngine::new(&market_stats(), TIMING, ticker.clone());
        engine.dispose();
        engine.start(visible(), |_, _| {});
        assert!(!engine.is_started());
        assert_eq!(ticker.active(), 0);
    }

    #[test]
    fn static_only_sections_schedule_nothing() {
        let ticker = ManualTicker::default();
        let stats = crate::growth::stats::journey_stats();
        let mut engine = CounterEngine::new(&stats, TIMING, ticker.clone());
        engine.start(visible(), |_, _| {});
        assert!(engine.is_started());
        assert_eq!(ticker.active(), 0);
        assert_eq!(engine.display(0).as_deref(), Some("18 days"));
        assert!(engine.states().iter().all(|s| s.done));
    }
}
