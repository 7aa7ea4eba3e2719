use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use super::{Clock, Timer, TimerHandle};

/// Delay after `play()` before the reporting counters are zeroed.
const WARMUP_RESET_DELAY_MS: f64 = 100.0;

/// Per-tick callback, handed the measured elapsed milliseconds.
pub type FrameCallback = Box<dyn FnMut(f64)>;

/// Frame scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Target callback rate, frames per second. Must be positive and finite.
    pub fps: f64,
    /// Emit a per-tick report and the warm-up notice through `log`.
    pub debug: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { fps: 60.0, debug: false }
    }
}

/// Error constructing a [`FrameScheduler`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scheduler config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

struct State {
    running: bool,
    frame_interval_ms: f64,
    last_frame_ms: f64,
    drift_ms: f64,
    frame_count: u64,
    total_elapsed_ms: f64,
    pending: Option<TimerHandle>,
    debug: bool,
    callback: Option<FrameCallback>,
}

/// Self-correcting fixed-rate frame scheduler.
///
/// Repeatedly invokes a caller-supplied callback at a target rate by chaining
/// one-shot [`Timer`] tasks: each tick measures the real elapsed time since
/// the previous one and feeds the signed cumulative error back into the next
/// delay. Timers only guarantee a minimum delay and the callback itself costs
/// time, so a fixed delay would drift the long-run average interval above the
/// target; the feedback term pulls it back without high-resolution sleep
/// primitives.
///
/// Ticks are strictly sequential — the next is scheduled only after the
/// previous finished its bookkeeping — so the callback never observes
/// overlapping invocations.
pub struct FrameScheduler {
    state: Rc<RefCell<State>>,
    clock: Rc<dyn Clock>,
    timer: Rc<dyn Timer>,
}

impl FrameScheduler {
    /// Builds a stopped scheduler with zeroed counters.
    ///
    /// Fails if `config.fps` is not a positive finite number.
    pub fn new(
        clock: Rc<dyn Clock>,
        timer: Rc<dyn Timer>,
        config: SchedulerConfig,
        callback: impl FnMut(f64) + 'static,
    ) -> Result<Self, ConfigError> {
        if !(config.fps.is_finite() && config.fps > 0.0) {
            return Err(ConfigError(format!(
                "fps must be a positive finite number, got {}",
                config.fps
            )));
        }

        Ok(Self {
            state: Rc::new(RefCell::new(State {
                running: false,
                frame_interval_ms: 1000.0 / config.fps,
                last_frame_ms: 0.0,
                drift_ms: 0.0,
                frame_count: 0,
                total_elapsed_ms: 0.0,
                pending: None,
                debug: config.debug,
                callback: Some(Box::new(callback)),
            })),
            clock,
            timer,
        })
    }

    /// Starts the tick chain. No-op while already running.
    ///
    /// Zeroes the reporting counters, takes a fresh clock baseline, and runs
    /// the first tick synchronously (frame 0, near-zero delta). A warm-up
    /// task is also scheduled that zeroes the reporting counters again after
    /// 100 ms; its handle is deliberately not retained, so it fires whether
    /// or not the scheduler is still running by then.
    pub fn play(&self) {
        {
            let mut s = self.state.borrow_mut();
            if s.running {
                return;
            }
            s.running = true;
            s.frame_count = 0;
            s.total_elapsed_ms = 0.0;
            s.last_frame_ms = self.clock.now_ms();
        }

        tick(&self.state, &self.clock, &self.timer);

        let weak = Rc::downgrade(&self.state);
        self.timer.schedule(
            WARMUP_RESET_DELAY_MS,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    let mut s = state.borrow_mut();
                    s.frame_count = 0;
                    s.total_elapsed_ms = 0.0;
                    if s.debug {
                        debug!("[Scheduler] Stats Reset");
                    }
                }
            }),
        );
    }

    /// Stops the tick chain. No-op while already stopped.
    ///
    /// Cancels the pending tick and discards accumulated drift. A tick
    /// already dequeued by the host pump may still run; its `done` step
    /// observes `running == false` and has no effect.
    pub fn stop(&self) {
        let pending = {
            let mut s = self.state.borrow_mut();
            if !s.running {
                return;
            }
            s.running = false;
            s.drift_ms = 0.0;
            s.pending.take()
        };
        if let Some(handle) = pending {
            self.timer.cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Target interval between ticks, `1000 / fps` milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        self.state.borrow().frame_interval_ms
    }

    /// Ticks counted since the last stats reset.
    pub fn frame_count(&self) -> u64 {
        self.state.borrow().frame_count
    }

    /// Measured milliseconds accumulated since the last stats reset.
    pub fn total_elapsed_ms(&self) -> f64 {
        self.state.borrow().total_elapsed_ms
    }

    /// Signed cumulative per-tick timing error, fed back into scheduling.
    pub fn drift_ms(&self) -> f64 {
        self.state.borrow().drift_ms
    }

    /// Average measured frame time since the last stats reset.
    pub fn average_frame_time_ms(&self) -> Option<f64> {
        let s = self.state.borrow();
        if s.frame_count == 0 {
            None
        } else {
            Some(s.total_elapsed_ms / s.frame_count as f64)
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.state.borrow_mut().pending.take() {
            self.timer.cancel(handle);
        }
    }
}

fn tick(state: &Rc<RefCell<State>>, clock: &Rc<dyn Clock>, timer: &Rc<dyn Timer>) {
    let now_ms = clock.now_ms();
    let (delta_ms, mut callback) = {
        let mut s = state.borrow_mut();
        let delta_ms = now_ms - s.last_frame_ms;
        s.last_frame_ms = now_ms;
        (delta_ms, s.callback.take())
    };

    // The callback runs with no borrow held, so it may call play()/stop().
    if let Some(f) = callback.as_mut() {
        f(delta_ms);
    }
    if let Some(f) = callback {
        state.borrow_mut().callback = Some(f);
    }

    done(state, clock, timer, delta_ms);
}

fn done(state: &Rc<RefCell<State>>, clock: &Rc<dyn Clock>, timer: &Rc<dyn Timer>, delta_ms: f64) {
    let mut s = state.borrow_mut();

    // Liveness guard: a tick already dequeued when stop() landed must not
    // touch the counters or re-arm the chain.
    if !s.running {
        return;
    }

    s.frame_count += 1;
    s.total_elapsed_ms += delta_ms;
    s.drift_ms += delta_ms - s.frame_interval_ms;

    if s.debug {
        debug!(
            "[Scheduler] {}ms | {}",
            delta_ms,
            s.total_elapsed_ms / s.frame_count as f64
        );
    }

    // Next delay: target interval minus the bookkeeping cost since the tick
    // timestamp, minus accumulated drift. May be negative; it is passed
    // through unclamped and the timer treats a past deadline as due on the
    // next pump.
    let now_ms = clock.now_ms();
    let delay_ms = s.frame_interval_ms - (now_ms - s.last_frame_ms) - s.drift_ms;

    let weak = Rc::downgrade(state);
    let clock = Rc::clone(clock);
    let timer_for_task = Rc::clone(timer);
    let handle = timer.schedule(
        delay_ms,
        Box::new(move || {
            if let Some(state) = weak.upgrade() {
                tick(&state, &clock, &timer_for_task);
            }
        }),
    );
    s.pending = Some(handle);
}
