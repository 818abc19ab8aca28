//! The dispatch loop: fixed-timestep updates, bounded frame-skip, and
//! sub-frame render partitioning.
//!
//! Every pass samples the wall clock once, drains pending input, runs as
//! many fixed updates as are due (capped by the frame-skip bound), then
//! decides whether a render falls due at the current point inside the
//! update interval. Pausing blocks on the event source until the matching
//! resume event arrives and re-anchors the schedule so paused time is
//! never treated as backlog.

use crate::clock::Clock;
use crate::config::{LoopConfig, MAX_SUBDIVISIONS};
use crate::event::{EventSource, LoopEvent};
use crate::hooks::LoopHooks;
use cinder_core::Result;

/// Milliseconds between statistics callbacks.
const STATS_INTERVAL_MS: u64 = 1000;

/// Where the loop's state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Running,
    Paused,
    Terminated,
}

/// What dispatching one input event did to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing scheduling-related; the pass continues.
    Continue,
    /// The event was a pause trigger; the loop is now paused.
    Paused,
    /// The event was a quit; the loop is now terminated.
    Terminated,
}

/// Mutable scheduling state, owned exclusively by the dispatch loop.
///
/// Invariant: `next_update_due_ms - prev_update_ms == fixed_interval_ms`
/// whenever no pause has occurred since the last completed update. A
/// resume re-anchors both boundaries at the resume-time clock, which
/// discards any accumulated backlog on purpose.
#[derive(Debug, Clone)]
pub struct LoopState {
    /// Wall-clock sample taken at the start of the current pass.
    pub now_ms: u64,
    /// When the next fixed update falls due.
    pub next_update_due_ms: u64,
    /// Wall-clock time at which the most recent update completed.
    pub prev_update_ms: u64,
    /// Seconds covered by the most recently completed update.
    pub delta_time_s: f64,
    /// Progress toward the next update boundary, recomputed every pass.
    /// Negative when the clock has jumped backward.
    pub interpolation_fraction: f64,
    /// Subdivision indices already rendered within the current interval.
    fired_subdivisions: [bool; MAX_SUBDIVISIONS],
    /// Updates completed since the last statistics tick.
    pub update_count: u32,
    /// Renders issued since the last statistics tick.
    pub render_count: u32,
    /// When the current statistics window opened.
    stats_window_start_ms: u64,
}

impl LoopState {
    fn new(now_ms: u64, fixed_interval_ms: u64) -> Self {
        Self {
            now_ms,
            next_update_due_ms: now_ms + fixed_interval_ms,
            prev_update_ms: now_ms,
            delta_time_s: 0.0,
            interpolation_fraction: 0.0,
            fired_subdivisions: [false; MAX_SUBDIVISIONS],
            update_count: 0,
            render_count: 0,
            stats_window_start_ms: now_ms,
        }
    }

    /// Whether subdivision `index` has already rendered this interval.
    pub fn subdivision_fired(&self, index: usize) -> bool {
        self.fired_subdivisions[index]
    }
}

/// The fixed-timestep dispatch loop.
///
/// Owns the schedule; behavior lives behind [`LoopHooks`]. Drive it
/// either with [`GameLoop::run`] (owned loop over an [`EventSource`]) or
/// stepwise via [`GameLoop::start`], [`GameLoop::dispatch_event`],
/// [`GameLoop::offer_resume`], and [`GameLoop::advance`] when an outer
/// event loop such as winit owns the thread.
pub struct GameLoop {
    config: LoopConfig,
    state: LoopState,
    phase: LoopPhase,
    /// The event that triggered the current pause, if any.
    pause_trigger: Option<LoopEvent>,
}

impl GameLoop {
    pub fn new(config: LoopConfig) -> Self {
        let state = LoopState::new(0, config.fixed_interval_ms());
        Self {
            config,
            state,
            phase: LoopPhase::Running,
            pause_trigger: None,
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Anchor the schedule at `now_ms`. Call once before the first pass.
    pub fn start(&mut self, now_ms: u64) {
        self.state = LoopState::new(now_ms, self.config.fixed_interval_ms());
        self.phase = LoopPhase::Running;
        self.pause_trigger = None;
    }

    /// Run to termination over `source`, sampling `clock` once per pass.
    ///
    /// Pausing blocks on [`EventSource::wait_event`] until the matching
    /// resume event (or a quit) arrives; nothing busy-polls while paused.
    pub fn run<C, S, H>(&mut self, clock: &C, source: &mut S, hooks: &mut H) -> Result<()>
    where
        C: Clock,
        S: EventSource,
        H: LoopHooks,
    {
        self.start(clock.now_ms());
        while self.phase == LoopPhase::Running {
            let now = clock.now_ms();

            let mut paused = false;
            while let Some(event) = source.poll_event() {
                match self.dispatch_event(&event, hooks)? {
                    EventOutcome::Continue => {}
                    EventOutcome::Terminated => return Ok(()),
                    EventOutcome::Paused => {
                        self.wait_for_resume(clock, source);
                        paused = true;
                        break;
                    }
                }
            }
            if paused {
                // The pre-pause clock sample is stale; open a fresh pass
                // (or fall out if the wait ended in termination).
                continue;
            }

            self.advance(now, hooks)?;
        }
        Ok(())
    }

    /// Feed one drained input event through the loop's control logic.
    ///
    /// The event always reaches `on_input`; afterwards a quit terminates
    /// the loop and a pause trigger suspends it.
    pub fn dispatch_event<H: LoopHooks>(
        &mut self,
        event: &LoopEvent,
        hooks: &mut H,
    ) -> Result<EventOutcome> {
        hooks.on_input(event)?;
        if *event == LoopEvent::Quit {
            self.phase = LoopPhase::Terminated;
            return Ok(EventOutcome::Terminated);
        }
        if self.config.is_pause_trigger(event) {
            self.phase = LoopPhase::Paused;
            self.pause_trigger = Some(*event);
            return Ok(EventOutcome::Paused);
        }
        Ok(EventOutcome::Continue)
    }

    /// Offer an event to a paused loop; returns true if it resumed.
    ///
    /// A quit event terminates instead of resuming. Any other
    /// non-matching event is discarded. For drivers that receive events
    /// from an outer event loop while suspended.
    pub fn offer_resume(&mut self, event: &LoopEvent, now_ms: u64) -> bool {
        if self.phase != LoopPhase::Paused {
            return false;
        }
        if *event == LoopEvent::Quit {
            self.phase = LoopPhase::Terminated;
            return false;
        }
        let resumes = self
            .pause_trigger
            .map_or(false, |trigger| trigger.resumed_by(event));
        if resumes {
            self.resume(now_ms);
        }
        resumes
    }

    /// One full running pass minus input draining: accumulate fixed
    /// updates, partition a render, emit statistics. No-op unless the
    /// loop is running.
    pub fn advance<H: LoopHooks>(&mut self, now_ms: u64, hooks: &mut H) -> Result<()> {
        if self.phase != LoopPhase::Running {
            return Ok(());
        }
        self.state.now_ms = now_ms;
        self.run_updates(hooks)?;
        self.partition_render(hooks)?;
        self.stats_tick(hooks)
    }

    fn wait_for_resume<C: Clock, S: EventSource>(&mut self, clock: &C, source: &mut S) {
        while self.phase == LoopPhase::Paused {
            let event = source.wait_event();
            self.offer_resume(&event, clock.now_ms());
        }
    }

    /// Return to `Running` with every timer re-anchored at `now_ms`, so
    /// time spent paused never shows up as update backlog.
    fn resume(&mut self, now_ms: u64) {
        let state = &mut self.state;
        state.now_ms = now_ms;
        state.prev_update_ms = now_ms;
        state.next_update_due_ms = now_ms + self.config.fixed_interval_ms();
        state.fired_subdivisions = [false; MAX_SUBDIVISIONS];
        state.stats_window_start_ms = now_ms;
        self.pause_trigger = None;
        self.phase = LoopPhase::Running;
    }

    /// Run every fixed update that is due, capped at `max_frame_skip`.
    ///
    /// Past the cap the simulation deliberately falls behind the wall
    /// clock instead of live-locking the pass. A clock that stalled or
    /// jumped backward leaves nothing due and the pass stays idle.
    fn run_updates<H: LoopHooks>(&mut self, hooks: &mut H) -> Result<()> {
        let interval = self.config.fixed_interval_ms();
        let now = self.state.now_ms;
        let mut skipped = 0u32;
        while now > self.state.next_update_due_ms && skipped < self.config.max_frame_skip() {
            // Saturating: with backlog left by the skip cap, a backward
            // clock step can land below prev_update_ms while still being
            // past the due boundary.
            let delta_time_s = now.saturating_sub(self.state.prev_update_ms) as f64 / 1000.0;
            hooks.on_update(delta_time_s)?;
            hooks.on_collisions()?;
            // Boundaries move only after the callbacks came back clean.
            self.state.delta_time_s = delta_time_s;
            self.state.next_update_due_ms += interval;
            self.state.prev_update_ms = now;
            self.state.fired_subdivisions = [false; MAX_SUBDIVISIONS];
            self.state.update_count += 1;
            skipped += 1;
        }
        Ok(())
    }

    /// Fire at most one unfired subdivision threshold for this pass.
    fn partition_render<H: LoopHooks>(&mut self, hooks: &mut H) -> Result<()> {
        let interval = self.config.fixed_interval_ms() as i64;
        // Signed arithmetic: a backward clock yields a negative fraction,
        // not an unsigned wrap.
        let lead = self.state.now_ms as i64 + interval - self.state.next_update_due_ms as i64;
        let fraction = lead as f64 / interval as f64;
        self.state.interpolation_fraction = fraction;

        let thresholds = self.config.subdivisions().thresholds();
        for (index, &threshold) in thresholds.iter().enumerate() {
            if self.state.fired_subdivisions[index] {
                continue;
            }
            if fraction < threshold {
                // Thresholds are ascending; nothing further is due yet.
                break;
            }
            hooks.on_interpolate(self.state.delta_time_s, fraction)?;
            hooks.on_render()?;
            self.state.fired_subdivisions[index] = true;
            self.state.render_count += 1;
            break;
        }
        Ok(())
    }

    fn stats_tick<H: LoopHooks>(&mut self, hooks: &mut H) -> Result<()> {
        let elapsed_ms = self
            .state
            .now_ms
            .saturating_sub(self.state.stats_window_start_ms);
        if elapsed_ms >= STATS_INTERVAL_MS {
            hooks.on_stats_tick(
                elapsed_ms as f64 / 1000.0,
                self.state.update_count,
                self.state.render_count,
            )?;
            self.state.update_count = 0;
            self.state.render_count = 0;
            self.state.stats_window_start_ms = self.state.now_ms;
        }
        Ok(())
    }
}
