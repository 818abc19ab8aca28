//! Callback surface the dispatch loop drives

use crate::event::LoopEvent;
use cinder_core::Result;

/// Callbacks invoked by the dispatch loop.
///
/// The loop owns scheduling only; everything that actually moves,
/// collides, or draws lives behind this trait. All methods default to
/// no-ops so an implementation overrides only what it needs. Callbacks
/// run synchronously to completion inside the current pass and must not
/// block.
///
/// An error from any callback aborts the run and is returned to the
/// caller. The loop never advances its update boundaries past a failed
/// callback, so a retry sees the same schedule.
pub trait LoopHooks {
    /// One drained input event. May mutate collaborator state.
    fn on_input(&mut self, _event: &LoopEvent) -> Result<()> {
        Ok(())
    }

    /// Advance the simulation by `delta_time_s` seconds.
    fn on_update(&mut self, _delta_time_s: f64) -> Result<()> {
        Ok(())
    }

    /// Resolve collisions after a position update.
    fn on_collisions(&mut self) -> Result<()> {
        Ok(())
    }

    /// Compute a display-only state `fraction` of the way through the
    /// current update interval. Must not mutate authoritative simulation
    /// state.
    fn on_interpolate(&mut self, _delta_time_s: f64, _fraction: f64) -> Result<()> {
        Ok(())
    }

    /// Issue draw operations. Must not mutate simulation state.
    fn on_render(&mut self) -> Result<()> {
        Ok(())
    }

    /// Periodic statistics: seconds since the previous tick and the
    /// update/render counts accumulated in that window.
    fn on_stats_tick(&mut self, _elapsed_s: f64, _update_count: u32, _render_count: u32) -> Result<()> {
        Ok(())
    }
}
