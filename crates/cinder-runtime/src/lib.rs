//! Cinder Runtime - The fixed-timestep dispatch loop
//!
//! Provides the scheduling core of the engine:
//! - `LoopConfig` / `Subdivisions` — update rate, frame-skip bound, and
//!   sub-frame render partitioning
//! - `GameLoop` — fixed-timestep dispatch with bounded catch-up and
//!   pause/resume
//! - `LoopHooks` — the callback surface the loop drives
//! - `Clock` / `EventSource` — wall-clock and input-queue abstractions

mod clock;
mod config;
mod dispatch;
mod event;
mod hooks;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    LoopConfig, Subdivisions, MAX_SUBDIVISIONS, MAX_UPDATES_PER_SECOND, MIN_UPDATES_PER_SECOND,
};
pub use dispatch::{EventOutcome, GameLoop, LoopPhase, LoopState};
pub use event::{EventQueue, EventSource, LoopEvent};
pub use hooks::LoopHooks;
