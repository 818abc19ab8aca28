//! Loop configuration: update rate, frame-skip bound, render subdivisions

use crate::event::LoopEvent;
use winit::keyboard::KeyCode;

/// Lowest accepted simulation rate.
pub const MIN_UPDATES_PER_SECOND: u32 = 1;
/// Highest accepted simulation rate.
pub const MAX_UPDATES_PER_SECOND: u32 = 240;
/// Upper bound on render opportunities per update interval.
pub const MAX_SUBDIVISIONS: usize = 4;

/// How many render opportunities each update interval is partitioned into.
///
/// Each variant carries an ordered set of fraction thresholds; a render
/// becomes due when the interpolation fraction crosses an unfired
/// threshold. `Three` keeps the literal 0.33/0.66 values rather than
/// exact thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subdivisions {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl Subdivisions {
    /// Ordered render thresholds as fractions of the update interval.
    pub fn thresholds(self) -> &'static [f64] {
        match self {
            Subdivisions::One => &[0.0],
            Subdivisions::Two => &[0.0, 0.50],
            Subdivisions::Three => &[0.0, 0.33, 0.66],
            Subdivisions::Four => &[0.0, 0.25, 0.50, 0.75],
        }
    }

    /// Number of render opportunities per interval.
    pub fn count(self) -> usize {
        self.thresholds().len()
    }

    /// Build from a raw count, clamped to the supported range.
    pub fn from_count(count: u32) -> Self {
        match count {
            0 | 1 => Subdivisions::One,
            2 => Subdivisions::Two,
            3 => Subdivisions::Three,
            _ => Subdivisions::Four,
        }
    }
}

/// Immutable loop configuration.
///
/// Out-of-range values are clamped, never rejected: the loop must always
/// come up with a runnable, non-zero update interval.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    updates_per_second: u32,
    fixed_interval_ms: u64,
    max_frame_skip: u32,
    subdivisions: Subdivisions,
    pause_key: Option<KeyCode>,
}

impl LoopConfig {
    /// Create a configuration targeting `updates_per_second` fixed updates.
    pub fn new(updates_per_second: u32) -> Self {
        let rate = updates_per_second.clamp(MIN_UPDATES_PER_SECOND, MAX_UPDATES_PER_SECOND);
        Self {
            updates_per_second: rate,
            fixed_interval_ms: (1000 / rate) as u64,
            max_frame_skip: 5,
            subdivisions: Subdivisions::One,
            pause_key: None,
        }
    }

    /// Set the render subdivision count.
    pub fn with_subdivisions(mut self, subdivisions: Subdivisions) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Bound catch-up updates per dispatch pass. Clamped to at least 1.
    pub fn with_max_frame_skip(mut self, max_frame_skip: u32) -> Self {
        self.max_frame_skip = max_frame_skip.max(1);
        self
    }

    /// Designate a key that pauses the loop; pressing it again resumes.
    /// Focus loss always pauses, independent of this.
    pub fn with_pause_key(mut self, key: KeyCode) -> Self {
        self.pause_key = Some(key);
        self
    }

    pub fn updates_per_second(&self) -> u32 {
        self.updates_per_second
    }

    /// Length of one fixed update interval in milliseconds. Always > 0.
    pub fn fixed_interval_ms(&self) -> u64 {
        self.fixed_interval_ms
    }

    pub fn max_frame_skip(&self) -> u32 {
        self.max_frame_skip
    }

    pub fn subdivisions(&self) -> Subdivisions {
        self.subdivisions
    }

    /// Whether `event` suspends the loop.
    pub fn is_pause_trigger(&self, event: &LoopEvent) -> bool {
        match event {
            LoopEvent::FocusLost => true,
            LoopEvent::KeyPressed(key) => self.pause_key == Some(*key),
            _ => false,
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_for_60_updates_is_16ms() {
        let config = LoopConfig::new(60);
        assert_eq!(config.fixed_interval_ms(), 16);
    }

    #[test]
    fn rate_is_clamped_to_valid_range() {
        let low = LoopConfig::new(0);
        assert_eq!(low.updates_per_second(), 1);
        assert_eq!(low.fixed_interval_ms(), 1000);

        let high = LoopConfig::new(300);
        assert_eq!(high.updates_per_second(), 240);
        assert_eq!(high.fixed_interval_ms(), 4);
    }

    #[test]
    fn interval_is_never_zero() {
        for rate in [0, 1, 59, 60, 61, 144, 240, 1000] {
            let config = LoopConfig::new(rate);
            assert!(config.fixed_interval_ms() > 0, "rate {rate}");
        }
    }

    #[test]
    fn frame_skip_floor_is_one() {
        let config = LoopConfig::new(60).with_max_frame_skip(0);
        assert_eq!(config.max_frame_skip(), 1);
    }

    #[test]
    fn subdivision_thresholds() {
        assert_eq!(Subdivisions::One.thresholds(), &[0.0]);
        assert_eq!(Subdivisions::Two.thresholds(), &[0.0, 0.50]);
        assert_eq!(Subdivisions::Three.thresholds(), &[0.0, 0.33, 0.66]);
        assert_eq!(Subdivisions::Four.thresholds(), &[0.0, 0.25, 0.50, 0.75]);
    }

    #[test]
    fn subdivisions_from_count_clamps() {
        assert_eq!(Subdivisions::from_count(0), Subdivisions::One);
        assert_eq!(Subdivisions::from_count(2), Subdivisions::Two);
        assert_eq!(Subdivisions::from_count(9), Subdivisions::Four);
    }

    #[test]
    fn pause_triggers() {
        let config = LoopConfig::new(60).with_pause_key(KeyCode::Space);
        assert!(config.is_pause_trigger(&LoopEvent::FocusLost));
        assert!(config.is_pause_trigger(&LoopEvent::KeyPressed(KeyCode::Space)));
        assert!(!config.is_pause_trigger(&LoopEvent::KeyPressed(KeyCode::KeyA)));
        assert!(!config.is_pause_trigger(&LoopEvent::KeyReleased(KeyCode::Space)));

        let no_key = LoopConfig::new(60);
        assert!(!no_key.is_pause_trigger(&LoopEvent::KeyPressed(KeyCode::Space)));
    }
}
