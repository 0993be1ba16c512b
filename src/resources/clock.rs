//! Millisecond wall-clock resource.
//!
//! Delay queues compare timestamps sampled from the [`Clock`] resource. The
//! clock wraps a [`TimeSource`]: [`SystemTimeSource`] reads the system wall
//! clock, [`ManualTimeSource`] is driven by the host (fixed-step loops,
//! replays, tests).
//!
//! When no `Clock` is present in the world, [`Clock::sample`] falls back to
//! the system wall clock.

use bevy_ecs::prelude::Resource;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in milliseconds.
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Host-driven time. Clones share the same counter, so a handle kept outside
/// the world moves the clock seen inside it.
#[derive(Debug, Default, Clone)]
pub struct ManualTimeSource {
    now: Arc<AtomicU64>,
}

impl ManualTimeSource {
    pub fn new(start_ms: u64) -> Self {
        ManualTimeSource {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Relaxed);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

/// Time source shared by the delay systems.
#[derive(Resource)]
pub struct Clock {
    source: Box<dyn TimeSource>,
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new(SystemTimeSource)
    }
}

impl Clock {
    pub fn new(source: impl TimeSource + 'static) -> Self {
        Clock {
            source: Box::new(source),
        }
    }

    /// Current time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.source.now_ms()
    }

    /// Current time from `clock`, or the system wall clock if there is none.
    pub fn sample(clock: Option<&Clock>) -> u64 {
        clock.map_or_else(|| SystemTimeSource.now_ms(), Clock::now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_source_set_and_advance() {
        let source = ManualTimeSource::new(100);
        assert_eq!(source.now_ms(), 100);
        source.advance(50);
        assert_eq!(source.now_ms(), 150);
        source.set(10);
        assert_eq!(source.now_ms(), 10);
    }

    #[test]
    fn test_clock_follows_shared_manual_source() {
        let source = ManualTimeSource::new(0);
        let clock = Clock::new(source.clone());
        source.advance(16);
        assert_eq!(clock.now_ms(), 16);
    }

    #[test]
    fn test_sample_without_clock_uses_system_time() {
        assert!(Clock::sample(None) > 0);
    }

    #[test]
    fn test_sample_with_clock() {
        let clock = Clock::new(ManualTimeSource::new(42));
        assert_eq!(Clock::sample(Some(&clock)), 42);
    }
}
