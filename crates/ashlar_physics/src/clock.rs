// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame clock for the driver loop.
//!
//! This module handles:
//! - Delta time between frames, clamped to `max_delta`
//! - How long to sleep to honour an FPS cap
//! - A frames-per-second counter
//!
//! The clock takes `Instant`s from the caller instead of reading the system
//! time itself, so a driver can run it on simulated time.

use crate::config::FrameSettings;
use std::time::{Duration, Instant};

/// Delta clamp, FPS cap and FPS counter
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_delta: f32,
    target_fps: Option<u32>,
    fps_log_interval: Duration,
    last_tick: Option<Instant>,
    /// Frames since the FPS window opened
    window_frames: u32,
    window_start: Option<Instant>,
    /// Last measured frame rate
    fps: Option<u32>,
    /// Frames ticked since creation
    pub frame_count: u64,
}

impl FrameClock {
    /// Create from frame settings
    pub fn new(settings: &FrameSettings) -> Self {
        Self {
            max_delta: settings.max_delta.max(0.0),
            target_fps: settings.target_fps,
            fps_log_interval: Duration::try_from_secs_f64(settings.fps_log_interval.max(0.0))
                .unwrap_or(Duration::MAX),
            last_tick: None,
            window_frames: 0,
            window_start: None,
            fps: None,
            frame_count: 0,
        }
    }

    /// Start a frame and return its simulation delta.
    ///
    /// The first tick returns 0. Later ticks return the time since the
    /// previous tick, clamped to `[0, max_delta]`.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let raw = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.frame_count += 1;

        self.count_frame(now);

        raw.clamp(0.0, self.max_delta)
    }

    fn count_frame(&mut self, now: Instant) {
        let start = *self.window_start.get_or_insert(now);
        self.window_frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.fps_log_interval && !elapsed.is_zero() {
            let fps = (self.window_frames as f64 / elapsed.as_secs_f64()).round() as u32;
            self.fps = Some(fps);
            tracing::debug!("FPS: {}", fps);

            self.window_frames = 0;
            self.window_start = Some(now);
        }
    }

    /// Last measured frame rate, once a full window has elapsed
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }

    /// Frame rate cap; `None` is unbounded
    pub fn target_fps(&self) -> Option<u32> {
        self.target_fps
    }

    /// Change the frame rate cap. Zero is treated as unbounded.
    pub fn set_target_fps(&mut self, target_fps: Option<u32>) {
        self.target_fps = target_fps.filter(|fps| *fps > 0);
        match self.target_fps {
            Some(fps) => tracing::info!("FPS cap set to {}", fps),
            None => tracing::info!("FPS cap disabled"),
        }
    }

    /// Time left in the frame budget, or `None` when uncapped or over budget
    pub fn sleep_time(&self, frame_start: Instant, now: Instant) -> Option<Duration> {
        let fps = self.target_fps?;
        let budget = Duration::from_secs_f64(1.0 / fps as f64);
        let spent = now.saturating_duration_since(frame_start);

        budget.checked_sub(spent).filter(|remaining| !remaining.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> FrameClock {
        FrameClock::new(&FrameSettings::default())
    }

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = clock();
        assert_eq!(clock.tick(Instant::now()), 0.0);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = clock();
        let start = Instant::now();
        clock.tick(start);

        let dt = clock.tick(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-4);

        // Hitch
        let dt = clock.tick(start + Duration::from_millis(1016));
        assert_eq!(dt, 0.05);
    }

    #[test]
    fn test_sleep_time_with_cap() {
        let mut clock = clock();
        let start = Instant::now();
        assert!(clock.sleep_time(start, start).is_none());

        clock.set_target_fps(Some(30));
        let remaining = clock.sleep_time(start, start + Duration::from_millis(10));
        let remaining = remaining.unwrap().as_secs_f64();
        assert!((remaining - (1.0 / 30.0 - 0.010)).abs() < 1e-6);

        // Over budget
        assert!(clock
            .sleep_time(start, start + Duration::from_millis(50))
            .is_none());

        clock.set_target_fps(Some(0));
        assert_eq!(clock.target_fps(), None);
    }

    #[test]
    fn test_out_of_range_settings_do_not_panic() {
        let mut clock = FrameClock::new(&FrameSettings {
            max_delta: -0.05,
            target_fps: None,
            fps_log_interval: 1e300,
        });
        let start = Instant::now();
        clock.tick(start);
        assert_eq!(clock.tick(start + Duration::from_millis(16)), 0.0);
        assert_eq!(clock.fps(), None);
    }

    #[test]
    fn test_fps_counter() {
        let mut clock = clock();
        let start = Instant::now();
        assert_eq!(clock.fps(), None);

        for i in 0..=60u64 {
            clock.tick(start + Duration::from_micros(i * 16_667));
        }
        assert_eq!(clock.fps(), Some(61));
    }
}
