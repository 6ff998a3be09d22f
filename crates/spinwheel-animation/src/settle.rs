//! Time-parameterized settle animation for a single scroll offset.

use web_time::{Duration, Instant};

use crate::easing::{lerp_eased, Easing};

/// Frame result of [`SettleAnimation::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleFrame {
    /// Offset to apply for this frame.
    pub offset: f32,

    /// Whether the animation reached its end offset.
    pub finished: bool,
}

/// Eased motion of a scroll offset from `start_offset` to `end_offset`.
///
/// The clock starts on the first [`advance`](Self::advance), so an animation
/// created between frames begins at the next frame like a scheduled action.
#[derive(Clone, Debug, PartialEq)]
pub struct SettleAnimation {
    start_offset: f32,
    end_offset: f32,
    start_time: Option<Instant>,
    duration: Duration,
    easing: Easing,
}

impl SettleAnimation {
    pub fn new(start_offset: f32, end_offset: f32, duration: Duration) -> Self {
        Self {
            start_offset,
            end_offset,
            start_time: None,
            duration,
            easing: Easing::QuarticOut,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start_offset(&self) -> f32 {
        self.start_offset
    }

    pub fn end_offset(&self) -> f32 {
        self.end_offset
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Linear progress at `now`, `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Advances to `now` and returns the offset for this frame.
    pub fn advance(&mut self, now: Instant) -> SettleFrame {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        let progress = self.progress(now);
        if progress >= 1.0 {
            return SettleFrame {
                offset: self.end_offset,
                finished: true,
            };
        }
        SettleFrame {
            offset: lerp_eased(self.start_offset, self.end_offset, progress, self.easing),
            finished: false,
        }
    }
}
