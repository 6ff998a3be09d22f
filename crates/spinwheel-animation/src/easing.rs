//! Easing curves mapping linear progress to eased progress.

/// An easing curve over progress `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// No easing.
    Linear,

    /// Quartic ease-out, `(p - 1)^3 * (1 - p) + 1`.
    ///
    /// Fast start, long gentle tail; used for wheel settling.
    #[default]
    QuarticOut,
}

impl Easing {
    /// Eased value for `progress`, which is clamped to `0.0..=1.0`.
    pub fn transform(self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::QuarticOut => {
                let f = p - 1.0;
                f * f * f * (1.0 - p) + 1.0
            }
        }
    }
}

/// Interpolates between `start` and `end` by eased `progress`.
pub fn lerp_eased(start: f32, end: f32, progress: f32, easing: Easing) -> f32 {
    start + easing.transform(progress) * (end - start)
}
