//! Picker configuration.

use spinwheel_foundation::{CellReusePolicy, Color, DEFAULT_CELL_Z_POSITION};
use web_time::Duration;

/// Row height used when neither [`PickerSpec`] nor the delegate provides a usable one.
pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;

/// Duration of a settle that ends inside the content bounds.
pub const DEFAULT_SETTLE_DURATION: Duration = Duration::from_secs(5);

/// Duration of a settle whose target had to be pulled back into bounds.
pub const DEFAULT_BOUNCE_DURATION: Duration = Duration::from_millis(500);

/// Layout and behavior settings of a picker.
#[derive(Clone, Debug, PartialEq)]
pub struct PickerSpec {
    /// Fallback row height for components the delegate does not size.
    pub row_height: f32,
    /// Settle duration for releases and animated selections.
    pub settle_duration: Duration,
    /// Settle duration when a release overshoots the first or last row.
    pub bounce_duration: Duration,
    /// Draw order of row cells inside their column.
    pub cell_z_position: f32,
    /// Whether the selection indicator band is shown.
    pub shows_selection_indicator: bool,
    /// Color of the selection indicator band.
    pub indicator_color: Color,
    /// Whether dragging scrolls the columns.
    pub scroll_enabled: bool,
    /// Retention policy for recycled cells.
    pub reuse_policy: CellReusePolicy,
}

impl Default for PickerSpec {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            settle_duration: DEFAULT_SETTLE_DURATION,
            bounce_duration: DEFAULT_BOUNCE_DURATION,
            cell_z_position: DEFAULT_CELL_Z_POSITION,
            shows_selection_indicator: true,
            indicator_color: Color::WHITE,
            scroll_enabled: true,
            reuse_policy: CellReusePolicy::default(),
        }
    }
}

impl PickerSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    pub fn bounce_duration(mut self, duration: Duration) -> Self {
        self.bounce_duration = duration;
        self
    }

    pub fn cell_z_position(mut self, z_position: f32) -> Self {
        self.cell_z_position = z_position;
        self
    }

    pub fn shows_selection_indicator(mut self, shows: bool) -> Self {
        self.shows_selection_indicator = shows;
        self
    }

    pub fn indicator_color(mut self, color: Color) -> Self {
        self.indicator_color = color;
        self
    }

    pub fn scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    pub fn reuse_policy(mut self, policy: CellReusePolicy) -> Self {
        self.reuse_policy = policy;
        self
    }

    /// Row height to use given an optional delegate override.
    ///
    /// Non-positive heights cannot lay out rows and fall back to
    /// [`DEFAULT_ROW_HEIGHT`].
    pub(crate) fn resolve_row_height(&self, component: usize, requested: Option<f32>) -> f32 {
        let height = requested.unwrap_or(self.row_height);
        if height > 0.0 && height.is_finite() {
            height
        } else {
            log::warn!(
                "component {component}: unusable row height {height}, using {DEFAULT_ROW_HEIGHT}"
            );
            DEFAULT_ROW_HEIGHT
        }
    }
}
