//! Drag handling for picker columns.
//!
//! [`GestureController`] turns the host's pan stream into [`PanCommand`]s
//! for a single column. The column is picked by hit test when the pan
//! begins and stays bound, by index, until the pan ends.

use spinwheel_foundation::{ColumnGeometry, Point};
use web_time::Duration;

use crate::spec::PickerSpec;

/// One event of a pan recognizer, in the host view's y-down coordinates
/// except for `location`, which is control-local and y-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    /// Touch went down at `location`.
    Began { location: Point },
    /// Finger moved by `translation` since the previous event.
    Changed { translation: Point },
    /// Finger lifted while moving at `velocity` (points per second).
    Ended { velocity: Point },
    /// The recognizer gave up on the gesture.
    Cancelled,
}

/// What the picker should do with the bound column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanCommand {
    /// Stop any settle animation; the user grabbed the column.
    Grab { component: usize },
    /// Move the content offset by `delta`.
    ScrollBy { component: usize, delta: f32 },
    /// Start settling with the release velocity along the content axis.
    Release { component: usize, velocity: f32 },
}

/// Pan state shared by all columns of a picker.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    /// Column bound to the current pan.
    active: Option<usize>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_component(&self) -> Option<usize> {
        self.active
    }

    /// Drops the current binding without emitting a release.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Feeds one pan event.
    ///
    /// `hit_test` maps a touch location to the column under it; it is only
    /// consulted for [`PanEvent::Began`].
    pub fn handle<F>(&mut self, event: PanEvent, hit_test: F) -> Option<PanCommand>
    where
        F: FnOnce(Point) -> Option<usize>,
    {
        match event {
            PanEvent::Began { location } => {
                self.active = hit_test(location);
                if self.active.is_none() {
                    log::trace!("pan at {location:?} hit no column, ignoring");
                }
                self.active.map(|component| PanCommand::Grab { component })
            }
            PanEvent::Changed { translation } => {
                // View y grows downward, content offsets grow as rows move up.
                self.active.map(|component| PanCommand::ScrollBy {
                    component,
                    delta: -translation.y,
                })
            }
            PanEvent::Ended { velocity } => self.active.take().map(|component| PanCommand::Release {
                component,
                velocity: velocity.y,
            }),
            PanEvent::Cancelled => self.active.take().map(|component| PanCommand::Release {
                component,
                velocity: 0.0,
            }),
        }
    }
}

/// Where and how long a released column settles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleTarget {
    pub offset: f32,
    pub duration: Duration,
}

/// Projects a release at `offset` with `velocity` onto a row.
///
/// The velocity is applied as one second of travel, snapped to the nearest
/// row center and clamped into the content. A target pulled back by the
/// clamp settles with the short bounce duration.
pub fn release_target(
    geometry: &ColumnGeometry,
    offset: f32,
    velocity: f32,
    spec: &PickerSpec,
) -> SettleTarget {
    let projected = offset - velocity;
    let snapped = geometry.nearest_row_offset(projected);
    let clamped = geometry.clamp_offset(snapped);
    let duration = if clamped != snapped {
        spec.bounce_duration
    } else {
        spec.settle_duration
    };
    SettleTarget {
        offset: clamped,
        duration,
    }
}
