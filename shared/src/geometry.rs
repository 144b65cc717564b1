//! Height policy of the place page sheet.
//!
//! Everything here is a pure function of one layout snapshot. Peek height is where the
//! sheet rests when collapsed; the min/max bounds are hard limits on the sheet container so
//! that content growing or shrinking between two objects does not make the sheet jump.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::model::MapObject;

/// Share of the coordinator height used as peek height in preview-plus mode.
pub const PREVIEW_PLUS_RATIO: f32 = 0.45;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Snapshot of the host layout for one layout pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub coordinator_width: i32,
    pub coordinator_height: i32,
    /// Height of the view the sheet is attached to.
    pub parent_height: i32,
    pub insets: Insets,
    pub panel_width: i32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub preview_height: i32,
    pub frame_height: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightBounds {
    pub min: i32,
    pub max: i32,
}

impl HeightBounds {
    /// Bounds used while the sheet is hidden: no floor, the whole parent as ceiling.
    pub fn reset(viewport: &ViewportMetrics) -> Self {
        Self {
            min: 0,
            max: viewport.parent_height,
        }
    }
}

/// Peek height and bounds derived together from the same snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SheetGeometry {
    pub peek_height: i32,
    pub bounds: HeightBounds,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

pub fn compute_peek_height(
    object: Option<&MapObject>,
    viewport: &ViewportMetrics,
    preview_height: i32,
    buttons_height: i32,
) -> i32 {
    if object.is_some_and(MapObject::is_preview_plus) {
        return (viewport.coordinator_height as f32 * PREVIEW_PLUS_RATIO) as i32;
    }
    preview_height + buttons_height
}

pub fn compute_height_bounds(
    peek_height: i32,
    frame_height: i32,
    viewport: &ViewportMetrics,
    is_route_planning: bool,
    header_height: i32,
) -> HeightBounds {
    // The container must be able to reach the peek height.
    let min = peek_height.max(frame_height);
    // Stay below the status bar, and below the routing header while planning.
    let top_inset = viewport.insets.top + if is_route_planning { header_height } else { 0 };
    // The toolkit's max height ignores the navigation bar, hence the bottom inset.
    let max = (min + viewport.insets.bottom).min(viewport.coordinator_height - top_inset);
    HeightBounds {
        min: min.min(max),
        max,
    }
}

#[instrument(level = "trace", skip(object))]
pub fn compute_geometry(
    object: Option<&MapObject>,
    viewport: &ViewportMetrics,
    content: &ContentMetrics,
    buttons_height: i32,
    is_route_planning: bool,
    header_height: i32,
) -> SheetGeometry {
    let peek_height = compute_peek_height(object, viewport, content.preview_height, buttons_height);
    let bounds = compute_height_bounds(
        peek_height,
        content.frame_height,
        viewport,
        is_route_planning,
        header_height,
    );
    SheetGeometry {
        peek_height,
        bounds,
    }
}

/// Live sheet height, excluding the navigation bar already counted in the peek height.
pub fn animation_start_height(viewport: &ViewportMetrics, distance_to_top: i32) -> i32 {
    viewport.parent_height - distance_to_top - viewport.insets.bottom
}

/// Content shorter than the peek height has to be stretched before the peek is applied.
pub fn needs_min_height_boost(current_height: i32, peek_height: i32) -> bool {
    current_height < peek_height
}

/// Map area left visible above the sheet, or `None` when the sheet covers too much of it.
pub fn map_visible_rect(
    viewport: &ViewportMetrics,
    distance_to_top: i32,
    viewport_min_height: i32,
) -> Option<VisibleRect> {
    (distance_to_top >= viewport_min_height).then_some(VisibleRect {
        left: 0,
        top: 0,
        right: viewport.coordinator_width,
        bottom: distance_to_top,
    })
}
