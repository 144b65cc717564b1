use serde::{Deserialize, Serialize};
use std::fmt;

use crate::animator::HeightAnimator;
use crate::buttons::ButtonType;
use crate::config::PanelConfig;
use crate::geometry::{ContentMetrics, SheetGeometry, ViewportMetrics};
use crate::selection::SelectionObserver;
use crate::sheet::SheetState;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(pub String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw lat/lon as reported by the map engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both axes must differ by strictly less than `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() < tolerance && (self.lon - other.lon).abs() < tolerance
    }

    fn same_bits(self, other: Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningMode {
    #[default]
    Normal,
    PreviewPlus,
}

/// Road warning mark attached to the selected object.
///
/// `Unknown` carries codes the engine may report but the panel has no action for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadWarning {
    #[default]
    None,
    Dirty,
    Ferry,
    Toll,
    Unknown(u8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Dirty,
    Ferry,
    Toll,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub feature_id: FeatureId,
    pub location: LatLon,
    pub title: String,
    pub is_bookmark: bool,
    pub opening_mode: OpeningMode,
    pub road_warning: RoadWarning,
    /// Identifier handed over by an external API caller, if the point came from one.
    pub api_id: Option<String>,
    pub is_my_position: bool,
}

impl MapObject {
    pub fn new(feature_id: FeatureId, location: LatLon, title: impl Into<String>) -> Self {
        Self {
            feature_id,
            location,
            title: title.into(),
            is_bookmark: false,
            opening_mode: OpeningMode::Normal,
            road_warning: RoadWarning::None,
            api_id: None,
            is_my_position: false,
        }
    }

    pub fn is_api_point(&self) -> bool {
        self.api_id.is_some()
    }

    pub fn is_preview_plus(&self) -> bool {
        self.opening_mode == OpeningMode::PreviewPlus
    }

    /// Identity comparison: same feature at the same spot. Two `None`s are not the same.
    pub fn same(a: Option<&Self>, b: Option<&Self>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => a.feature_id == b.feature_id && a.location.same_bits(b.location),
            _ => false,
        }
    }
}

/// Routing subsystem state pushed by the shell whenever it changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingStatus {
    pub planning: bool,
    pub stop_point_allowed: bool,
    pub route_points: Vec<FeatureId>,
}

impl RoutingStatus {
    pub fn is_route_point(&self, object: &MapObject) -> bool {
        self.route_points.contains(&object.feature_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastMessage {
    pub message: String,
    pub kind: ToastKind,
}

impl ToastMessage {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: PanelConfig,

    // Layout snapshot
    pub viewport: Option<ViewportMetrics>,
    pub content: ContentMetrics,
    pub geometry: Option<SheetGeometry>,
    /// Last min height written to the host, used to decide the peek boost.
    pub applied_min_height: i32,
    /// Geometry recomputed while the sheet was moving, written once it rests.
    pub geometry_pending: bool,
    /// Content was measured before the viewport was known.
    pub open_pending: bool,

    // Sheet
    pub sheet_state: SheetState,
    pub distance_to_top: i32,
    pub animator: HeightAnimator,
    pub interactions_enabled: bool,

    // Selection
    pub selection: SelectionObserver,
    pub buttons: Vec<ButtonType>,

    // Collaborator state
    pub routing: RoutingStatus,
    pub pick_point_mode: bool,

    pub active_toast: Option<ToastMessage>,
}

impl Model {
    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.active_toast = Some(ToastMessage::new(message, kind));
    }

    pub fn clear_toast(&mut self) {
        self.active_toast = None;
    }

    pub fn current(&self) -> Option<&MapObject> {
        self.selection.current()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub sheet_state: SheetState,
    pub title: Option<String>,
    pub buttons: Vec<ButtonType>,
    /// `None` when every button fits in the bar.
    pub overflow: Option<Vec<ButtonType>>,
    pub distance_to_top: i32,
    pub panel_width: i32,
    pub interactions_enabled: bool,
    pub toast: Option<ToastMessage>,
}
