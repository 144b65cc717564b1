use serde::{Deserialize, Serialize};

use crate::buttons::ButtonType;
use crate::capabilities::{BookmarkCategory, BookmarkInfo};
use crate::config::PanelConfig;
use crate::geometry::ViewportMetrics;
use crate::markers::{Marker, MarkerError};
use crate::model::{LatLon, MapObject, RoutingStatus};
use crate::sheet::SheetState;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Host setup
    Configure(PanelConfig),
    ViewportChanged(ViewportMetrics),
    ContentMeasured {
        preview_height: i32,
        frame_height: i32,
    },
    Resumed {
        has_place_info: bool,
    },

    // Collaborator state
    SelectionChanged(Option<MapObject>),
    RoutingChanged(RoutingStatus),
    PickPointModeChanged {
        active: bool,
    },

    // Sheet widget
    SheetSlid {
        distance_to_top: i32,
    },
    SheetSettled(SheetState),
    AnimationFrame {
        session: u64,
        now_ms: u64,
    },

    // User
    ToggleRequested,
    CloseRequested,
    ButtonClicked(ButtonType),
    DismissToast,

    // Responses from capabilities
    #[serde(skip)]
    StartPointSet {
        accepted: bool,
    },
    #[serde(skip)]
    CategoriesListed(Vec<BookmarkCategory>),
    #[serde(skip)]
    MarkersFetched(Result<Vec<Marker>, MarkerError>),
    #[serde(skip)]
    MarkerBookmarksListed {
        target: LatLon,
        bookmarks: Vec<BookmarkInfo>,
    },
    #[serde(skip)]
    MarkerDeleted(Result<(), MarkerError>),
}

impl Event {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::ViewportChanged(_) => "viewport_changed",
            Self::ContentMeasured { .. } => "content_measured",
            Self::Resumed { .. } => "resumed",
            Self::SelectionChanged(_) => "selection_changed",
            Self::RoutingChanged(_) => "routing_changed",
            Self::PickPointModeChanged { .. } => "pick_point_mode_changed",
            Self::SheetSlid { .. } => "sheet_slid",
            Self::SheetSettled(_) => "sheet_settled",
            Self::AnimationFrame { .. } => "animation_frame",
            Self::ToggleRequested => "toggle_requested",
            Self::CloseRequested => "close_requested",
            Self::ButtonClicked(_) => "button_clicked",
            Self::DismissToast => "dismiss_toast",
            Self::StartPointSet { .. } => "start_point_set",
            Self::CategoriesListed(_) => "categories_listed",
            Self::MarkersFetched(_) => "markers_fetched",
            Self::MarkerBookmarksListed { .. } => "marker_bookmarks_listed",
            Self::MarkerDeleted(_) => "marker_deleted",
        }
    }

    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::ToggleRequested
                | Self::CloseRequested
                | Self::ButtonClicked(_)
                | Self::DismissToast
                | Self::SelectionChanged(_)
        )
    }

    /// Events fired once per display frame or drag step. Logged at trace level only.
    pub const fn is_high_frequency(&self) -> bool {
        matches!(self, Self::AnimationFrame { .. } | Self::SheetSlid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_actions_are_flagged() {
        assert!(Event::ButtonClicked(ButtonType::RouteTo).is_user_initiated());
        assert!(Event::CloseRequested.is_user_initiated());
        assert!(!Event::SheetSettled(SheetState::Hidden).is_user_initiated());
        assert!(!Event::MarkerDeleted(Ok(())).is_user_initiated());
    }

    #[test]
    fn frame_events_are_high_frequency() {
        assert!(Event::AnimationFrame { session: 1, now_ms: 0 }.is_high_frequency());
        assert!(!Event::ToggleRequested.is_high_frequency());
    }

    #[test]
    fn shell_events_round_trip_through_json() {
        let event = Event::ContentMeasured {
            preview_height: 320,
            frame_height: 900,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<Event>(&json).unwrap(), event);
        assert_eq!(event.name(), "content_measured");
    }
}
