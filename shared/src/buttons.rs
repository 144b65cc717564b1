use serde::{Deserialize, Serialize};

use crate::model::{MapObject, RoadType, RoadWarning};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    BookmarkSave,
    BookmarkDelete,
    Back,
    RouteFrom,
    RouteTo,
    RouteAdd,
    RouteRemove,
    AvoidToll,
    AvoidUnpaved,
    AvoidFerry,
    PotholeDownload,
}

impl ButtonType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::BookmarkSave => "bookmark_save",
            Self::BookmarkDelete => "bookmark_delete",
            Self::Back => "back",
            Self::RouteFrom => "route_from",
            Self::RouteTo => "route_to",
            Self::RouteAdd => "route_add",
            Self::RouteRemove => "route_remove",
            Self::AvoidToll => "avoid_toll",
            Self::AvoidUnpaved => "avoid_unpaved",
            Self::AvoidFerry => "avoid_ferry",
            Self::PotholeDownload => "pothole_download",
        }
    }

    pub const fn avoided_road(self) -> Option<RoadType> {
        match self {
            Self::AvoidToll => Some(RoadType::Toll),
            Self::AvoidUnpaved => Some(RoadType::Dirty),
            Self::AvoidFerry => Some(RoadType::Ferry),
            _ => None,
        }
    }
}

/// Everything besides the object itself that decides the button bar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonContext {
    pub show_back: bool,
    pub show_routing: bool,
    pub planning: bool,
    pub route_point: bool,
    pub stop_point_allowed: bool,
    pub pick_point_mode: bool,
}

impl ButtonContext {
    fn routing_active(&self) -> bool {
        self.planning || self.show_routing
    }
}

/// # Panics
///
/// Panics on a road warning the panel has no button for: the engine data model and the
/// button policy disagree and there is nothing sensible to show.
fn road_warning_button(warning: RoadWarning) -> ButtonType {
    match warning {
        RoadWarning::Dirty => ButtonType::AvoidUnpaved,
        RoadWarning::Ferry => ButtonType::AvoidFerry,
        RoadWarning::Toll => ButtonType::AvoidToll,
        RoadWarning::None | RoadWarning::Unknown(_) => {
            panic!("unsupported road warning type: {warning:?}")
        }
    }
}

fn bookmark_button(object: &MapObject) -> ButtonType {
    if object.is_bookmark {
        ButtonType::BookmarkDelete
    } else {
        ButtonType::BookmarkSave
    }
}

/// Ordered button bar for `object`.
pub fn compose(object: &MapObject, ctx: &ButtonContext) -> Vec<ButtonType> {
    if object.road_warning != RoadWarning::None {
        return vec![road_warning_button(object.road_warning)];
    }
    if ctx.route_point {
        return vec![ButtonType::RouteRemove];
    }

    let routing = ctx.routing_active();
    let mut buttons = Vec::with_capacity(6);

    if ctx.show_back || ctx.pick_point_mode {
        buttons.push(ButtonType::Back);
    }
    if routing {
        buttons.push(ButtonType::RouteFrom);
    }
    // Adding a stop takes the bookmark slot; the bookmark moves to the end.
    if routing && ctx.stop_point_allowed {
        buttons.push(ButtonType::RouteAdd);
    } else {
        buttons.push(bookmark_button(object));
    }
    buttons.push(ButtonType::PotholeDownload);
    if routing {
        buttons.push(ButtonType::RouteTo);
        if ctx.stop_point_allowed {
            buttons.push(bookmark_button(object));
        }
    }
    buttons
}

/// Splits `buttons` into the visible bar and the overflow menu.
///
/// With more than `max_visible` buttons, the last visible slot becomes the "more" entry, so
/// everything from `max_visible - 1` on moves to the menu.
pub fn split_overflow(
    buttons: &[ButtonType],
    max_visible: usize,
) -> (Vec<ButtonType>, Option<Vec<ButtonType>>) {
    let max_visible = max_visible.max(1);
    if buttons.len() <= max_visible {
        return (buttons.to_vec(), None);
    }
    let (visible, overflow) = buttons.split_at(max_visible - 1);
    (visible.to_vec(), Some(overflow.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureId, LatLon};
    use super::ButtonType::*;

    fn object() -> MapObject {
        MapObject::new(FeatureId::new("poi"), LatLon::new(48.85, 2.35), "Bakery")
    }

    fn routing_ctx(stop_point_allowed: bool) -> ButtonContext {
        ButtonContext {
            show_routing: true,
            stop_point_allowed,
            ..ButtonContext::default()
        }
    }

    #[test]
    fn ferry_warning_wins_over_everything() {
        let mut obj = object();
        obj.road_warning = RoadWarning::Ferry;
        obj.is_bookmark = true;
        let ctx = ButtonContext {
            show_back: true,
            show_routing: true,
            planning: true,
            route_point: true,
            stop_point_allowed: true,
            pick_point_mode: true,
        };
        assert_eq!(compose(&obj, &ctx), vec![AvoidFerry]);
    }

    #[test]
    fn other_warnings_map_to_their_buttons() {
        let mut obj = object();
        obj.road_warning = RoadWarning::Dirty;
        assert_eq!(compose(&obj, &ButtonContext::default()), vec![AvoidUnpaved]);
        obj.road_warning = RoadWarning::Toll;
        assert_eq!(compose(&obj, &ButtonContext::default()), vec![AvoidToll]);
    }

    #[test]
    #[should_panic(expected = "unsupported road warning type")]
    fn unknown_warning_is_fatal() {
        let mut obj = object();
        obj.road_warning = RoadWarning::Unknown(9);
        compose(&obj, &ButtonContext::default());
    }

    #[test]
    fn route_point_only_offers_removal() {
        let ctx = ButtonContext {
            route_point: true,
            ..routing_ctx(true)
        };
        assert_eq!(compose(&object(), &ctx), vec![RouteRemove]);
    }

    #[test]
    fn routing_with_stops_moves_bookmark_to_the_end() {
        assert_eq!(
            compose(&object(), &routing_ctx(true)),
            vec![RouteFrom, RouteAdd, PotholeDownload, RouteTo, BookmarkSave]
        );
    }

    #[test]
    fn routing_without_stops_keeps_bookmark_in_place() {
        let mut obj = object();
        obj.is_bookmark = true;
        assert_eq!(
            compose(&obj, &routing_ctx(false)),
            vec![RouteFrom, BookmarkDelete, PotholeDownload, RouteTo]
        );
    }

    #[test]
    fn plain_object_gets_bookmark_and_marker_download() {
        assert_eq!(
            compose(&object(), &ButtonContext::default()),
            vec![BookmarkSave, PotholeDownload]
        );
    }

    #[test]
    fn pick_point_mode_adds_back() {
        let ctx = ButtonContext {
            pick_point_mode: true,
            ..ButtonContext::default()
        };
        assert_eq!(compose(&object(), &ctx), vec![Back, BookmarkSave, PotholeDownload]);
    }

    #[test]
    fn overflow_starts_at_last_visible_slot() {
        let buttons = [RouteFrom, RouteAdd, PotholeDownload, RouteTo, BookmarkSave];
        let (visible, overflow) = split_overflow(&buttons, 4);
        assert_eq!(visible, vec![RouteFrom, RouteAdd, PotholeDownload]);
        assert_eq!(overflow, Some(vec![RouteTo, BookmarkSave]));
    }

    #[test]
    fn no_overflow_when_everything_fits() {
        let buttons = [BookmarkSave, PotholeDownload];
        let (visible, overflow) = split_overflow(&buttons, 2);
        assert_eq!(visible.len(), 2);
        assert_eq!(overflow, None);
    }

    #[test]
    fn single_slot_sends_everything_to_the_menu() {
        let buttons = [BookmarkSave, PotholeDownload];
        let (visible, overflow) = split_overflow(&buttons, 1);
        assert!(visible.is_empty());
        assert_eq!(overflow, Some(vec![BookmarkSave, PotholeDownload]));
    }
}
