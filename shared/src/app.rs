use tracing::{debug, info, trace, warn};

use crate::buttons::{self, ButtonContext, ButtonType};
use crate::capabilities::{BookmarkCategory, BookmarkInfo, Capabilities};
use crate::event::Event;
use crate::geometry::{self, ContentMetrics, HeightBounds};
use crate::markers::{self, Marker, MarkerEndpoints, MarkerError, POTHOLE_CATEGORY};
use crate::model::{LatLon, MapObject, Model, ToastKind, ViewModel};
use crate::sheet::{self, SheetEffect, SheetRequest, SheetState};
use crate::AppError;

#[derive(Default)]
pub struct App;

impl App {
    fn apply_request(request: SheetRequest, model: &mut Model, caps: &Capabilities) {
        let transition = sheet::transition(model.sheet_state, request);
        if transition.next != model.sheet_state {
            debug!(
                from = model.sheet_state.name(),
                to = transition.next.name(),
                "sheet state changed"
            );
        }
        model.sheet_state = transition.next;
        for effect in transition.effects {
            Self::run_effect(effect, model, caps);
        }
    }

    fn run_effect(effect: SheetEffect, model: &mut Model, caps: &Capabilities) {
        match effect {
            SheetEffect::RequestState(state) => caps.sheet.set_state(state),
            SheetEffect::ResetScroll => caps.sheet.reset_scroll(),
            SheetEffect::CancelAnimation => {
                if let Some(session) = model.animator.cancel() {
                    debug!(session = session.id, "peek animation cancelled");
                }
            }
            SheetEffect::FinishAnimation => {
                if let Some(session) = model.animator.cancel() {
                    debug!(session = session.id, "peek animation finished early");
                    if !model.sheet_state.is_hidden() {
                        Self::apply_settled_geometry(model, caps);
                    }
                }
            }
            SheetEffect::DisableInteractions => {
                model.interactions_enabled = false;
                caps.sheet.set_interactions(false);
            }
            SheetEffect::PublishDistance(distance) => model.distance_to_top = distance,
            SheetEffect::RecomputeViewport => Self::update_map_viewport(model, caps),
            SheetEffect::ApplyPendingGeometry => {
                if model.geometry_pending && !model.animator.is_running() {
                    Self::apply_settled_geometry(model, caps);
                }
            }
            SheetEffect::Teardown => Self::teardown(model, caps),
        }
    }

    fn apply_settled_geometry(model: &mut Model, caps: &Capabilities) {
        let Some(geometry) = model.geometry else {
            return;
        };
        debug!(
            peek = geometry.peek_height,
            min = geometry.bounds.min,
            max = geometry.bounds.max,
            "applying sheet geometry"
        );
        caps.sheet.set_peek_height(geometry.peek_height);
        caps.sheet.set_height_bounds(geometry.bounds);
        model.applied_min_height = geometry.bounds.min;
        model.geometry_pending = false;
    }

    fn update_map_viewport(model: &Model, caps: &Capabilities) {
        let Some(viewport) = model.viewport else {
            return;
        };
        match geometry::map_visible_rect(
            &viewport,
            model.distance_to_top,
            model.config.viewport_min_height,
        ) {
            Some(rect) => caps.sheet.set_map_viewport(rect),
            None => trace!(
                distance = model.distance_to_top,
                "sheet covers too much of the map, viewport kept"
            ),
        }
    }

    fn teardown(model: &mut Model, caps: &Capabilities) {
        model.animator.cancel();
        if let Some(object) = model.selection.clear() {
            debug!(feature = %object.feature_id, "place page torn down");
        }
        model.buttons.clear();
        model.geometry = None;
        model.content = ContentMetrics::default();
        if let Some(viewport) = model.viewport {
            caps.sheet.set_height_bounds(HeightBounds::reset(&viewport));
        }
        model.applied_min_height = 0;
        model.geometry_pending = false;
        model.open_pending = false;
        caps.sheet.detach_content();
        caps.sheet.deactivate_selection();
    }

    fn close(model: &mut Model, caps: &Capabilities) {
        Self::apply_request(SheetRequest::Close, model, caps);
    }

    /// Recomputes geometry for the current object. It is written right away only when the
    /// sheet rests and no animation is going to write it.
    fn refresh_geometry(model: &mut Model, caps: &Capabilities) {
        if model.sheet_state.is_hidden() {
            return;
        }
        let Some(viewport) = model.viewport else {
            return;
        };
        let Some(object) = model.selection.current() else {
            return;
        };
        let geometry = geometry::compute_geometry(
            Some(object),
            &viewport,
            &model.content,
            model.config.buttons_height,
            model.routing.planning,
            model.config.routing_header_height,
        );
        model.geometry = Some(geometry);
        if !model.sheet_state.is_stable() {
            trace!(state = model.sheet_state.name(), "sheet moving, geometry deferred");
            model.geometry_pending = true;
        } else if !model.animator.is_running() {
            Self::apply_settled_geometry(model, caps);
        }
    }

    fn recompose_buttons(model: &mut Model) {
        model.buttons = match model.selection.current() {
            Some(object) => {
                let ctx = ButtonContext {
                    show_back: object.is_api_point(),
                    show_routing: !object.is_my_position,
                    planning: model.routing.planning,
                    route_point: model.routing.is_route_point(object),
                    stop_point_allowed: model.routing.stop_point_allowed,
                    pick_point_mode: model.pick_point_mode,
                };
                buttons::compose(object, &ctx)
            }
            None => Vec::new(),
        };
    }

    fn on_selection(object: Option<MapObject>, model: &mut Model, caps: &Capabilities) {
        let Some(object) = object else {
            Self::close(model, caps);
            return;
        };
        model.interactions_enabled = true;
        caps.sheet.set_interactions(true);
        model.selection.select(object, model.sheet_state);
        caps.sheet.attach_content();
        Self::recompose_buttons(model);
    }

    fn on_content_measured(
        preview_height: i32,
        frame_height: i32,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        // Metrics are committed before anything derived from them is written.
        model.content = ContentMetrics {
            preview_height,
            frame_height,
        };
        model.geometry = None;

        if !model.interactions_enabled {
            trace!("content measured while closing, ignored");
            return;
        }
        let Some(viewport) = model.viewport else {
            debug!("content measured before the viewport is known, open deferred");
            model.open_pending = true;
            return;
        };
        let Some(object) = model.selection.current() else {
            return;
        };
        model.open_pending = false;
        model.geometry_pending = false;

        let geometry = geometry::compute_geometry(
            Some(object),
            &viewport,
            &model.content,
            model.config.buttons_height,
            model.routing.planning,
            model.config.routing_header_height,
        );
        model.geometry = Some(geometry);

        let collapse = model.selection.take_should_collapse();
        let state = model.sheet_state;
        let snap = state.is_hidden() || (state == SheetState::Expanded && !collapse);

        if geometry::needs_min_height_boost(frame_height, geometry.peek_height) {
            caps.sheet.set_min_height(geometry.bounds.min);
            model.applied_min_height = geometry.bounds.min;
        }

        if snap {
            model.animator.cancel();
            Self::apply_settled_geometry(model, caps);
        } else {
            let start = geometry::animation_start_height(&viewport, model.distance_to_top);
            let session = model.animator.start(
                start,
                geometry.peek_height,
                viewport.insets.bottom,
                viewport.parent_height,
                model.config.peek_animation_ms,
            );
            caps.sheet
                .request_frame(session, move |now_ms| Event::AnimationFrame { session, now_ms });
        }

        Self::apply_request(SheetRequest::Open { collapse }, model, caps);
    }

    fn on_animation_frame(session: u64, now_ms: u64, model: &mut Model, caps: &Capabilities) {
        let Some(frame) = model.animator.tick(session, now_ms) else {
            trace!(session, "stale animation frame dropped");
            return;
        };

        caps.sheet.set_peek_height(frame.peek_height);
        caps.sheet.set_height_bounds(HeightBounds {
            min: model.applied_min_height.min(frame.max_height),
            max: frame.max_height,
        });
        model.distance_to_top = frame.distance_to_top;

        if frame.finished {
            debug!(session, peek = frame.peek_height, "peek animation finished");
            Self::apply_settled_geometry(model, caps);
            Self::update_map_viewport(model, caps);
        } else {
            caps.sheet
                .request_frame(session, move |now_ms| Event::AnimationFrame { session, now_ms });
        }
    }

    fn on_button(button: ButtonType, model: &mut Model, caps: &Capabilities) {
        let Some(object) = model.current().cloned() else {
            debug!(button = button.name(), "button ignored, no object selected");
            return;
        };
        info!(button = button.name(), feature = %object.feature_id, "button clicked");
        let at = object.location;

        match button {
            ButtonType::BookmarkSave => caps.bookmarks.add_bookmark(at),
            ButtonType::BookmarkDelete => {
                if markers::is_marker_title(&object.title) {
                    caps.bookmarks.list_category_bookmarks(POTHOLE_CATEGORY, move |bookmarks| {
                        Event::MarkerBookmarksListed {
                            target: at,
                            bookmarks,
                        }
                    });
                } else {
                    caps.bookmarks.delete_from_map_object();
                }
            }
            ButtonType::Back => {
                if model.pick_point_mode {
                    caps.navigator.return_picked_point(at, object.title, object.api_id);
                }
                caps.navigator.finish();
            }
            ButtonType::RouteFrom => {
                if model.routing.planning {
                    caps.routing
                        .set_start_point(at, |accepted| Event::StartPointSet { accepted });
                } else {
                    caps.routing.prepare(at);
                    Self::close(model, caps);
                }
            }
            ButtonType::RouteTo => {
                if model.routing.planning {
                    caps.routing.set_end_point(at);
                    Self::close(model, caps);
                } else {
                    caps.routing.build_from_my_position(at);
                }
            }
            ButtonType::RouteAdd => caps.routing.add_stop(at),
            ButtonType::RouteRemove => caps.routing.remove_stop(at),
            ButtonType::AvoidToll | ButtonType::AvoidUnpaved | ButtonType::AvoidFerry => {
                if let Some(road) = button.avoided_road() {
                    caps.routing.toggle_route_settings(road);
                }
            }
            ButtonType::PotholeDownload => caps.bookmarks.list_categories(Event::CategoriesListed),
        }
    }

    fn report_marker_error(error: MarkerError, model: &mut Model) {
        let error = AppError::from(error);
        warn!(code = error.code(), error = %error, "marker request failed");
        model.show_toast(error.user_facing_message(), ToastKind::Error);
    }

    fn on_categories_listed(categories: &[BookmarkCategory], model: &mut Model, caps: &Capabilities) {
        if categories.iter().any(|c| c.name == POTHOLE_CATEGORY) {
            info!("marker category already present, download skipped");
            model.show_toast(markers::ALREADY_DOWNLOADED_TOAST, ToastKind::Info);
            return;
        }
        let url = MarkerEndpoints::from_config(&model.config).and_then(|e| e.list_url());
        match url {
            Ok(url) => {
                debug!(%url, "downloading markers");
                caps.http
                    .get(url.as_str())
                    .send(|result| Event::MarkersFetched(markers::from_response(result)));
            }
            Err(e) => Self::report_marker_error(e, model),
        }
    }

    fn on_markers_fetched(
        result: Result<Vec<Marker>, MarkerError>,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        match result {
            Ok(markers) => {
                caps.bookmarks.create_category(POTHOLE_CATEGORY);
                for marker in &markers {
                    caps.bookmarks
                        .add_marker_bookmark(POTHOLE_CATEGORY, marker.location(), marker.id.clone());
                }
                info!(count = markers.len(), "markers downloaded");
                model.show_toast(markers::DOWNLOADED_TOAST, ToastKind::Success);
            }
            Err(e) => Self::report_marker_error(e, model),
        }
    }

    fn on_marker_bookmarks_listed(
        target: LatLon,
        bookmarks: &[BookmarkInfo],
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let remote_id = markers::find_bookmark(bookmarks, target).and_then(|b| b.remote_id.as_deref());
        let Some(remote_id) = remote_id else {
            warn!(lat = target.lat, lon = target.lon, "no marker bookmark at location");
            model.show_toast(markers::FAILURE_TOAST, ToastKind::Error);
            return;
        };
        let url = MarkerEndpoints::from_config(&model.config).and_then(|e| e.delete_url(remote_id));
        match url {
            Ok(url) => {
                info!(remote_id, "deleting marker");
                caps.bookmarks.delete_from_map_object();
                caps.http
                    .delete(url.as_str())
                    .send(|result| Event::MarkerDeleted(markers::delete_result(result)));
            }
            Err(e) => Self::report_marker_error(e, model),
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let event_name = event.name();
        if event.is_high_frequency() {
            trace!(event = event_name, "update");
        } else {
            debug!(event = event_name, "update");
        }
        if event.is_user_initiated() {
            info!(event = event_name, "user action");
        }

        match event {
            Event::Configure(config) => match config.validate() {
                Ok(()) => {
                    model.config = config;
                    Self::refresh_geometry(model, caps);
                }
                Err(e) => {
                    let error = AppError::from(e);
                    warn!(code = error.code(), error = %error, "configuration rejected");
                }
            },

            Event::ViewportChanged(viewport) => {
                model.viewport = Some(viewport);
                if model.open_pending {
                    let content = model.content;
                    Self::on_content_measured(
                        content.preview_height,
                        content.frame_height,
                        model,
                        caps,
                    );
                } else {
                    Self::refresh_geometry(model, caps);
                }
            }

            Event::ContentMeasured {
                preview_height,
                frame_height,
            } => Self::on_content_measured(preview_height, frame_height, model, caps),

            Event::Resumed { has_place_info } => {
                if !model.sheet_state.is_hidden() && !has_place_info {
                    Self::on_selection(None, model, caps);
                }
            }

            Event::SelectionChanged(object) => Self::on_selection(object, model, caps),

            Event::RoutingChanged(status) => {
                let planning_changed = status.planning != model.routing.planning;
                model.routing = status;
                Self::recompose_buttons(model);
                if planning_changed {
                    Self::refresh_geometry(model, caps);
                }
            }

            Event::PickPointModeChanged { active } => {
                model.pick_point_mode = active;
                Self::recompose_buttons(model);
            }

            Event::SheetSlid { distance_to_top } => {
                Self::apply_request(SheetRequest::Slide { distance_to_top }, model, caps);
            }

            Event::SheetSettled(state) => {
                Self::apply_request(SheetRequest::Settle(state), model, caps);
            }

            Event::AnimationFrame { session, now_ms } => {
                Self::on_animation_frame(session, now_ms, model, caps);
            }

            Event::ToggleRequested => {
                if model.current().is_none() {
                    debug!("toggle ignored, no object selected");
                    return;
                }
                Self::apply_request(SheetRequest::Toggle, model, caps);
            }

            Event::CloseRequested => Self::close(model, caps),

            Event::ButtonClicked(button) => Self::on_button(button, model, caps),

            Event::DismissToast => model.clear_toast(),

            Event::StartPointSet { accepted } => {
                if accepted {
                    Self::close(model, caps);
                }
            }

            Event::CategoriesListed(categories) => {
                Self::on_categories_listed(&categories, model, caps);
            }

            Event::MarkersFetched(result) => Self::on_markers_fetched(result, model, caps),

            Event::MarkerBookmarksListed { target, bookmarks } => {
                Self::on_marker_bookmarks_listed(target, &bookmarks, model, caps);
            }

            Event::MarkerDeleted(Ok(())) => {
                info!("marker deleted");
                model.show_toast(markers::REMOVED_TOAST, ToastKind::Success);
            }
            Event::MarkerDeleted(Err(e)) => Self::report_marker_error(e, model),
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        let (buttons, overflow) = buttons::split_overflow(&model.buttons, model.config.max_buttons);
        ViewModel {
            sheet_state: model.sheet_state,
            title: model.current().map(|o| o.title.clone()),
            buttons,
            overflow,
            distance_to_top: model.distance_to_top,
            panel_width: model.viewport.map_or(0, |v| v.panel_width),
            interactions_enabled: model.interactions_enabled,
            toast: model.active_toast.clone(),
        }
    }
}
