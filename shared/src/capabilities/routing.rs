use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::{LatLon, RoadType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RoutingOperation {
    /// Opens route planning with `from` as the start.
    Prepare { from: LatLon },
    SetStartPoint { at: LatLon },
    SetEndPoint { at: LatLon },
    BuildFromMyPosition { to: LatLon },
    AddStop { at: LatLon },
    RemoveStop { at: LatLon },
    ToggleRouteSettings(RoadType),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoutingOutput {
    Done,
    /// Whether the router took the point.
    Accepted(bool),
}

impl Operation for RoutingOperation {
    type Output = RoutingOutput;
}

#[derive(crux_core::macros::Capability)]
pub struct Routing<Ev> {
    context: CapabilityContext<RoutingOperation, Ev>,
}

impl<Ev> Routing<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<RoutingOperation, Ev>) -> Self {
        Self { context }
    }

    fn notify(&self, operation: RoutingOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }

    pub fn prepare(&self, from: LatLon) {
        self.notify(RoutingOperation::Prepare { from });
    }

    pub fn set_start_point<F>(&self, at: LatLon, callback: F)
    where
        F: FnOnce(bool) -> Ev + Send + 'static,
        Ev: Send,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let accepted = matches!(
                ctx.request_from_shell(RoutingOperation::SetStartPoint { at }).await,
                RoutingOutput::Accepted(true)
            );
            ctx.update_app(callback(accepted));
        });
    }

    pub fn set_end_point(&self, at: LatLon) {
        self.notify(RoutingOperation::SetEndPoint { at });
    }

    pub fn build_from_my_position(&self, to: LatLon) {
        self.notify(RoutingOperation::BuildFromMyPosition { to });
    }

    pub fn add_stop(&self, at: LatLon) {
        self.notify(RoutingOperation::AddStop { at });
    }

    pub fn remove_stop(&self, at: LatLon) {
        self.notify(RoutingOperation::RemoveStop { at });
    }

    pub fn toggle_route_settings(&self, road: RoadType) {
        self.notify(RoutingOperation::ToggleRouteSettings(road));
    }
}
