use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::LatLon;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum NavigatorOperation {
    /// Hands the picked point back to the external caller.
    ReturnPickedPoint {
        at: LatLon,
        title: String,
        api_id: Option<String>,
    },
    Finish,
}

impl Operation for NavigatorOperation {
    type Output = ();
}

#[derive(crux_core::macros::Capability)]
pub struct Navigator<Ev> {
    context: CapabilityContext<NavigatorOperation, Ev>,
}

impl<Ev> Navigator<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<NavigatorOperation, Ev>) -> Self {
        Self { context }
    }

    fn notify(&self, operation: NavigatorOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }

    pub fn return_picked_point(&self, at: LatLon, title: String, api_id: Option<String>) {
        self.notify(NavigatorOperation::ReturnPickedPoint { at, title, api_id });
    }

    pub fn finish(&self) {
        self.notify(NavigatorOperation::Finish);
    }
}
