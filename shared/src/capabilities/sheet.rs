//! Host layout of the bottom sheet.
//!
//! The shell owns the real sheet widget. The core only tells it what to apply; the widget
//! reports back through `Event::SheetSlid` and `Event::SheetSettled`.

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::geometry::{HeightBounds, VisibleRect};
use crate::sheet::SheetState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SheetOperation {
    SetState(SheetState),
    SetPeekHeight(i32),
    SetMinHeight(i32),
    SetHeightBounds(HeightBounds),
    SetInteractions { enabled: bool },
    ResetScroll,
    AttachContent,
    DetachContent,
    /// Drop the highlight of the selected object on the map.
    DeactivateSelection,
    SetMapViewport(VisibleRect),
    RequestFrame { session: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SheetOutput {
    Applied,
    Frame { now_ms: u64 },
}

impl Operation for SheetOperation {
    type Output = SheetOutput;
}

#[derive(crux_core::macros::Capability)]
pub struct Sheet<Ev> {
    context: CapabilityContext<SheetOperation, Ev>,
}

impl<Ev> Sheet<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<SheetOperation, Ev>) -> Self {
        Self { context }
    }

    fn notify(&self, operation: SheetOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }

    pub fn set_state(&self, state: SheetState) {
        self.notify(SheetOperation::SetState(state));
    }

    pub fn set_peek_height(&self, height: i32) {
        self.notify(SheetOperation::SetPeekHeight(height));
    }

    pub fn set_min_height(&self, height: i32) {
        self.notify(SheetOperation::SetMinHeight(height));
    }

    pub fn set_height_bounds(&self, bounds: HeightBounds) {
        self.notify(SheetOperation::SetHeightBounds(bounds));
    }

    pub fn set_interactions(&self, enabled: bool) {
        self.notify(SheetOperation::SetInteractions { enabled });
    }

    pub fn reset_scroll(&self) {
        self.notify(SheetOperation::ResetScroll);
    }

    pub fn attach_content(&self) {
        self.notify(SheetOperation::AttachContent);
    }

    pub fn detach_content(&self) {
        self.notify(SheetOperation::DetachContent);
    }

    pub fn deactivate_selection(&self) {
        self.notify(SheetOperation::DeactivateSelection);
    }

    pub fn set_map_viewport(&self, rect: VisibleRect) {
        self.notify(SheetOperation::SetMapViewport(rect));
    }

    /// Asks for the next display frame of `session`. The shell answers with its frame clock.
    pub fn request_frame<F>(&self, session: u64, callback: F)
    where
        F: FnOnce(u64) -> Ev + Send + 'static,
        Ev: Send,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let now_ms = match ctx.request_from_shell(SheetOperation::RequestFrame { session }).await {
                SheetOutput::Frame { now_ms } => now_ms,
                SheetOutput::Applied => {
                    tracing::warn!(session, "shell answered a frame request without a clock");
                    return;
                }
            };
            ctx.update_app(callback(now_ms));
        });
    }
}
