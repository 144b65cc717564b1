use tracing::debug;

use crate::model::MapObject;
use crate::sheet::SheetState;

/// Holder of the selected object. The only writer of the current object.
#[derive(Debug, Default)]
pub struct SelectionObserver {
    current: Option<MapObject>,
    previous: Option<MapObject>,
    /// Set on selection, consumed by the next content measurement.
    should_collapse: bool,
}

impl SelectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&MapObject> {
        self.current.as_ref()
    }

    pub fn should_collapse(&self) -> bool {
        self.should_collapse
    }

    /// Records a newly selected object. Only a hidden sheet or a different object collapses.
    pub fn select(&mut self, object: MapObject, state: SheetState) -> bool {
        let collapse = state.is_hidden() || !MapObject::same(self.previous.as_ref(), Some(&object));
        debug!(feature = %object.feature_id, collapse, "object selected");
        self.should_collapse = collapse;
        self.previous = Some(object.clone());
        self.current = Some(object);
        collapse
    }

    /// Returns the pending collapse decision and resets it.
    pub fn take_should_collapse(&mut self) -> bool {
        std::mem::take(&mut self.should_collapse)
    }

    /// Hidden teardown only.
    pub fn clear(&mut self) -> Option<MapObject> {
        self.current.take()
    }
}
