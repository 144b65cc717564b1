//! Sheet state machine.
//!
//! `transition` is pure: it maps the current state and a request to the next state plus the
//! side effects the app has to carry out. The host toolkit stays authoritative for the real
//! position of the sheet and reports it back through `Slide` and `Settle`.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetState {
    #[default]
    Hidden,
    Collapsed,
    Expanded,
    Dragging,
    Settling,
}

impl SheetState {
    pub const fn is_stable(self) -> bool {
        matches!(self, Self::Hidden | Self::Collapsed | Self::Expanded)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SheetRequest {
    /// Content for an object is ready. `collapse` is false when the object did not change.
    Open { collapse: bool },
    Toggle,
    Close,
    Slide { distance_to_top: i32 },
    Settle(SheetState),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SheetEffect {
    /// Ask the toolkit to move the sheet.
    RequestState(SheetState),
    ResetScroll,
    /// Drop the running peek animation without writing anything.
    CancelAnimation,
    /// Stop the running peek animation and apply the settled bounds.
    FinishAnimation,
    DisableInteractions,
    PublishDistance(i32),
    /// Resize the visible map area to the space above the sheet.
    RecomputeViewport,
    /// Write geometry that was recomputed while the sheet was moving.
    ApplyPendingGeometry,
    /// Hidden reached: clear the object, reset bounds, release content.
    Teardown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: SheetState,
    pub effects: Vec<SheetEffect>,
}

impl Transition {
    fn stay(state: SheetState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }
}

pub fn transition(state: SheetState, request: SheetRequest) -> Transition {
    match request {
        SheetRequest::Open { collapse } => {
            let next = if state.is_hidden() || collapse {
                SheetState::Collapsed
            } else {
                state
            };
            let effects = if next == state {
                Vec::new()
            } else {
                vec![SheetEffect::RequestState(next), SheetEffect::ResetScroll]
            };
            Transition { next, effects }
        }
        SheetRequest::Toggle => {
            let next = if state == SheetState::Expanded {
                SheetState::Hidden
            } else {
                SheetState::Expanded
            };
            Transition {
                next,
                effects: vec![SheetEffect::FinishAnimation, SheetEffect::RequestState(next)],
            }
        }
        SheetRequest::Close => Transition {
            next: SheetState::Hidden,
            effects: vec![
                SheetEffect::CancelAnimation,
                SheetEffect::DisableInteractions,
                SheetEffect::RequestState(SheetState::Hidden),
            ],
        },
        SheetRequest::Slide { distance_to_top } => {
            let next = match state {
                SheetState::Collapsed | SheetState::Expanded => SheetState::Dragging,
                other => other,
            };
            Transition {
                next,
                effects: vec![
                    SheetEffect::FinishAnimation,
                    SheetEffect::PublishDistance(distance_to_top),
                ],
            }
        }
        // Transient reports only track the toolkit; nothing is recomputed until it rests.
        SheetRequest::Settle(reported) if !reported.is_stable() => Transition::stay(reported),
        SheetRequest::Settle(reported) => {
            let mut effects = vec![SheetEffect::RecomputeViewport];
            if reported.is_hidden() {
                effects.push(SheetEffect::Teardown);
            } else {
                effects.push(SheetEffect::ApplyPendingGeometry);
            }
            Transition {
                next: reported,
                effects,
            }
        }
    }
}
