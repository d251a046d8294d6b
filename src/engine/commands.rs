use serde::{Deserialize, Serialize};

use crate::game::{Card, DrawResult};

pub use crate::game::{PileRef, RejectReason};

/// Everything the presentation layer can ask the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCommand {
    DrawFromStock,
    FlipTopTableauCard {
        pile: usize,
    },
    ClickTableauCard {
        pile: usize,
        card_index: usize,
    },
    AutoMoveToFoundation {
        source: PileRef,
        card_index: Option<usize>,
    },
    Move {
        card: Card,
        from: PileRef,
        to: PileRef,
    },
    Tick,
}

/// What the call that produced a snapshot did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Applied,
    Drew(DrawResult),
    Rejected(RejectReason),
    NoOp,
}

impl MoveOutcome {
    pub const fn from_draw(result: DrawResult) -> Self {
        match result {
            DrawResult::NoOp => Self::NoOp,
            other => Self::Drew(other),
        }
    }

    pub fn changed(self) -> bool {
        matches!(self, Self::Applied | Self::Drew(_))
    }

    pub fn rejection(self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}
