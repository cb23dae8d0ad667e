use super::ClientHandle;
use serde::{Deserialize, Serialize};

/// The pointer-session state machine. `Checking` holds a pointer grab while
/// the cursor hovers a border hot zone; the three drag states hold pointer
/// and keyboard grabs until every button and tracked key is released.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Checking(ClientHandle),
    Moving(ClientHandle),
    Resizing(ClientHandle),
    DraggingBoundary(ClientHandle),
}

impl Mode {
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Whether a committed drag is in progress (a pending `Checking` grab is
    /// not one yet).
    #[must_use]
    pub const fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::Moving(_) | Self::Resizing(_) | Self::DraggingBoundary(_)
        )
    }

    #[must_use]
    pub const fn client(&self) -> Option<ClientHandle> {
        match self {
            Self::Normal => None,
            Self::Checking(h) | Self::Moving(h) | Self::Resizing(h) | Self::DraggingBoundary(h) => {
                Some(*h)
            }
        }
    }
}

/// Pointer bookkeeping for the active drag session.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct DragTracker {
    /// Timestamp of the last motion sample that was applied.
    pub last_motion: u32,
    /// Pointer travel accumulated while a tiled client is dragged with move
    /// semantics, before it breaks out of the layout.
    pub travel_x: i32,
    pub travel_y: i32,
}
