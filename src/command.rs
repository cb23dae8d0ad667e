use crate::models::TagMask;
use serde::{Deserialize, Serialize};

/// Which drag semantics a binding starts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize,
}

/// The action surface reachable from bindings and external senders.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Command {
    /// Replace the active view with the given tag mask.
    ViewTags(TagMask),
    /// Toggle tags in and out of the active view.
    ToggleViewTags(TagMask),
    /// Retag the focused client.
    TagClient(TagMask),
    /// Toggle tags on the focused client.
    ToggleTagClient(TagMask),
    /// Rotate the active view by the given number of tags.
    ShiftView(i32),
    /// Rotate the view and carry the focused client along.
    ShiftViewWithClient(i32),
    /// Focus the next/previous visible client in registry order.
    FocusStack(i32),
    /// Cycle focus while a modifier is held; releasing the configured key
    /// zooms the landing client.
    RaiseStack(i32),
    Pin,
    Zoom,
    ToggleFloating,
    ToggleFullScreen,
    CloseWindow,
    StartDrag(DragKind),
    Quit,
}
