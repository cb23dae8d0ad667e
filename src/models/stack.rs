//! The stacking engine: two single-client markers layered over the
//! floating/tiled partition.
use super::{Client, ClientHandle};
use serde::{Deserialize, Serialize};

/// A slot in the computed front-to-back stacking order, top first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackEntry {
    Bar,
    Client(ClientHandle),
}

/// `pinned` stays on top until unpinned; `raised` is on top until another
/// client is raised or zoomed over it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StackMarkers {
    pub pinned: Option<ClientHandle>,
    pub raised: Option<ClientHandle>,
}

impl StackMarkers {
    /// Pin toggles: pinning the already pinned client unpins it.
    pub fn toggle_pin(&mut self, handle: ClientHandle) {
        self.pinned = if self.pinned == Some(handle) {
            None
        } else {
            Some(handle)
        };
    }

    pub fn raise(&mut self, handle: Option<ClientHandle>) {
        self.raised = handle;
    }

    /// Clear any marker referencing a client leaving the registry.
    pub fn forget(&mut self, handle: ClientHandle) {
        if self.pinned == Some(handle) {
            self.pinned = None;
        }
        if self.raised == Some(handle) {
            self.raised = None;
        }
    }
}

/// Compute the total front-to-back order. The bar rides above everything
/// while it holds the pointer-edge focus, otherwise it sits just under the
/// pinned/raised slots. Remaining clients keep registry order within the
/// floating layer, then the tiled layer.
#[must_use]
pub fn stacking_order(
    clients: &[Client],
    markers: StackMarkers,
    bar_focused: bool,
) -> Vec<StackEntry> {
    let mut order = Vec::with_capacity(clients.len() + 1);
    if bar_focused {
        order.push(StackEntry::Bar);
    }
    if let Some(pinned) = markers.pinned {
        order.push(StackEntry::Client(pinned));
    }
    if let Some(raised) = markers.raised {
        if markers.pinned != Some(raised) {
            order.push(StackEntry::Client(raised));
        }
    }
    if !bar_focused {
        order.push(StackEntry::Bar);
    }
    let in_markers =
        |c: &Client| markers.pinned == Some(c.handle) || markers.raised == Some(c.handle);
    for client in clients.iter().filter(|c| !in_markers(c) && c.floating()) {
        order.push(StackEntry::Client(client.handle));
    }
    for client in clients.iter().filter(|c| !in_markers(c) && !c.floating()) {
        order.push(StackEntry::Client(client.handle));
    }
    order
}
