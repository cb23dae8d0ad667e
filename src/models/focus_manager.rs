use super::{Client, ClientHandle};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Remembers which client held focus, newest first. A `None` entry records
/// that focus deliberately went to nothing.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FocusManager {
    pub history: VecDeque<Option<ClientHandle>>,
}

impl FocusManager {
    /// The currently focused client handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<ClientHandle> {
        self.history.front().copied().flatten()
    }

    /// Resolve the focused handle against the live registry.
    #[must_use]
    pub fn client<'a>(&self, clients: &'a [Client]) -> Option<&'a Client> {
        let handle = self.handle()?;
        clients.iter().find(|c| c.handle == handle)
    }

    pub fn client_mut<'a>(&self, clients: &'a mut [Client]) -> Option<&'a mut Client> {
        let handle = self.handle()?;
        clients.iter_mut().find(|c| c.handle == handle)
    }

    /// No new history entry when focus did not change.
    pub(crate) fn record(&mut self, handle: Option<ClientHandle>) {
        if self.history.front() == Some(&handle) {
            return;
        }
        self.history.truncate(10);
        self.history.push_front(handle);
    }

    /// Purge a departing client from the history entirely.
    pub(crate) fn forget(&mut self, handle: ClientHandle) {
        self.history.retain(|h| *h != Some(handle));
    }
}
