use crate::display_action::DisplayAction;
use crate::models::{ClientHandle, TagMask};
use crate::state::State;
use crate::utils::helpers;

impl State {
    /// Focus a client. An invisible or missing candidate falls back to the
    /// current focus if still visible, else the first visible client in
    /// registry order, else nothing. Always redraws the bar.
    pub fn focus_client(&mut self, candidate: Option<ClientHandle>) {
        let target = candidate
            .filter(|h| self.is_visible(*h))
            .or_else(|| self.focus_manager.handle().filter(|h| self.is_visible(*h)))
            .or_else(|| {
                self.clients
                    .iter()
                    .find(|c| c.visible_on(self.tagset))
                    .map(|c| c.handle)
            });
        let previous = self.focus_manager.handle();
        if previous != target {
            if let Some(prev) = previous {
                if self.client(prev).is_some() {
                    // Catch the click-to-raise that may be coming.
                    self.actions
                        .push_back(DisplayAction::GrabClickToRaise(prev));
                }
            }
        }
        match target {
            Some(handle) => {
                if self.client(handle).map_or(false, |c| c.urgent) {
                    if let Some(client) = self.client_mut(handle) {
                        client.urgent = false;
                    }
                    self.actions
                        .push_back(DisplayAction::SetUrgentHint(handle, false));
                }
                self.actions.push_back(DisplayAction::FocusClient {
                    handle,
                    previous,
                    take_input: !self.bar_focused,
                });
            }
            None => self.actions.push_back(DisplayAction::Unfocus { previous }),
        }
        self.focus_manager.record(target);
        self.actions.push_back(DisplayAction::RefreshBar);
    }

    fn is_visible(&self, handle: ClientHandle) -> bool {
        self.client(handle)
            .map_or(false, |c| c.visible_on(self.tagset))
    }

    /// Move focus to the next or previous visible client in registry order,
    /// wrapping at both ends. No-op without a focused client.
    pub fn focus_stack(&mut self, delta: i32) -> bool {
        let Some(current) = self.focus_manager.handle() else {
            return false;
        };
        let visible: Vec<ClientHandle> = self
            .clients
            .iter()
            .filter(|c| c.visible_on(self.tagset))
            .map(|c| c.handle)
            .collect();
        let Some(&next) = helpers::cyclic_find(&visible, |h| *h == current, delta) else {
            return false;
        };
        if next == current {
            return false;
        }
        self.focus_client(Some(next));
        self.raise(Some(next));
        true
    }

    /// Replace the active view. An empty mask would hide everything with no
    /// way to point at it, so it is rejected.
    pub fn view(&mut self, mask: TagMask) -> bool {
        let mask = mask.masked(self.tag_labels.len());
        if mask.is_empty() {
            return false;
        }
        self.tagset = mask;
        self.arrange();
        true
    }

    /// XOR tags in and out of the active view, allowing combined views.
    pub fn toggle_view(&mut self, mask: TagMask) -> bool {
        let next = self.tagset.toggled(mask.masked(self.tag_labels.len()));
        if next.is_empty() {
            return false;
        }
        self.tagset = next;
        self.arrange();
        true
    }

    /// Rotate the active view through the tag ring.
    pub fn shift_view(&mut self, delta: i32) -> bool {
        self.tagset = self.tagset.shifted(delta, self.tag_labels.len());
        self.arrange();
        true
    }

    /// Retag the focused client. Clients must always carry a tag.
    pub fn tag_focused(&mut self, mask: TagMask) -> bool {
        let mask = mask.masked(self.tag_labels.len());
        if mask.is_empty() {
            return false;
        }
        let Some(client) = self.focus_manager.client_mut(&mut self.clients) else {
            return false;
        };
        client.tags = mask;
        self.arrange();
        true
    }

    pub fn toggle_tag_focused(&mut self, mask: TagMask) -> bool {
        let mask = mask.masked(self.tag_labels.len());
        let Some(client) = self.focus_manager.client_mut(&mut self.clients) else {
            return false;
        };
        let next = client.tags.toggled(mask);
        if next.is_empty() {
            return false;
        }
        client.tags = next;
        self.arrange();
        true
    }

    /// Rotate the view and carry the focused client along to the adjacent
    /// workspace.
    pub fn shift_view_with_client(&mut self, delta: i32) -> bool {
        let count = self.tag_labels.len();
        if let Some(client) = self.focus_manager.client_mut(&mut self.clients) {
            client.tags = client.tags.shifted(delta, count);
        }
        self.shift_view(delta)
    }
}
