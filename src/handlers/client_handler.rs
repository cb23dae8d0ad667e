use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_event::{ConfigureRequest, StateChange};
use crate::display_servers::DisplayServer;
use crate::models::{Client, ClientHandle, Geometry, Manager, Mode, SizeHints};
use crate::state::State;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Start managing a newly mapped window. A window we already know is
    /// left untouched. Returns true if changes need to be rendered.
    pub fn client_created_handler(&mut self, mut client: Client, x: i32, y: i32) -> bool {
        if self.state.client(client.handle).is_some() {
            return false;
        }
        let state = &mut self.state;
        client.tags = client
            .transient
            .and_then(|parent| state.client(parent))
            .map(|parent| parent.tags)
            .filter(|tags| !tags.is_empty())
            .unwrap_or(state.tagset);
        client.set_floating(true);
        client.border = state.border_width;
        place_on_pointer_monitor(state, &mut client, (x, y));
        let handle = client.handle;
        state.clients.insert(0, client);

        let (geometry, border) = {
            let c = &state.clients[0];
            (c.geometry, c.border)
        };
        state.actions.push_back(DisplayAction::ConfigureClient {
            handle,
            geometry,
            border,
        });
        state
            .actions
            .push_back(DisplayAction::SendConfigureNotify(handle));
        state.actions.push_back(DisplayAction::SetClientList(
            state.clients.iter().map(|c| c.handle).collect(),
        ));
        state.actions.push_back(DisplayAction::MapClient(handle));

        state.stack.raise(Some(handle));
        state.focus_client(Some(handle));
        state.arrange();
        true
    }

    pub fn client_destroyed_handler(&mut self, handle: &ClientHandle) -> bool {
        self.state.unmanage(*handle, true)
    }

    /// A synthetic unmap is a withdrawal notice; a real one ends management.
    pub fn client_unmapped_handler(&mut self, handle: &ClientHandle, synthetic: bool) -> bool {
        if synthetic {
            self.state
                .actions
                .push_back(DisplayAction::SetWithdrawn(*handle));
            return false;
        }
        self.state.unmanage(*handle, false)
    }
}

/// New clients land on the monitor holding the pointer, pulled fully inside
/// it and out from under the bar.
fn place_on_pointer_monitor(state: &State, client: &mut Client, pointer: (i32, i32)) {
    if state.monitors.is_empty() {
        return;
    }
    let monitor = state.monitor_at(pointer.0, pointer.1).unwrap_or(0);
    let area = state.monitors[monitor].geometry;
    let mut g = client.geometry;
    let outer_w = g.w + 2 * client.border;
    let outer_h = g.h + 2 * client.border;
    if g.x + outer_w > area.right() {
        g.x = area.right() - outer_w;
    }
    if g.y + outer_h > area.bottom() {
        g.y = area.bottom() - outer_h;
    }
    g.x = g.x.max(area.x);
    // Only push the window below a top bar when its center would cover it.
    let primary = state.monitors[0].geometry;
    let center_x = g.x + g.w / 2;
    let min_y = if state.bar.top && center_x >= primary.x && center_x < primary.right() {
        primary.y + state.bar.height
    } else {
        area.y
    };
    g.y = g.y.max(min_y);
    client.geometry = g;
    client.set_floating_geometry(g);
}

impl State {
    /// Remove a client from the registry, stacking markers and focus
    /// history. When the window still exists, its original border comes
    /// back and our grabs on it are released.
    pub fn unmanage(&mut self, handle: ClientHandle, destroyed: bool) -> bool {
        let Some(index) = self.clients.iter().position(|c| c.handle == handle) else {
            return false;
        };
        self.stack.forget(handle);
        self.focus_manager.forget(handle);
        let client = self.clients.remove(index);
        if self.mode.client() == Some(handle) {
            // The grab target is gone; drop the grabs with it.
            self.actions.push_back(DisplayAction::UngrabPointer);
            self.actions.push_back(DisplayAction::UngrabKeyboard);
            self.mode = Mode::Normal;
        }
        if !destroyed {
            self.actions.push_back(DisplayAction::UnmanageClient {
                handle,
                restore_border: Some(client.original_border),
            });
        }
        self.actions.push_back(DisplayAction::SetClientList(
            self.clients.iter().map(|c| c.handle).collect(),
        ));
        self.arrange();
        true
    }

    pub fn title_changed(&mut self, handle: ClientHandle, name: &str, time: u32) -> bool {
        let focused = self.focus_manager.handle() == Some(handle);
        let cooldown = self.title_cooldown_ms;
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        client.name = name.to_string();
        if client.settle_title(time, cooldown) && focused {
            self.actions.push_back(DisplayAction::RefreshBar);
            return true;
        }
        false
    }

    pub fn hints_changed(&mut self, handle: ClientHandle, hints: SizeHints) {
        if let Some(client) = self.client_mut(handle) {
            client.hints = hints.sanitized();
        }
    }

    pub fn urgency_changed(&mut self, handle: ClientHandle, urgent: bool) -> bool {
        if self.focus_manager.handle() == Some(handle) && urgent {
            // The focused client already has the user's attention; clear the
            // hint at the source instead of surfacing it.
            self.actions
                .push_back(DisplayAction::SetUrgentHint(handle, false));
            return false;
        }
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        client.urgent = urgent;
        self.actions.push_back(DisplayAction::RefreshBar);
        true
    }

    /// A late transient-for property pulls a tiled client out of the layout.
    pub fn transient_changed(&mut self, handle: ClientHandle, parent: Option<ClientHandle>) -> bool {
        let parent_managed = parent.map_or(false, |p| self.client(p).is_some());
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        client.transient = parent;
        if !client.floating() && parent_managed {
            client.set_floating(true);
            self.arrange();
            return true;
        }
        false
    }

    pub fn dialog_hint(&mut self, handle: ClientHandle) {
        if let Some(client) = self.client_mut(handle) {
            client.must_float = true;
        }
    }

    pub fn fullscreen_request(&mut self, handle: ClientHandle, change: StateChange) -> bool {
        let Some(client) = self.client(handle) else {
            return false;
        };
        let target = match change {
            StateChange::Set => true,
            StateChange::Clear => false,
            StateChange::Toggle => !client.fullscreen,
        };
        self.set_fullscreen(handle, target)
    }

    /// Activation requests on anything but the focused client mark it
    /// urgent rather than stealing focus.
    pub fn activation_request(&mut self, handle: ClientHandle) -> bool {
        if self.focus_manager.handle() == Some(handle) {
            return false;
        }
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        if client.urgent {
            return false;
        }
        client.urgent = true;
        self.actions
            .push_back(DisplayAction::SetUrgentHint(handle, true));
        self.actions.push_back(DisplayAction::RefreshBar);
        true
    }

    /// Fullscreen spans from the monitor under the client's top-left corner
    /// to the one under its bottom-right corner, collapsing to the first
    /// when the spread is degenerate. Leaving restores the remembered
    /// floating placement.
    pub fn set_fullscreen(&mut self, handle: ClientHandle, fullscreen: bool) -> bool {
        let Some(client) = self.client(handle) else {
            return false;
        };
        if client.fullscreen == fullscreen {
            return false;
        }
        if fullscreen {
            self.actions
                .push_back(DisplayAction::SetFullscreenState(handle, true));
            let Some(client) = self.client_mut(handle) else {
                return false;
            };
            client.enter_fullscreen();
            let g = client.geometry;
            let (outer_w, outer_h) = (client.outer_w(), client.outer_h());
            if !self.monitors.is_empty() {
                let first = self
                    .monitors
                    .iter()
                    .rposition(|m| m.contains_point(g.x, g.y))
                    .unwrap_or(0);
                let first_geo = self.monitors[first].geometry;
                let second_geo = self
                    .monitor_at(g.x + outer_w, g.y + outer_h)
                    .map(|index| self.monitors[index].geometry)
                    .filter(|second| {
                        second.right() > first_geo.x && second.bottom() > first_geo.y
                    })
                    .unwrap_or(first_geo);
                let span = Geometry::new(
                    first_geo.x,
                    first_geo.y,
                    second_geo.x - first_geo.x + second_geo.w,
                    second_geo.y - first_geo.y + second_geo.h,
                );
                self.force_geometry(handle, span);
            }
            self.zoom(Some(handle));
        } else {
            self.actions
                .push_back(DisplayAction::SetFullscreenState(handle, false));
            let Some(client) = self.client_mut(handle) else {
                return false;
            };
            client.exit_fullscreen();
            let shadow = client.floating_geometry();
            self.resize_client(handle, shadow.x, shadow.y, shadow.w, shadow.h);
        }
        self.arrange();
        true
    }

    /// Floating clients get their configure requests honored (and mirrored
    /// into the floating shadow); tiled clients get a synthetic restatement
    /// of the geometry the layout gave them.
    pub fn configure_request_handler(&mut self, request: ConfigureRequest) -> bool {
        let handle = request.handle;
        let Some(index) = self.clients.iter().position(|c| c.handle == handle) else {
            self.actions
                .push_back(DisplayAction::ForwardConfigure(request));
            return false;
        };
        let client = &mut self.clients[index];
        if let Some(border) = request.border {
            client.border = border;
        }
        if client.floating() {
            let mut g = client.geometry;
            if let Some(x) = request.x {
                g.x = x;
            }
            if let Some(y) = request.y {
                g.y = y;
            }
            if let Some(w) = request.w {
                g.w = w;
            }
            if let Some(h) = request.h {
                g.h = h;
            }
            client.geometry = g;
            client.set_floating_geometry(g);
            let moved_only = (request.x.is_some() || request.y.is_some())
                && request.w.is_none()
                && request.h.is_none();
            if moved_only {
                self.actions
                    .push_back(DisplayAction::SendConfigureNotify(handle));
            }
            let (visible, border) = {
                let c = &self.clients[index];
                (c.visible_on(self.tagset), c.border)
            };
            if visible {
                self.actions.push_back(DisplayAction::ConfigureClient {
                    handle,
                    geometry: g,
                    border,
                });
            }
            true
        } else {
            self.actions
                .push_back(DisplayAction::SendConfigureNotify(handle));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Monitor, TagMask};

    type TestManager =
        Manager<crate::config::TestConfig, crate::display_servers::MockDisplayServer>;

    fn manager() -> TestManager {
        let mut manager = Manager::new_test(vec![]);
        manager.monitors_changed_handler(vec![Monitor::new(Geometry::new(0, 0, 1000, 800))]);
        manager
    }

    fn new_client(id: i32) -> Client {
        Client::new(
            ClientHandle::MockHandle(id),
            String::new(),
            Geometry::new(100, 100, 300, 200),
            1,
        )
    }

    #[test]
    fn managing_a_window_twice_is_a_silent_no_op() {
        let mut manager = manager();
        assert!(manager.client_created_handler(new_client(1), -1, -1));
        assert!(!manager.client_created_handler(new_client(1), -1, -1));
        assert_eq!(manager.state.clients.len(), 1);
    }

    #[test]
    fn new_clients_join_at_the_front_of_the_registry() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        manager.client_created_handler(new_client(2), -1, -1);
        assert_eq!(
            manager.state.clients[0].handle,
            ClientHandle::MockHandle(2)
        );
    }

    #[test]
    fn new_clients_default_to_the_active_view_and_floating() {
        let mut manager = manager();
        manager.state.tagset = TagMask::new(0b100);
        manager.client_created_handler(new_client(1), -1, -1);
        let client = manager.state.client(ClientHandle::MockHandle(1)).unwrap();
        assert_eq!(client.tags, TagMask::new(0b100));
        assert!(client.floating());
    }

    #[test]
    fn a_transient_inherits_its_parents_tags() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        manager
            .state
            .client_mut(ClientHandle::MockHandle(1))
            .unwrap()
            .tags = TagMask::new(0b11);
        let mut child = new_client(2);
        child.transient = Some(ClientHandle::MockHandle(1));
        manager.client_created_handler(child, -1, -1);
        let child = manager.state.client(ClientHandle::MockHandle(2)).unwrap();
        assert_eq!(child.tags, TagMask::new(0b11));
    }

    #[test]
    fn new_clients_are_pulled_onto_the_pointer_monitor() {
        let mut manager = manager();
        let mut client = new_client(1);
        client.geometry = Geometry::new(900, 700, 300, 200);
        manager.client_created_handler(client, 500, 400);
        let client = manager.state.client(ClientHandle::MockHandle(1)).unwrap();
        assert_eq!(client.geometry.x, 700);
        assert_eq!(client.geometry.y, 600);
    }

    #[test]
    fn unmanaging_clears_the_stack_markers() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        let handle = ClientHandle::MockHandle(1);
        manager.state.pin(handle);
        manager.state.raise(Some(handle));
        manager.state.unmanage(handle, true);
        assert_eq!(manager.state.stack.pinned, None);
        assert_eq!(manager.state.stack.raised, None);
        assert!(manager.state.clients.is_empty());
    }

    #[test]
    fn unmanaging_a_live_window_restores_its_border() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        manager.state.actions.clear();
        manager.state.unmanage(ClientHandle::MockHandle(1), false);
        assert!(manager.state.actions.iter().any(|a| matches!(
            a,
            DisplayAction::UnmanageClient {
                restore_border: Some(1),
                ..
            }
        )));
    }

    #[test]
    fn destroying_the_focused_client_moves_focus_on() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        manager.client_created_handler(new_client(2), -1, -1);
        assert_eq!(
            manager.state.focus_manager.handle(),
            Some(ClientHandle::MockHandle(2))
        );
        manager.client_destroyed_handler(&ClientHandle::MockHandle(2));
        assert_eq!(
            manager.state.focus_manager.handle(),
            Some(ClientHandle::MockHandle(1))
        );
    }

    #[test]
    fn fullscreen_round_trip_restores_the_exact_placement() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        let handle = ClientHandle::MockHandle(1);
        manager.state.client_mut(handle).unwrap().border = 3;
        let before = manager.state.client(handle).unwrap().clone();

        manager.state.set_fullscreen(handle, true);
        let during = manager.state.client(handle).unwrap();
        assert!(during.fullscreen);
        assert_eq!(during.geometry, Geometry::new(0, 0, 1000, 800));
        assert_eq!(during.border, 0);

        manager.state.set_fullscreen(handle, false);
        let after = manager.state.client(handle).unwrap();
        assert!(!after.fullscreen);
        assert_eq!(after.geometry, before.geometry);
        assert_eq!(after.border, 3);
        assert_eq!(after.floating(), before.floating());
    }

    #[test]
    fn fullscreen_requests_toggle() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        let handle = ClientHandle::MockHandle(1);
        manager.state.fullscreen_request(handle, StateChange::Toggle);
        assert!(manager.state.client(handle).unwrap().fullscreen);
        manager.state.fullscreen_request(handle, StateChange::Toggle);
        assert!(!manager.state.client(handle).unwrap().fullscreen);
    }

    #[test]
    fn activation_marks_unfocused_clients_urgent() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        manager.client_created_handler(new_client(2), -1, -1);
        manager.state.activation_request(ClientHandle::MockHandle(1));
        assert!(
            manager
                .state
                .client(ClientHandle::MockHandle(1))
                .unwrap()
                .urgent
        );
        // The focused client never goes urgent from an activation request.
        manager.state.activation_request(ClientHandle::MockHandle(2));
        assert!(
            !manager
                .state
                .client(ClientHandle::MockHandle(2))
                .unwrap()
                .urgent
        );
    }

    #[test]
    fn configure_requests_from_tiled_clients_only_get_a_reply() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        let handle = ClientHandle::MockHandle(1);
        manager.state.client_mut(handle).unwrap().set_floating(false);
        manager.state.arrange();
        let tiled_geometry = manager.state.client(handle).unwrap().geometry;
        manager.state.actions.clear();

        manager.state.configure_request_handler(ConfigureRequest {
            handle,
            x: Some(5),
            y: Some(5),
            w: Some(50),
            h: Some(50),
            border: None,
        });
        assert_eq!(manager.state.client(handle).unwrap().geometry, tiled_geometry);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::SendConfigureNotify(_))));
    }

    #[test]
    fn configure_requests_from_floating_clients_are_honored() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        let handle = ClientHandle::MockHandle(1);
        manager.state.configure_request_handler(ConfigureRequest {
            handle,
            x: Some(200),
            y: Some(150),
            w: Some(400),
            h: Some(300),
            border: None,
        });
        let client = manager.state.client(handle).unwrap();
        assert_eq!(client.geometry, Geometry::new(200, 150, 400, 300));
        assert_eq!(client.floating_geometry(), client.geometry);
    }

    #[test]
    fn requests_for_unmanaged_windows_pass_through() {
        let mut manager = manager();
        let request = ConfigureRequest {
            handle: ClientHandle::MockHandle(9),
            x: Some(1),
            y: None,
            w: None,
            h: None,
            border: None,
        };
        manager.state.configure_request_handler(request);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ForwardConfigure(_))));
    }

    #[test]
    fn a_late_transient_property_pulls_the_client_floating() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        manager.client_created_handler(new_client(2), -1, -1);
        let handle = ClientHandle::MockHandle(2);
        manager.state.client_mut(handle).unwrap().set_floating(false);
        manager
            .state
            .transient_changed(handle, Some(ClientHandle::MockHandle(1)));
        assert!(manager.state.client(handle).unwrap().floating());
    }

    #[test]
    fn rapid_retitles_of_the_focused_client_are_debounced() {
        let mut manager = manager();
        manager.client_created_handler(new_client(1), -1, -1);
        manager.state.title_cooldown_ms = 3000;
        let handle = ClientHandle::MockHandle(1);
        assert!(manager.state.title_changed(handle, "one", 10_000));
        assert!(!manager.state.title_changed(handle, "two", 10_500));
        let client = manager.state.client(handle).unwrap();
        assert_eq!(client.name, "two");
        assert_eq!(client.display_name(), "one");
    }
}
