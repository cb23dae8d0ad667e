use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::Manager;
use crate::DisplayEvent;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Process one event, and apply its changes to the manager. Returns
    /// true if changes need to be rendered.
    ///
    /// While a drag grab is held only grab input and structural traffic is
    /// serviced; everything else queues up and replays, in arrival order,
    /// the moment the grab ends.
    pub fn display_event_handler(&mut self, event: DisplayEvent) -> bool {
        let mut needs_update = self.dispatch(event);
        while !self.state.mode.is_drag() && !self.deferred_events.is_empty() {
            let pending = std::mem::take(&mut self.deferred_events);
            for event in pending {
                needs_update = self.dispatch(event) || needs_update;
            }
        }
        needs_update
    }

    fn dispatch(&mut self, event: DisplayEvent) -> bool {
        if self.state.mode.is_drag() && !event.live_during_drag() {
            self.deferred_events.push(event);
            return false;
        }
        match event {
            DisplayEvent::ClientCreate(client, x, y) => self.client_created_handler(client, x, y),
            DisplayEvent::ClientDestroy(handle) => self.client_destroyed_handler(&handle),
            DisplayEvent::ClientUnmap(handle, synthetic) => {
                self.client_unmapped_handler(&handle, synthetic)
            }
            DisplayEvent::ConfigureRequest(request) => {
                self.state.configure_request_handler(request)
            }

            DisplayEvent::ClientTitle(handle, name, time) => {
                self.state.title_changed(handle, &name, time)
            }
            DisplayEvent::ClientHints(handle, hints) => {
                self.state.hints_changed(handle, hints);
                false
            }
            DisplayEvent::ClientUrgency(handle, urgent) => {
                self.state.urgency_changed(handle, urgent)
            }
            DisplayEvent::ClientTransient(handle, parent) => {
                self.state.transient_changed(handle, parent)
            }
            DisplayEvent::ClientDialogHint(handle) => {
                self.state.dialog_hint(handle);
                false
            }
            DisplayEvent::FullscreenRequest(handle, change) => {
                self.state.fullscreen_request(handle, change)
            }
            DisplayEvent::ActivationRequest(handle) => self.state.activation_request(handle),

            DisplayEvent::StatusUpdate(text) => {
                self.state.status_changed(text);
                true
            }
            DisplayEvent::MonitorsChanged(monitors) => self.monitors_changed_handler(monitors),

            DisplayEvent::PointerMotion {
                x,
                y,
                time,
                over,
                buttons_down,
            } => self.state.pointer_motion(x, y, time, over, buttons_down),
            DisplayEvent::ButtonPress { over, x, y } => self.state.button_press(over, x, y),
            DisplayEvent::ButtonRelease { keys_still_down } => {
                self.state.button_release(keys_still_down)
            }

            DisplayEvent::KeyCombo(modmask, keysym) => {
                let command = self
                    .config
                    .mapped_bindings()
                    .into_iter()
                    .find(|bind| bind.modmask == modmask && bind.keysym == keysym)
                    .map(|bind| bind.command);
                command.map_or(false, |cmd| self.command_handler(&cmd))
            }
            DisplayEvent::KeyRelease {
                keysym,
                keys_still_down,
            } => self.state.key_release(keysym, keys_still_down),
            DisplayEvent::KeyGrabReload => {
                self.state
                    .actions
                    .push_back(DisplayAction::ReloadKeyGrabs(self.config.mapped_bindings()));
                false
            }

            DisplayEvent::Expose => {
                self.state.actions.push_back(DisplayAction::RefreshBar);
                false
            }
            DisplayEvent::SendCommand(command) => self.command_handler(&command),
        }
    }
}
