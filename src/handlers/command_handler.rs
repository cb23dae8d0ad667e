use crate::command::Command;
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::Manager;
use crate::state::State;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Processes a command and invokes the associated state mutation.
    /// Returns true if changes need to be rendered.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        process_internal(self, command).unwrap_or(false)
    }
}

fn process_internal<C: Config, SERVER: DisplayServer>(
    manager: &mut Manager<C, SERVER>,
    command: &Command,
) -> Option<bool> {
    let state = &mut manager.state;
    match command {
        Command::ViewTags(mask) => Some(state.view(*mask)),
        Command::ToggleViewTags(mask) => Some(state.toggle_view(*mask)),
        Command::TagClient(mask) => Some(state.tag_focused(*mask)),
        Command::ToggleTagClient(mask) => Some(state.toggle_tag_focused(*mask)),
        Command::ShiftView(delta) => Some(state.shift_view(*delta)),
        Command::ShiftViewWithClient(delta) => Some(state.shift_view_with_client(*delta)),

        Command::FocusStack(delta) => Some(state.focus_stack(*delta)),
        Command::RaiseStack(delta) => raise_stack(state, *delta),

        Command::Pin => {
            let handle = state.focus_manager.handle()?;
            state.pin(handle);
            Some(true)
        }
        Command::Zoom => {
            state.zoom(state.focus_manager.handle());
            Some(true)
        }

        Command::ToggleFloating => toggle_floating(state),
        Command::ToggleFullScreen => {
            let handle = state.focus_manager.handle()?;
            let target = !state.client(handle)?.fullscreen;
            Some(state.set_fullscreen(handle, target))
        }

        Command::CloseWindow => {
            let handle = state.focus_manager.handle()?;
            state.actions.push_back(DisplayAction::KillClient(handle));
            Some(false)
        }

        Command::StartDrag(kind) => Some(state.start_drag(*kind)),

        Command::Quit => {
            manager.quit();
            Some(false)
        }
    }
}

/// Cycle focus under a held keyboard grab; releasing the configured key
/// later zooms whatever the cycle landed on.
fn raise_stack(state: &mut State, delta: i32) -> Option<bool> {
    state.actions.push_back(DisplayAction::GrabKeyboard);
    Some(state.focus_stack(delta))
}

fn toggle_floating(state: &mut State) -> Option<bool> {
    let handle = state.focus_manager.handle()?;
    if state.client(handle)?.fullscreen {
        state.set_fullscreen(handle, false);
    }
    let client = state.client_mut(handle)?;
    let now_floating = !client.floating();
    client.set_floating(now_floating);
    if client.floating() {
        let shadow = client.floating_geometry();
        state.resize_client(handle, shadow.x, shadow.y, shadow.w, shadow.h);
    }
    state.arrange();
    Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, ClientHandle, Geometry, Monitor, TagMask};

    type TestManager =
        Manager<crate::config::TestConfig, crate::display_servers::MockDisplayServer>;

    fn manager() -> TestManager {
        let mut manager = Manager::new_test(vec![]);
        manager.monitors_changed_handler(vec![Monitor::new(Geometry::new(0, 0, 1000, 800))]);
        manager
    }

    fn manage(manager: &mut TestManager, id: i32) -> ClientHandle {
        let handle = ClientHandle::MockHandle(id);
        let client = Client::new(handle, String::new(), Geometry::new(100, 100, 300, 200), 0);
        manager.client_created_handler(client, -1, -1);
        handle
    }

    #[test]
    fn toggle_floating_round_trips_through_the_layout() {
        let mut manager = manager();
        let handle = manage(&mut manager, 1);
        let floating_geometry = manager.state.client(handle).unwrap().geometry;

        manager.command_handler(&Command::ToggleFloating);
        let tiled = manager.state.client(handle).unwrap();
        assert!(!tiled.floating());
        assert_eq!(tiled.geometry, Geometry::new(0, 0, 1000, 800));

        manager.command_handler(&Command::ToggleFloating);
        let floating = manager.state.client(handle).unwrap();
        assert!(floating.floating());
        assert_eq!(floating.geometry, floating_geometry);
    }

    #[test]
    fn zoom_promotes_a_tiled_client_to_the_main_area() {
        let mut manager = manager();
        let first = manage(&mut manager, 1);
        let second = manage(&mut manager, 2);
        for handle in [first, second] {
            manager.state.client_mut(handle).unwrap().set_floating(false);
        }
        manager.state.arrange();
        // Client 2 is at the registry front and owns the main column.
        assert_eq!(manager.state.client(second).unwrap().geometry.x, 0);

        manager.state.focus_client(Some(first));
        manager.command_handler(&Command::Zoom);
        assert_eq!(manager.state.clients[0].handle, first);
        assert_eq!(manager.state.client(first).unwrap().geometry.x, 0);
        assert_eq!(manager.state.stack.raised, Some(first));
    }

    #[test]
    fn pin_toggles_the_pinned_marker() {
        let mut manager = manager();
        let handle = manage(&mut manager, 1);
        manager.command_handler(&Command::Pin);
        assert_eq!(manager.state.stack.pinned, Some(handle));
        manager.command_handler(&Command::Pin);
        assert_eq!(manager.state.stack.pinned, None);
    }

    #[test]
    fn close_window_asks_the_focused_client_to_close() {
        let mut manager = manager();
        let handle = manage(&mut manager, 1);
        manager.state.actions.clear();
        manager.command_handler(&Command::CloseWindow);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| *a == DisplayAction::KillClient(handle)));
    }

    #[test]
    fn commands_needing_focus_are_no_ops_without_it() {
        let mut manager = manager();
        assert!(!manager.command_handler(&Command::Pin));
        assert!(!manager.command_handler(&Command::ToggleFloating));
        assert!(!manager.command_handler(&Command::CloseWindow));
        assert!(!manager.command_handler(&Command::ToggleFullScreen));
    }

    #[test]
    fn quit_stops_the_event_loop() {
        let mut manager = manager();
        manager.command_handler(&Command::Quit);
        assert!(manager.quit_requested);
    }

    #[test]
    fn toggle_fullscreen_toggles() {
        let mut manager = manager();
        let handle = manage(&mut manager, 1);
        manager.command_handler(&Command::ToggleFullScreen);
        assert!(manager.state.client(handle).unwrap().fullscreen);
        manager.command_handler(&Command::ToggleFullScreen);
        assert!(!manager.state.client(handle).unwrap().fullscreen);
    }

    #[test]
    fn raise_stack_cycles_and_grabs_the_keyboard() {
        let mut manager = manager();
        manage(&mut manager, 1);
        let second = manage(&mut manager, 2);
        manager.state.actions.clear();
        assert_eq!(manager.state.focus_manager.handle(), Some(second));
        manager.command_handler(&Command::RaiseStack(1));
        assert_ne!(manager.state.focus_manager.handle(), Some(second));
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| *a == DisplayAction::GrabKeyboard));
        // The landing client zooms once the cycle key is released.
        let landed = manager.state.focus_manager.handle().unwrap();
        let release = manager.state.stack_release;
        manager.state.key_release(release, false);
        assert_eq!(manager.state.clients[0].handle, landed);
    }

    #[test]
    fn view_and_tag_commands_dispatch() {
        let mut manager = manager();
        let handle = manage(&mut manager, 1);
        assert!(manager.command_handler(&Command::ViewTags(TagMask::new(0b11))));
        assert_eq!(manager.state.tagset, TagMask::new(0b11));
        assert!(manager.command_handler(&Command::TagClient(TagMask::new(0b10))));
        assert_eq!(
            manager.state.client(handle).unwrap().tags,
            TagMask::new(0b10)
        );
        assert!(manager.command_handler(&Command::ShiftView(1)));
        assert_eq!(manager.state.tagset, TagMask::new(0b110));
    }
}
