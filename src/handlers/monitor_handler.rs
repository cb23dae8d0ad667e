use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{Manager, Monitor};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Replace the monitor table after an output change. The adapter hands
    /// over an ordered list with the primary monitor first; existing
    /// per-monitor layout settings survive, new monitors pick up the
    /// configured defaults. Returns true if changes need to be rendered.
    pub fn monitors_changed_handler(&mut self, monitors: Vec<Monitor>) -> bool {
        if monitors.is_empty() {
            return false;
        }
        self.state.monitors = monitors;
        self.state
            .sync_monitor_settings(self.config.main_factor(), self.config.main_count());
        self.state.arrange();
        true
    }
}
