use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::state::State;
use crate::DisplayEvent;

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<C, SERVER> {
    pub state: State,
    pub config: C,
    pub display_server: SERVER,
    pub(crate) quit_requested: bool,
    /// Events that arrived while a drag grab was held. Replayed, in order,
    /// once the grab ends.
    pub(crate) deferred_events: Vec<DisplayEvent>,
}

impl<C, SERVER> Manager<C, SERVER>
where
    C: Config,
    SERVER: DisplayServer,
{
    /// # Errors
    /// Fails when the display server refuses the connection, e.g. because
    /// another window manager already owns it.
    pub fn new(config: C) -> Result<Self> {
        let display_server = SERVER::new(&config)?;
        Ok(Self {
            state: State::new(&config),
            config,
            display_server,
            quit_requested: false,
            deferred_events: Vec::new(),
        })
    }

    pub fn quit(&mut self) {
        self.quit_requested = true;
    }
}

#[cfg(test)]
impl Manager<crate::config::TestConfig, crate::display_servers::MockDisplayServer> {
    pub fn new_test(tags: Vec<String>) -> Self {
        Self::new(crate::config::TestConfig::new(tags)).expect("mock display server never fails")
    }
}
