use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::errors::Result;
use crate::DisplayEvent;
#[cfg(test)]
mod mock_display_server;
#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;
use futures::prelude::*;
use std::pin::Pin;

/// The abstract display interface. Adapters own the protocol connection and
/// translate raw traffic into [`DisplayEvent`]s; the core answers with
/// [`DisplayAction`]s. Benign races against windows that vanished between
/// query and action are the adapter's to swallow.
pub trait DisplayServer {
    /// Connect and claim window management on the display.
    ///
    /// # Errors
    /// `DisplayUnavailable` when another window manager already owns the
    /// display's redirect selection. This is fatal to the caller.
    fn new(config: &impl Config) -> Result<Self>
    where
        Self: Sized;

    /// Drain pending events. The first drain after startup reports every
    /// pre-existing mapped or iconic window as a `ClientCreate`, transient
    /// windows after their parents, so state rebuilds from a live scan.
    fn get_next_events(&mut self) -> Vec<DisplayEvent>;

    fn execute_action(&mut self, _act: DisplayAction) -> Option<DisplayEvent> {
        None
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
