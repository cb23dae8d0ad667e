use crate::config::Config;
use crate::errors::Result;
use crate::models::BarSnapshot;
use crate::utils::state_socket::StateSocket;
use crate::{DisplayServer, Manager};
use std::path::{Path, PathBuf};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run the top-level dispatch loop until a quit command arrives.
    ///
    /// One event runs to completion before the next is dequeued; drags are
    /// a mode on this same loop, not a nested one, so cancellation and
    /// deferral stay on a single control path.
    ///
    /// # Errors
    /// Fails when the bar snapshot socket cannot be created.
    pub async fn event_loop(mut self) -> Result<()> {
        let socket_file = place_runtime_file("bar.sock")?;
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file).await?;

        let mut event_buffer = vec![];
        loop {
            if self.state.mode.is_normal() {
                state_socket
                    .write_snapshot(&BarSnapshot::from(&self.state))
                    .await
                    .ok();
            }
            self.display_server.flush();

            tokio::select! {
                _ = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.append(&mut self.display_server.get_next_events());
                    continue;
                }
                else => {
                    event_buffer.drain(..).for_each(|event| {
                        self.display_event_handler(event);
                    });
                }
            }

            // Apply any protocol effects the handlers queued up. An action
            // may echo an event straight back (e.g. a focus verification).
            while let Some(action) = self.state.actions.pop_front() {
                if let Some(event) = self.display_server.execute_action(action) {
                    event_buffer.push(event);
                }
            }

            if self.quit_requested {
                break;
            }
        }
        state_socket.shutdown().await;
        Ok(())
    }
}

fn place_runtime_file<P>(path: P) -> Result<PathBuf>
where
    P: AsRef<Path>,
{
    let base = xdg::BaseDirectories::with_prefix("tidewm")?;
    Ok(base.place_runtime_file(path)?)
}
