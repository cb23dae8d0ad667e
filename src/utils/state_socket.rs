//! Publishes the bar projection as newline-delimited JSON over a unix
//! socket. The bar (and anything else) connects, receives the latest
//! snapshot immediately, then one line per change.
use crate::errors::{CoreError, Result};
use crate::models::BarSnapshot;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Shared {
    peers: Vec<Option<UnixStream>>,
    last_snapshot: String,
}

#[derive(Debug, Default)]
pub struct StateSocket {
    shared: Arc<Mutex<Shared>>,
    listener: Option<tokio::task::JoinHandle<()>>,
    socket_file: PathBuf,
}

impl Drop for StateSocket {
    fn drop(&mut self) {
        assert!(
            std::thread::panicking() || self.listener.is_none(),
            "StateSocket has to be shutdown explicitly before drop"
        );
    }
}

impl StateSocket {
    /// Bind the unix socket and start accepting peers.
    ///
    /// # Errors
    /// Fails when the socket file cannot be created or bound, typically a
    /// permissions or stale-directory issue.
    pub async fn listen(&mut self, socket_file: PathBuf) -> Result<()> {
        self.socket_file = socket_file;
        let listener = self.build_listener().await?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Explicitly shutdown to stop the accept task and remove the socket
    /// file.
    pub async fn shutdown(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            listener.await.ok();
            fs::remove_file(self.socket_file.as_path()).await.ok();
        }
    }

    /// Push a snapshot to every connected peer. Unchanged snapshots are
    /// skipped; peers that went away are dropped.
    ///
    /// # Errors
    /// Returns an error when the snapshot cannot be serialized or a peer
    /// slot is unexpectedly empty.
    pub async fn write_snapshot(&mut self, snapshot: &BarSnapshot) -> Result<()> {
        if self.listener.is_some() {
            let mut json = serde_json::to_string(snapshot)?;
            json.push('\n');
            let mut shared = self.shared.lock().await;

            if json != shared.last_snapshot {
                shared.peers.retain(std::option::Option::is_some);
                for peer in &mut shared.peers {
                    if peer
                        .as_mut()
                        .ok_or(CoreError::StreamError)?
                        .write_all(json.as_bytes())
                        .await
                        .is_err()
                    {
                        peer.take();
                    }
                }
                shared.last_snapshot = json;
            }
        }
        Ok(())
    }

    async fn build_listener(&self) -> Result<tokio::task::JoinHandle<()>> {
        let shared = self.shared.clone();
        let listener = if let Ok(listener) = UnixListener::bind(&self.socket_file) {
            listener
        } else {
            fs::remove_file(&self.socket_file).await?;
            UnixListener::bind(&self.socket_file)?
        };

        Ok(tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut peer, _)) => {
                        let mut shared = shared.lock().await;
                        if peer.write_all(shared.last_snapshot.as_bytes()).await.is_ok() {
                            shared.peers.push(Some(peer));
                        }
                    }
                    Err(e) => tracing::error!("Accept failed = {:?}", e),
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Manager;
    use tokio::io::{AsyncBufReadExt, BufReader};

    async fn temp_path() -> std::io::Result<std::path::PathBuf> {
        tokio::task::spawn_blocking(|| tempfile::Builder::new().tempfile_in(std::env::temp_dir()))
            .await
            .expect("Blocking task joined")?
            .into_temp_path()
            .keep()
            .map_err(Into::into)
    }

    fn snapshot() -> BarSnapshot {
        let manager = Manager::new_test(vec![]);
        BarSnapshot::from(&manager.state)
    }

    #[tokio::test]
    async fn every_peer_receives_the_snapshot() {
        let snapshot = snapshot();
        let socket_file = temp_path().await.unwrap();
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.write_snapshot(&snapshot).await.unwrap();

        let expected = serde_json::to_string(&snapshot).unwrap();
        for _ in 0..3 {
            assert_eq!(
                expected,
                BufReader::new(UnixStream::connect(socket_file.clone()).await.unwrap())
                    .lines()
                    .next_line()
                    .await
                    .expect("Read next line")
                    .unwrap()
            );
        }

        state_socket.shutdown().await;
    }

    #[tokio::test]
    async fn a_connected_peer_sees_updates() {
        let snapshot = snapshot();
        let socket_file = temp_path().await.unwrap();
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.write_snapshot(&snapshot).await.unwrap();

        let mut lines = BufReader::new(UnixStream::connect(socket_file).await.unwrap()).lines();
        let expected = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            expected,
            lines.next_line().await.expect("Read next line").unwrap()
        );

        let mut updated = snapshot.clone();
        updated.status = "new status".to_string();
        state_socket.write_snapshot(&updated).await.unwrap();
        assert_eq!(
            serde_json::to_string(&updated).unwrap(),
            lines.next_line().await.expect("Read next line").unwrap()
        );

        state_socket.shutdown().await;
    }

    #[tokio::test]
    async fn unchanged_snapshots_are_not_resent() {
        let snapshot = snapshot();
        let socket_file = temp_path().await.unwrap();
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.write_snapshot(&snapshot).await.unwrap();
        state_socket.write_snapshot(&snapshot).await.unwrap();
        assert_eq!(state_socket.shared.lock().await.peers.len(), 0);
        state_socket.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_removes_the_socket_file() {
        let socket_file = temp_path().await.unwrap();
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.shutdown().await;
        assert!(!socket_file.exists());
    }

    #[tokio::test]
    async fn a_stale_socket_file_is_replaced() {
        let socket_file = temp_path().await.unwrap();
        let mut old_socket = StateSocket::default();
        old_socket.listen(socket_file.clone()).await.unwrap();
        assert!(socket_file.exists());
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.shutdown().await;
        assert!(!socket_file.exists());
        old_socket.shutdown().await;
    }
}
