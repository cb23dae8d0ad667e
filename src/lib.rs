//! The client/window state engine behind TideWM.
// Pedantic lints are on to keep the state machinery as correct as possible;
// the allows below are the handful that only generate noise for this kind of
// integer-heavy geometry code.
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access
)]
mod command;
pub mod config;
mod display_action;
mod display_event;
pub mod display_servers;
pub mod errors;
mod event_loop;
mod handlers;
pub mod layouts;
pub mod models;
pub mod state;
pub mod utils;

pub use command::{Command, DragKind};
pub use config::{Config, Keybind};
pub use display_action::DisplayAction;
pub use display_event::{ConfigureRequest, DisplayEvent, StateChange};
pub use display_servers::DisplayServer;
pub use models::{Client, ClientHandle, Manager, Mode, Monitor, TagMask};
pub use state::State;
pub use utils::state_socket::StateSocket;
