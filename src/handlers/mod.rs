//! Event and command handlers. Each file owns one concern and hangs its
//! entry points off `Manager` or `State`.
mod client_handler;
mod command_handler;
mod display_event_handler;
mod drag_handler;
mod focus_handler;
mod monitor_handler;
