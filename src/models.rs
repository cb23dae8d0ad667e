mod client;
mod dto;
mod focus_manager;
mod geometry;
mod manager;
mod mode;
mod monitor;
mod stack;
mod tagset;

pub use client::{Client, ClientHandle, SizeHints};
pub use dto::{BarSnapshot, TagState};
pub use focus_manager::FocusManager;
pub use geometry::Geometry;
pub use manager::Manager;
pub use mode::{DragTracker, Mode};
pub use monitor::Monitor;
pub use stack::{stacking_order, StackEntry, StackMarkers};
pub use tagset::{TagMask, MAX_TAGS};

/// An X11-style modifier bit mask.
pub type ModMask = u32;
/// An X11-style key symbol.
pub type Keysym = u32;
