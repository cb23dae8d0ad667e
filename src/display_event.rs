use crate::command::Command;
use crate::models::{Client, ClientHandle, Keysym, ModMask, Monitor, SizeHints};
use serde::{Deserialize, Serialize};

/// How a client asked for a window state to change.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    Set,
    Clear,
    Toggle,
}

/// A geometry change requested by a client. Unset fields keep their current
/// value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub handle: ClientHandle,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
    pub border: Option<i32>,
}

/// The inbound event stream, as translated by a display-server adapter.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug)]
pub enum DisplayEvent {
    /// A new, not-yet-managed window asked to be mapped. Carries the seeded
    /// client and the current pointer position.
    ClientCreate(Client, i32, i32),
    ClientDestroy(ClientHandle),
    /// An unmap notification; `true` marks a synthetic (withdrawal) event.
    ClientUnmap(ClientHandle, bool),
    ConfigureRequest(ConfigureRequest),
    /// A title change, stamped with the server time for cooldown tracking.
    ClientTitle(ClientHandle, String, u32),
    ClientHints(ClientHandle, SizeHints),
    ClientUrgency(ClientHandle, bool),
    ClientTransient(ClientHandle, Option<ClientHandle>),
    /// The window declared itself a dialog.
    ClientDialogHint(ClientHandle),
    FullscreenRequest(ClientHandle, StateChange),
    /// Another client asked for this window's attention.
    ActivationRequest(ClientHandle),
    /// The root status text changed.
    StatusUpdate(String),
    MonitorsChanged(Vec<Monitor>),
    PointerMotion {
        x: i32,
        y: i32,
        time: u32,
        over: Option<ClientHandle>,
        buttons_down: bool,
    },
    ButtonPress {
        over: Option<ClientHandle>,
        x: i32,
        y: i32,
    },
    ButtonRelease {
        keys_still_down: bool,
    },
    KeyCombo(ModMask, Keysym),
    KeyRelease {
        keysym: Keysym,
        keys_still_down: bool,
    },
    /// The keyboard mapping changed and grabs must be reinstalled.
    KeyGrabReload,
    Expose,
    SendCommand(Command),
}

impl DisplayEvent {
    /// Traffic a drag grab must keep servicing: its own input, plus
    /// structural requests that would otherwise freeze other clients.
    /// Everything else waits in line until the grab ends.
    pub(crate) fn live_during_drag(&self) -> bool {
        matches!(
            self,
            Self::PointerMotion { .. }
                | Self::ButtonPress { .. }
                | Self::ButtonRelease { .. }
                | Self::KeyRelease { .. }
                | Self::ConfigureRequest(_)
                | Self::ClientCreate(..)
                | Self::Expose
        )
    }
}
