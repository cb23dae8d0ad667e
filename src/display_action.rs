use crate::config::Keybind;
use crate::display_event::ConfigureRequest;
use crate::models::{ClientHandle, Geometry, StackEntry};
use serde::{Deserialize, Serialize};

/// These are responses from the window manager. The display server should
/// act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayAction {
    /// Move/resize a client and set its border width.
    ConfigureClient {
        handle: ClientHandle,
        geometry: Geometry,
        border: i32,
    },

    /// Send a synthetic configure notify restating the current geometry,
    /// for requests the layout does not honor.
    SendConfigureNotify(ClientHandle),

    /// Pass a request from an unmanaged window through untouched.
    ForwardConfigure(ConfigureRequest),

    /// Map the window and mark it in the normal state.
    MapClient(ClientHandle),

    /// Park the window out of view without unmapping it.
    HideClient(ClientHandle),

    /// Apply a full front-to-back stacking order, top first: raise the first
    /// entry, then restack each remaining entry directly below its
    /// predecessor.
    RestackClients(Vec<StackEntry>),

    /// Hand input focus to a client: release its click-to-raise grab,
    /// recolor the borders involved, and (when `take_input` is set) move
    /// real input focus and announce it to the client. `take_input` is
    /// false while the bar holds the screen-edge focus.
    FocusClient {
        handle: ClientHandle,
        previous: Option<ClientHandle>,
        take_input: bool,
    },

    /// Drop focus back to the root.
    Unfocus { previous: Option<ClientHandle> },

    /// Arm a click-to-raise button grab on a window losing focus.
    GrabClickToRaise(ClientHandle),

    /// Replay a click swallowed by the click-to-raise grab and release the
    /// grab.
    ReplayClick(ClientHandle),

    GrabPointer,
    GrabKeyboard,
    UngrabPointer,
    UngrabKeyboard,

    /// Ask a window to close, escalating if it ignores the request.
    KillClient(ClientHandle),

    /// Write the urgency hint back to the window.
    SetUrgentHint(ClientHandle, bool),

    /// Publish or retract the fullscreen state on the window.
    SetFullscreenState(ClientHandle, bool),

    /// Mark a window withdrawn after a synthetic unmap.
    SetWithdrawn(ClientHandle),

    /// Stop managing a window. When it still exists, restore the border it
    /// arrived with and release any grabs on it.
    UnmanageClient {
        handle: ClientHandle,
        restore_border: Option<i32>,
    },

    /// Re-publish the ordered list of managed windows.
    SetClientList(Vec<ClientHandle>),

    /// The bar projection changed; redraw.
    RefreshBar,

    /// Reinstall every key grab from the given bindings.
    ReloadKeyGrabs(Vec<Keybind>),
}
