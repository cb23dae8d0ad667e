//! The interactive pointer-session state machine: hot-zone checking,
//! move/resize drags, and dragging the tiled main/stack boundary.

use crate::command::DragKind;
use crate::display_action::DisplayAction;
use crate::layouts::{self, MAX_MAIN_FACTOR, MIN_MAIN_FACTOR};
use crate::models::{ClientHandle, DragTracker, Keysym, Mode};
use crate::state::State;

/// Motion samples are applied at most this often; skipped samples fold into
/// the next accepted delta.
const MOTION_INTERVAL_MS: u32 = 16;

impl State {
    /// Start a keyboard-initiated drag on the focused client. Fullscreen
    /// clients never drag; a resize on a tiled client becomes a boundary
    /// drag instead.
    pub fn start_drag(&mut self, kind: DragKind) -> bool {
        if !self.mode.is_normal() {
            return false;
        }
        let Some(handle) = self.focus_manager.handle() else {
            return false;
        };
        let Some(client) = self.client(handle) else {
            return false;
        };
        if client.fullscreen {
            return false;
        }
        let floating = client.floating();
        self.mode = match kind {
            DragKind::Move => Mode::Moving(handle),
            DragKind::Resize if floating => Mode::Resizing(handle),
            DragKind::Resize => Mode::DraggingBoundary(handle),
        };
        self.drag = DragTracker::default();
        self.actions.push_back(DisplayAction::GrabPointer);
        self.actions.push_back(DisplayAction::GrabKeyboard);
        self.raise(Some(handle));
        true
    }

    /// One pointer-motion sample. What it means depends entirely on the
    /// current mode.
    pub fn pointer_motion(
        &mut self,
        x: i32,
        y: i32,
        time: u32,
        over: Option<ClientHandle>,
        buttons_down: bool,
    ) -> bool {
        match self.mode {
            Mode::Moving(handle) | Mode::Resizing(handle) | Mode::DraggingBoundary(handle) => {
                if time.wrapping_sub(self.drag.last_motion) < MOTION_INTERVAL_MS {
                    // Leave the reference point alone so the skipped delta
                    // rides along with the next accepted sample.
                    return false;
                }
                let (dx, dy) = (x - self.pointer.0, y - self.pointer.1);
                self.pointer = (x, y);
                self.drag.last_motion = time;
                self.apply_drag_motion(handle, dx, dy)
            }
            Mode::Checking(handle) => {
                self.pointer = (x, y);
                let still_hot = self
                    .client(handle)
                    .map_or(false, |c| c.in_move_zone(x, y) || c.in_resize_zone(x, y));
                if !still_hot || self.in_bar_zone(x, y) {
                    self.end_grab();
                }
                false
            }
            Mode::Normal => {
                self.pointer = (x, y);
                self.idle_motion(x, y, over, buttons_down)
            }
        }
    }

    /// Motion outside any grab: the bar edge gesture, focus-follows-mouse,
    /// and arming the border hot zones.
    fn idle_motion(
        &mut self,
        x: i32,
        y: i32,
        over: Option<ClientHandle>,
        buttons_down: bool,
    ) -> bool {
        if self.in_bar_zone(x, y) {
            if !self.bar_focused {
                self.bar_focused = true;
                self.actions
                    .push_back(DisplayAction::Unfocus { previous: None });
                self.restack();
                return true;
            }
        } else if self.bar_focused {
            self.bar_focused = false;
            self.focus_client(self.focus_manager.handle());
            self.restack();
            return true;
        }
        if let Some(handle) = over {
            if self.client(handle).is_some() && self.focus_manager.handle() != Some(handle) {
                self.focus_client(Some(handle));
            }
            if !buttons_down {
                let arm = self.client(handle).map_or(false, |c| {
                    !c.fullscreen && (c.in_move_zone(x, y) || c.in_resize_zone(x, y))
                });
                if arm {
                    self.mode = Mode::Checking(handle);
                    self.actions.push_back(DisplayAction::GrabPointer);
                }
            }
        }
        false
    }

    fn apply_drag_motion(&mut self, handle: ClientHandle, dx: i32, dy: i32) -> bool {
        let Some((floating, live, shadow)) = self
            .client(handle)
            .map(|c| (c.floating(), c.geometry, c.floating_geometry()))
        else {
            return false;
        };
        match self.mode {
            Mode::Moving(_) => {
                if !floating {
                    // A tiled client has to travel past the snap distance
                    // before the gesture pulls it out of the layout.
                    self.drag.travel_x += dx;
                    self.drag.travel_y += dy;
                    if self.drag.travel_x.abs() <= self.snap && self.drag.travel_y.abs() <= self.snap
                    {
                        return false;
                    }
                    let (tx, ty) = (self.drag.travel_x, self.drag.travel_y);
                    if let Some(client) = self.client_mut(handle) {
                        client.set_floating(true);
                        client.set_floating_geometry(live);
                    }
                    self.arrange();
                    self.resize_client(handle, live.x + tx, live.y + ty, live.w, live.h);
                    return true;
                }
                self.resize_client(handle, shadow.x + dx, shadow.y + dy, shadow.w, shadow.h);
                true
            }
            Mode::Resizing(_) => {
                self.resize_client(
                    handle,
                    shadow.x,
                    shadow.y,
                    (shadow.w + dx).max(1),
                    (shadow.h + dy).max(1),
                );
                true
            }
            Mode::DraggingBoundary(_) => {
                // Work on the live rectangle for immediate feedback; the
                // floating shadow stays untouched.
                self.resize_client(handle, live.x, live.y, (live.w + dx).max(1), (live.h + dy).max(1));
                true
            }
            _ => false,
        }
    }

    /// A button press while checking commits the drag; anywhere else it is
    /// click-to-focus with click-to-raise. Presses inside a committed drag
    /// belong to the grab and mean nothing here.
    pub fn button_press(&mut self, over: Option<ClientHandle>, x: i32, y: i32) -> bool {
        if self.mode.is_drag() {
            return false;
        }
        if let Mode::Checking(handle) = self.mode {
            let Some(client) = self.client(handle) else {
                self.end_grab();
                return false;
            };
            let floating = client.floating();
            let in_move = client.in_move_zone(x, y);
            let in_resize = client.in_resize_zone(x, y);
            let next = if in_move {
                Some(Mode::Moving(handle))
            } else if in_resize && floating {
                Some(Mode::Resizing(handle))
            } else if in_resize && self.on_main_boundary(handle, x) {
                Some(Mode::DraggingBoundary(handle))
            } else {
                None
            };
            return match next {
                Some(mode) => {
                    self.mode = mode;
                    self.drag = DragTracker::default();
                    self.actions.push_back(DisplayAction::GrabKeyboard);
                    self.raise(Some(handle));
                    true
                }
                None => {
                    self.end_grab();
                    false
                }
            };
        }
        if let Some(handle) = over {
            if self.client(handle).is_none() {
                return false;
            }
            self.actions.push_back(DisplayAction::ReplayClick(handle));
            self.focus_client(Some(handle));
            if self.client(handle).map_or(false, |c| c.floating()) {
                self.zoom(Some(handle));
            } else {
                self.raise(Some(handle));
            }
            return true;
        }
        false
    }

    /// Whether a press on a tiled client lands close enough to its
    /// monitor's main/stack boundary to drag it.
    fn on_main_boundary(&self, handle: ClientHandle, x: i32) -> bool {
        if self.monitors.is_empty() {
            return false;
        }
        let Some(client) = self.client(handle) else {
            return false;
        };
        let monitor = layouts::monitor_for(self, client);
        let area = self.window_area(monitor);
        let boundary = area.x + (area.w as f32 * self.main_factor[monitor]) as i32;
        (boundary - x).abs() <= self.snap
    }

    pub fn button_release(&mut self, keys_still_down: bool) -> bool {
        self.maybe_end_grab(keys_still_down)
    }

    /// Key releases end a grab only once every tracked key is up, so key
    /// repeat cannot cut a keyboard-initiated drag short. Releasing the
    /// stack-cycle key outside a grab zooms the focused client.
    pub fn key_release(&mut self, keysym: Keysym, keys_still_down: bool) -> bool {
        let ended = self.maybe_end_grab(keys_still_down);
        if self.mode.is_normal() && keysym == self.stack_release {
            self.zoom(self.focus_manager.handle());
            self.actions.push_back(DisplayAction::UngrabKeyboard);
            return true;
        }
        ended
    }

    fn maybe_end_grab(&mut self, keys_still_down: bool) -> bool {
        if self.mode.is_normal() {
            return false;
        }
        if keys_still_down && !matches!(self.mode, Mode::Checking(_)) {
            return false;
        }
        self.end_grab();
        true
    }

    /// Release the grabs. A boundary drag folds its result back into the
    /// monitor's layout settings before the retile.
    fn end_grab(&mut self) {
        if let Mode::DraggingBoundary(handle) = self.mode {
            self.apply_boundary_drag(handle);
        }
        self.actions.push_back(DisplayAction::UngrabPointer);
        self.actions.push_back(DisplayAction::UngrabKeyboard);
        self.mode = Mode::Normal;
    }

    /// Convert the dragged rectangle into a new main factor and main count
    /// for its monitor, then retile.
    fn apply_boundary_drag(&mut self, handle: ClientHandle) {
        if self.monitors.is_empty() {
            return;
        }
        let Some(client) = self.client(handle) else {
            return;
        };
        let g = client.geometry;
        let (outer_w, outer_h) = (client.outer_w(), client.outer_h());
        let monitor = self.monitor_at(g.x, g.y).unwrap_or(self.monitors.len() - 1);
        let full = self.monitors[monitor].geometry;
        self.main_factor[monitor] =
            (outer_w as f32 / full.w as f32).clamp(MIN_MAIN_FACTOR, MAX_MAIN_FACTOR);
        self.main_count[monitor] = ((full.h / outer_h.max(1)) as usize).max(1);
        layouts::arrange_monitors(self);
    }
}
