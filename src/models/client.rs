//! Managed-window bookkeeping.
#![allow(clippy::module_name_repetitions)]

use super::{Geometry, TagMask};
use serde::{Deserialize, Serialize};
use x11_dl::xlib;

/// A backend-agnostic handle identifying one managed window. Handles are
/// never reused while the client lives.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientHandle {
    MockHandle(i32),
    XlibHandle(xlib::Window),
}

/// Sizing constraints reported by the client. These only ever clamp a
/// requested geometry; they never generate one.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeHints {
    pub base_w: i32,
    pub base_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    pub min_w: i32,
    pub min_h: i32,
    pub max_w: i32,
    pub max_h: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl SizeHints {
    /// Clients sometimes report limits that contradict each other. Clamp the
    /// hint set itself instead of carrying the contradiction forward.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.max_w > 0 && self.max_w < self.min_w {
            self.max_w = self.min_w;
        }
        if self.max_h > 0 && self.max_h < self.min_h {
            self.max_h = self.min_h;
        }
        if self.min_aspect < 0.0 {
            self.min_aspect = 0.0;
        }
        if self.max_aspect < 0.0 {
            self.max_aspect = 0.0;
        }
        self
    }

    /// Clamp a requested size, honoring aspect limits relative to the base
    /// size, then increments, then min/max (see ICCCM 4.1.2.3).
    #[must_use]
    pub fn constrain(&self, w: i32, h: i32) -> (i32, i32) {
        let mut w = w.max(1) - self.base_w;
        let mut h = h.max(1) - self.base_h;
        if self.min_aspect > 0.0 && self.max_aspect > 0.0 && w > 0 && h > 0 {
            if self.max_aspect < w as f32 / h as f32 {
                w = (h as f32 * self.max_aspect + 0.5) as i32;
            } else if self.min_aspect < h as f32 / w as f32 {
                h = (w as f32 * self.min_aspect + 0.5) as i32;
            }
        }
        if self.inc_w > 0 {
            w -= w % self.inc_w;
        }
        if self.inc_h > 0 {
            h -= h % self.inc_h;
        }
        let mut w = (w + self.base_w).max(self.min_w).max(1);
        let mut h = (h + self.base_h).max(self.min_h).max(1);
        if self.max_w > 0 {
            w = w.min(self.max_w);
        }
        if self.max_h > 0 {
            h = h.min(self.max_h);
        }
        (w, h)
    }

    /// min == max leaves nothing to negotiate: such a client can never tile.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.min_w > 0
            && self.min_h > 0
            && self.min_w == self.max_w
            && self.min_h == self.max_h
    }
}

/// One managed window.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Client {
    pub handle: ClientHandle,
    pub transient: Option<ClientHandle>,
    pub name: String,
    display_name: String,
    retitled_at: u32,
    visible: bool,
    is_floating: bool,
    pub(crate) must_float: bool,
    pub fullscreen: bool,
    saved_floating: bool,
    saved_border: i32,
    pub urgent: bool,
    pub tags: TagMask,
    /// The live geometry, as last applied to the display server.
    pub geometry: Geometry,
    /// Where the client sits when floating. Remembered across tiled and
    /// fullscreen episodes so leaving them restores the old placement.
    floating_geometry: Geometry,
    pub border: i32,
    /// The border the window arrived with, restored if we ever let it go.
    pub original_border: i32,
    pub hints: SizeHints,
}

impl Client {
    #[must_use]
    pub fn new(handle: ClientHandle, name: String, geometry: Geometry, original_border: i32) -> Self {
        Self {
            handle,
            transient: None,
            display_name: name.clone(),
            name,
            retitled_at: 0,
            visible: false,
            is_floating: false,
            must_float: false,
            fullscreen: false,
            saved_floating: false,
            saved_border: 0,
            urgent: false,
            tags: TagMask::default(),
            geometry,
            floating_geometry: geometry,
            border: 0,
            original_border,
            hints: SizeHints::default(),
        }
    }

    pub fn set_floating(&mut self, value: bool) {
        self.is_floating = value;
    }

    /// Whether the client is outside the tiled layout. Fixed-size and
    /// dialog-type clients float no matter what was requested.
    #[must_use]
    pub fn floating(&self) -> bool {
        self.is_floating || self.must_float || self.hints.is_fixed()
    }

    #[must_use]
    pub fn visible_on(&self, view: TagMask) -> bool {
        self.tags.intersects(view)
    }

    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, value: bool) {
        self.visible = value;
    }

    #[must_use]
    pub const fn floating_geometry(&self) -> Geometry {
        self.floating_geometry
    }

    pub fn set_floating_geometry(&mut self, value: Geometry) {
        self.floating_geometry = value;
    }

    #[must_use]
    pub const fn outer_w(&self) -> i32 {
        self.geometry.w + 2 * self.border
    }

    #[must_use]
    pub const fn outer_h(&self) -> i32 {
        self.geometry.h + 2 * self.border
    }

    /// Whether a point is on the window frame or within a border's width of
    /// it.
    #[must_use]
    pub const fn in_frame(&self, x: i32, y: i32) -> bool {
        x >= self.geometry.x - self.border
            && y >= self.geometry.y - self.border
            && x <= self.geometry.x + self.outer_w() + self.border
            && y <= self.geometry.y + self.outer_h() + self.border
    }

    /// The hot zone along the top/left edges that starts a move drag.
    #[must_use]
    pub const fn in_move_zone(&self, x: i32, y: i32) -> bool {
        self.in_frame(x, y)
            && ((self.geometry.x - x).abs() <= self.border
                || (self.geometry.y - y).abs() <= self.border)
    }

    /// The hot zone along the bottom/right edges that starts a resize drag.
    #[must_use]
    pub const fn in_resize_zone(&self, x: i32, y: i32) -> bool {
        self.in_frame(x, y)
            && ((self.geometry.x + self.outer_w() - x).abs() <= self.border
                || (self.geometry.y + self.outer_h() - y).abs() <= self.border)
    }

    /// Going fullscreen borrows the floating flag and the border; both come
    /// back exactly on exit.
    pub fn enter_fullscreen(&mut self) {
        self.saved_floating = self.is_floating;
        self.saved_border = self.border;
        self.border = 0;
        self.is_floating = true;
        self.fullscreen = true;
    }

    pub fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
        self.is_floating = self.saved_floating;
        self.border = self.saved_border;
    }

    /// Refresh the display title from the raw title unless it changed again
    /// within the cooldown. Returns whether the display title settled.
    pub fn settle_title(&mut self, time: u32, cooldown_ms: u32) -> bool {
        let settled = cooldown_ms == 0 || time.wrapping_sub(self.retitled_at) > cooldown_ms;
        if settled {
            self.display_name = self.name.clone();
        }
        self.retitled_at = time;
        settled
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
