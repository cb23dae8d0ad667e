//! The window-manager state: registry, tags, stacking markers and the drag
//! session, plus the queue of protocol effects waiting to be applied.

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::layouts;
use crate::models::{
    stacking_order, Client, ClientHandle, DragTracker, FocusManager, Geometry, Keysym, Mode,
    Monitor, StackMarkers, TagMask, MAX_TAGS,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Where the bar sits on the primary monitor.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct BarPosition {
    pub height: i32,
    pub top: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct State {
    pub monitors: Vec<Monitor>,
    /// Registry order: most-recently-managed first. This order feeds both
    /// the tiled layout and focus traversal.
    pub clients: Vec<Client>,
    pub focus_manager: FocusManager,
    pub stack: StackMarkers,
    pub mode: Mode,
    /// The active view: clients are shown iff their tags intersect it.
    pub tagset: TagMask,
    pub tag_labels: Vec<String>,
    /// Main-column width fraction, per monitor.
    pub main_factor: Vec<f32>,
    /// How many clients the main column holds, per monitor.
    pub main_count: Vec<usize>,
    pub border_width: i32,
    pub snap: i32,
    pub bar: BarPosition,
    /// The bar steals the top of the stack and input focus while the pointer
    /// rides the screen edge.
    pub bar_focused: bool,
    pub status: String,
    pub title_cooldown_ms: u32,
    pub stack_release: Keysym,
    /// Last seen pointer position; drag deltas are computed against it.
    pub pointer: (i32, i32),
    pub(crate) drag: DragTracker,
    pub actions: VecDeque<DisplayAction>,
}

impl State {
    pub(crate) fn new(config: &impl Config) -> Self {
        let mut tag_labels = config.tag_labels();
        tag_labels.truncate(MAX_TAGS);
        Self {
            monitors: Vec::new(),
            clients: Vec::new(),
            focus_manager: FocusManager::default(),
            stack: StackMarkers::default(),
            mode: Mode::default(),
            tagset: TagMask::first(),
            tag_labels,
            main_factor: Vec::new(),
            main_count: Vec::new(),
            border_width: config.border_width(),
            snap: config.snap_distance(),
            bar: BarPosition {
                height: config.bar_height(),
                top: config.bar_on_top(),
            },
            bar_focused: false,
            status: String::new(),
            title_cooldown_ms: config.title_cooldown_secs().saturating_mul(1000),
            stack_release: config.stack_release_key(),
            pointer: (0, 0),
            drag: DragTracker::default(),
            actions: VecDeque::new(),
        }
    }

    // -- registry lookups --

    #[must_use]
    pub fn client(&self, handle: ClientHandle) -> Option<&Client> {
        self.clients.iter().find(|c| c.handle == handle)
    }

    pub fn client_mut(&mut self, handle: ClientHandle) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.handle == handle)
    }

    /// Move a client to the front of the registry order, making it the next
    /// main-area candidate under tiling.
    pub fn move_to_front(&mut self, handle: ClientHandle) -> Option<()> {
        let index = self.clients.iter().position(|c| c.handle == handle)?;
        let client = self.clients.remove(index);
        self.clients.insert(0, client);
        Some(())
    }

    // -- geometry helpers --

    /// The monitor area available to windows. The primary monitor loses the
    /// bar strip from whichever edge the bar occupies.
    #[must_use]
    pub fn window_area(&self, index: usize) -> Geometry {
        let geometry = self.monitors[index].geometry;
        if index == 0 {
            Geometry {
                x: geometry.x,
                y: if self.bar.top {
                    geometry.y + self.bar.height
                } else {
                    geometry.y
                },
                w: geometry.w,
                h: geometry.h - self.bar.height,
            }
        } else {
            geometry
        }
    }

    #[must_use]
    pub fn monitor_at(&self, x: i32, y: i32) -> Option<usize> {
        self.monitors.iter().position(|m| m.contains_point(x, y))
    }

    /// Whether the pointer rides the screen edge the bar lives on.
    #[must_use]
    pub fn in_bar_zone(&self, x: i32, y: i32) -> bool {
        let Some(primary) = self.monitors.first() else {
            return false;
        };
        let g = primary.geometry;
        let on_edge = if self.bar.top {
            y <= g.y
        } else {
            y >= g.bottom() - 1
        };
        on_edge && x >= g.x && x <= g.right()
    }

    fn screen_extent(&self) -> (i32, i32) {
        self.monitors.iter().fold((0, 0), |(w, h), m| {
            (w.max(m.geometry.right()), h.max(m.geometry.bottom()))
        })
    }

    // -- sizing --

    /// Apply a requested geometry to a client: remember it in the floating
    /// shadow, snap floating clients to nearby monitor edges, keep a corner
    /// on screen, clamp to the size hints, and emit one configure effect if
    /// anything actually changed. The layout engine funnels through here so
    /// tiled and interactive sizing obey the same rules.
    pub fn resize_client(&mut self, handle: ClientHandle, x: i32, y: i32, w: i32, h: i32) {
        let Some(index) = self.clients.iter().position(|c| c.handle == handle) else {
            return;
        };
        let (floating, fullscreen, border) = {
            let c = &self.clients[index];
            (c.floating(), c.fullscreen, c.border)
        };
        let (mut x, mut y, mut w, mut h) = (x, y, w, h);
        if floating && !fullscreen {
            // The shadow keeps the raw request so a drag keeps accumulating
            // from where the user put the window, not where it snapped to.
            self.clients[index].set_floating_geometry(Geometry::new(x, y, w, h));
            if !self.monitors.is_empty() {
                let last = self.monitors.len() - 1;
                let top_left = self.monitor_at(x + self.snap, y + self.snap).unwrap_or(last);
                let bottom_right = self
                    .monitor_at(x + w - self.snap, y + h - self.snap)
                    .unwrap_or(last);
                let near = self.window_area(top_left);
                let far = self.window_area(bottom_right);
                if (near.x - x).abs() < self.snap {
                    x = near.x;
                }
                if (near.y - y).abs() < self.snap {
                    y = near.y;
                }
                if (far.right() - (x + w + 2 * border)).abs() < self.snap {
                    w = far.right() - x - 2 * border;
                }
                if (far.bottom() - (y + h + 2 * border)).abs() < self.snap {
                    h = far.bottom() - y - 2 * border;
                }
            }
        }
        w = w.max(1);
        h = h.max(1);
        if !self.monitors.is_empty() {
            let (screen_w, screen_h) = self.screen_extent();
            if x > screen_w {
                x = screen_w - (w + 2 * border);
            }
            if y > screen_h {
                y = screen_h - (h + 2 * border);
            }
            if x + w + 2 * border < 0 {
                x = 0;
            }
            if y + h + 2 * border < 0 {
                y = 0;
            }
        }
        let (w, h) = self.clients[index].hints.constrain(w, h);
        let target = Geometry::new(x, y, w, h);
        let client = &mut self.clients[index];
        if client.geometry != target {
            client.geometry = target;
            let action = DisplayAction::ConfigureClient {
                handle,
                geometry: target,
                border: client.border,
            };
            self.actions.push_back(action);
        }
    }

    /// Apply a geometry verbatim, skipping snap and hint clamping. Used for
    /// fullscreen spans, which deliberately override client preferences.
    pub(crate) fn force_geometry(&mut self, handle: ClientHandle, geometry: Geometry) {
        if let Some(client) = self.client_mut(handle) {
            client.geometry = geometry;
            let action = DisplayAction::ConfigureClient {
                handle,
                geometry,
                border: client.border,
            };
            self.actions.push_back(action);
        }
    }

    // -- the arrange pipeline --

    /// Re-establish every global invariant after a structural change: focus
    /// falls back to something visible, visibility is applied, the layout is
    /// recomputed, and the stacking order is reissued.
    pub fn arrange(&mut self) {
        self.ensure_focus_visible();
        self.apply_visibility();
        layouts::arrange_monitors(self);
        self.restack();
    }

    fn apply_visibility(&mut self) {
        for index in 0..self.clients.len() {
            let (handle, on_view, was_visible, floating, fullscreen, shadow) = {
                let c = &self.clients[index];
                (
                    c.handle,
                    c.visible_on(self.tagset),
                    c.visible(),
                    c.floating(),
                    c.fullscreen,
                    c.floating_geometry(),
                )
            };
            if on_view {
                if floating && !fullscreen {
                    self.resize_client(handle, shadow.x, shadow.y, shadow.w, shadow.h);
                }
                if !was_visible {
                    let c = &self.clients[index];
                    let action = DisplayAction::ConfigureClient {
                        handle,
                        geometry: c.geometry,
                        border: c.border,
                    };
                    self.actions.push_back(action);
                }
                self.clients[index].set_visible(true);
            } else if was_visible {
                self.actions.push_back(DisplayAction::HideClient(handle));
                self.clients[index].set_visible(false);
            }
        }
    }

    /// The focused client must stay visible under the active view.
    pub(crate) fn ensure_focus_visible(&mut self) {
        let still_visible = self
            .focus_manager
            .client(&self.clients)
            .map_or(false, |c| c.visible_on(self.tagset));
        if !still_visible {
            self.focus_client(None);
        }
    }

    // -- stacking --

    /// Reissue the stacking order without changing any marker.
    pub fn restack(&mut self) {
        if let Some(pinned) = self.stack.pinned {
            if self.client(pinned).map_or(false, Client::floating) {
                let _ = self.move_to_front(pinned);
            }
        }
        let order = stacking_order(&self.clients, self.stack, self.bar_focused);
        self.actions.push_back(DisplayAction::RestackClients(order));
    }

    pub fn raise(&mut self, handle: Option<ClientHandle>) {
        self.stack.raise(handle);
        self.restack();
    }

    pub fn pin(&mut self, handle: ClientHandle) {
        self.stack.toggle_pin(handle);
        self.restack();
    }

    /// Promote a client to the front of the registry order and raise it.
    /// Zooming a tiled client reshuffles the layout, since registry order
    /// decides who owns the main area.
    pub fn zoom(&mut self, handle: Option<ClientHandle>) {
        if let Some(h) = handle {
            let tiled = self.client(h).map_or(false, |c| !c.floating());
            let _ = self.move_to_front(h);
            self.stack.raise(Some(h));
            if tiled {
                self.arrange();
                return;
            }
        } else {
            self.stack.raise(None);
        }
        self.restack();
    }

    // -- external text --

    pub fn status_changed(&mut self, text: String) {
        self.status = text;
        self.actions.push_back(DisplayAction::RefreshBar);
    }

    pub(crate) fn sync_monitor_settings(&mut self, factor: f32, count: usize) {
        self.main_factor.resize(self.monitors.len(), factor);
        self.main_count.resize(self.monitors.len(), count.max(1));
    }
}
