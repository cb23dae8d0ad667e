//! The tiling layout engine: one main column and one stack column per
//! monitor, fed by registry order.

use crate::models::Client;
use crate::state::State;

pub const MIN_MAIN_FACTOR: f32 = 0.05;
pub const MAX_MAIN_FACTOR: f32 = 0.95;

/// The monitor a client belongs to: the first monitor containing the center
/// of its frame, or the last monitor for clients outside every one.
pub(crate) fn monitor_for(state: &State, client: &Client) -> usize {
    let center_x = client.geometry.x + client.outer_w() / 2;
    let center_y = client.geometry.y + client.outer_h() / 2;
    state
        .monitor_at(center_x, center_y)
        .unwrap_or(state.monitors.len() - 1)
}

/// Retile every visible, non-floating client.
///
/// Within a monitor holding `n` tiled clients, the first
/// `min(n, main_count)` fill a main column sized by `main_factor` when the
/// stack overflows (full width otherwise); the rest fill a stack column to
/// its right. Columns divide the remaining height by the remaining client
/// count at each step, so rounding leftovers sink to the last client rather
/// than opening a gap.
pub fn arrange_monitors(state: &mut State) {
    if state.monitors.is_empty() {
        return;
    }
    let view = state.tagset;
    let tiled: Vec<_> = state
        .clients
        .iter()
        .filter(|c| !c.floating() && c.visible_on(view))
        .map(|c| (c.handle, monitor_for(state, c)))
        .collect();

    let mut counts = vec![0_usize; state.monitors.len()];
    for &(_, monitor) in &tiled {
        counts[monitor] += 1;
    }

    let mut placed = vec![0_usize; state.monitors.len()];
    let mut main_y = vec![0_i32; state.monitors.len()];
    let mut stack_y = vec![0_i32; state.monitors.len()];
    for (handle, monitor) in tiled {
        let area = state.window_area(monitor);
        let n = counts[monitor];
        let index = placed[monitor];
        let main_count = state.main_count[monitor].max(1);
        let main_w = if n > main_count {
            (area.w as f32 * state.main_factor[monitor]) as i32
        } else {
            area.w
        };
        let border = state.client(handle).map_or(0, |c| c.border);
        if index < main_count {
            let remaining = (n.min(main_count) - index) as i32;
            let h = (area.h - main_y[monitor]) / remaining;
            state.resize_client(
                handle,
                area.x,
                area.y + main_y[monitor],
                main_w - 2 * border,
                h - 2 * border,
            );
            let outer = state.client(handle).map_or(0, Client::outer_h);
            if main_y[monitor] + outer < area.h {
                main_y[monitor] += outer;
            }
        } else {
            let remaining = (n - index) as i32;
            let h = (area.h - stack_y[monitor]) / remaining;
            state.resize_client(
                handle,
                area.x + main_w,
                area.y + stack_y[monitor],
                area.w - main_w - 2 * border,
                h - 2 * border,
            );
            let outer = state.client(handle).map_or(0, Client::outer_h);
            if stack_y[monitor] + outer < area.h {
                stack_y[monitor] += outer;
            }
        }
        placed[monitor] += 1;
    }
}
