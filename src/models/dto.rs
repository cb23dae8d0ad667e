//! Read-only projections of the state, consumed by the bar.
use crate::models::TagMask;
use crate::state::State;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TagState {
    pub label: String,
    /// At least one client carries this tag.
    pub occupied: bool,
    /// At least one urgent client carries this tag.
    pub urgent: bool,
    /// The tag is part of the active view.
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BarSnapshot {
    pub tags: Vec<TagState>,
    pub focused_title: String,
    pub status: String,
}

impl From<&State> for BarSnapshot {
    fn from(state: &State) -> Self {
        let mut occupied = TagMask::default();
        let mut urgent = TagMask::default();
        for client in &state.clients {
            occupied = occupied.union(client.tags);
            if client.urgent {
                urgent = urgent.union(client.tags);
            }
        }
        let tags = state
            .tag_labels
            .iter()
            .enumerate()
            .map(|(index, label)| TagState {
                label: label.clone(),
                occupied: occupied.contains_bit(index),
                urgent: urgent.contains_bit(index),
                active: state.tagset.contains_bit(index),
            })
            .collect();
        let focused_title = state
            .focus_manager
            .client(&state.clients)
            .map(|c| c.display_name().to_string())
            .unwrap_or_default();
        Self {
            tags,
            focused_title,
            status: state.status.clone(),
        }
    }
}
