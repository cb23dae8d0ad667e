use crate::command::Command;
use crate::models::{Keysym, ModMask};
use serde::{Deserialize, Serialize};

/// A binding with the modifiers and key already resolved to protocol values.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Keybind {
    pub modmask: ModMask,
    pub keysym: Keysym,
    pub command: Command,
}

pub trait Config {
    /// Returns the full binding table with the mod keys mapped.
    fn mapped_bindings(&self) -> Vec<Keybind>;

    fn tag_labels(&self) -> Vec<String>;

    fn border_width(&self) -> i32;

    /// Pixel distance within which a dragged edge aligns to a monitor
    /// boundary.
    fn snap_distance(&self) -> i32;

    /// Initial main-column fraction for every monitor.
    fn main_factor(&self) -> f32;

    /// Initial main-column client count for every monitor.
    fn main_count(&self) -> usize;

    fn bar_height(&self) -> i32;

    fn bar_on_top(&self) -> bool;

    /// Seconds a focused client's rapid retitles are kept off the bar.
    fn title_cooldown_secs(&self) -> u32;

    /// Releasing this key after a stack-cycle grab zooms the focused client.
    fn stack_release_key(&self) -> Keysym;
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct TestConfig {
    pub tags: Vec<String>,
    pub bindings: Vec<Keybind>,
}

#[cfg(test)]
impl TestConfig {
    pub fn new(tags: Vec<String>) -> Self {
        let tags = if tags.is_empty() {
            (1..=9).map(|n| n.to_string()).collect()
        } else {
            tags
        };
        Self {
            tags,
            bindings: vec![],
        }
    }
}

#[cfg(test)]
impl Config for TestConfig {
    fn mapped_bindings(&self) -> Vec<Keybind> {
        self.bindings.clone()
    }
    fn tag_labels(&self) -> Vec<String> {
        self.tags.clone()
    }
    fn border_width(&self) -> i32 {
        0
    }
    fn snap_distance(&self) -> i32 {
        8
    }
    fn main_factor(&self) -> f32 {
        0.6
    }
    fn main_count(&self) -> usize {
        1
    }
    fn bar_height(&self) -> i32 {
        0
    }
    fn bar_on_top(&self) -> bool {
        true
    }
    fn title_cooldown_secs(&self) -> u32 {
        0
    }
    fn stack_release_key(&self) -> Keysym {
        0xffe9
    }
}
