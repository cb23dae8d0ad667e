//! The workspace model: a tag is a bit position, a view is a bit mask.
use serde::{Deserialize, Serialize};

/// The widest supported tag table; a full mask over this many tags still
/// fits a `u32` with room to spare.
pub const MAX_TAGS: usize = 31;

/// A set of tags. Clients carry one of these for membership; the active view
/// is one of these as well.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagMask(u32);

impl TagMask {
    #[must_use]
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// The mask selecting only the first tag.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// The mask selecting every one of `count` tags.
    #[must_use]
    pub const fn all(count: usize) -> Self {
        Self((1 << count) - 1)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn toggled(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Drop any bits beyond the configured tag count.
    #[must_use]
    pub const fn masked(self, count: usize) -> Self {
        Self(self.0 & Self::all(count).0)
    }

    #[must_use]
    pub const fn contains_bit(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    /// Rotate the mask by `delta` positions through `count` tag bits,
    /// wrapping at both ends.
    #[must_use]
    pub fn shifted(self, delta: i32, count: usize) -> Self {
        if count == 0 {
            return self;
        }
        let bits = self.masked(count).0;
        let d = delta.rem_euclid(count as i32) as u32;
        if d == 0 {
            return Self(bits);
        }
        Self(((bits << d) | (bits >> (count as u32 - d))) & Self::all(count).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_rotates_through_all_bits() {
        let mask = TagMask::new(0b1);
        assert_eq!(mask.shifted(1, 9).bits(), 0b10);
        assert_eq!(mask.shifted(-1, 9).bits(), 0b1_0000_0000);
        assert_eq!(TagMask::new(0b1_0000_0000).shifted(1, 9).bits(), 0b1);
    }

    #[test]
    fn shift_is_invertible() {
        for bits in [0b1, 0b101, 0b1_1000_0000, 0b1_1111_1111] {
            let mask = TagMask::new(bits);
            assert_eq!(mask.shifted(1, 9).shifted(-1, 9), mask);
            assert_eq!(mask.shifted(-4, 9).shifted(4, 9), mask);
        }
    }

    #[test]
    fn shift_handles_deltas_beyond_the_tag_count() {
        let mask = TagMask::new(0b10);
        assert_eq!(mask.shifted(9, 9), mask);
        assert_eq!(mask.shifted(10, 9), mask.shifted(1, 9));
    }

    #[test]
    fn toggle_is_self_inverse() {
        let view = TagMask::new(0b101);
        let bit = TagMask::new(0b10);
        assert_eq!(view.toggled(bit).toggled(bit), view);
    }

    #[test]
    fn masked_drops_out_of_range_bits() {
        let mask = TagMask::new(u32::MAX);
        assert_eq!(mask.masked(4).bits(), 0b1111);
    }
}
