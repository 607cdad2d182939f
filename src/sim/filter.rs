//! Collision categories and the who-collides-with-whom policy
//!
//! Categories are single-bit masks so new kinds compose with `|`.

use serde::{Deserialize, Serialize};

/// Bitmask collision category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionCategory(u32);

impl CollisionCategory {
    pub const NONE: Self = Self(0);
    pub const PLAYER: Self = Self(0b01);
    pub const OBSTACLE: Self = Self(0b10);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// True if any bit is shared
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NONE => "none",
            Self::PLAYER => "player",
            Self::OBSTACLE => "obstacle",
            _ => "mixed",
        }
    }
}

impl std::ops::BitOr for CollisionCategory {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for CollisionCategory {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Rule table of category pairs that are contact-tested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    rules: Vec<(CollisionCategory, CollisionCategory)>,
}

impl Default for CollisionFilter {
    /// Player vs obstacle only
    fn default() -> Self {
        let mut filter = Self::empty();
        filter.allow(CollisionCategory::PLAYER, CollisionCategory::OBSTACLE);
        filter
    }
}

impl CollisionFilter {
    /// A filter that tests nothing
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Declare a testable pair. Pairs involving NONE or identical masks are
    /// ignored since they can never test.
    pub fn allow(&mut self, a: CollisionCategory, b: CollisionCategory) -> &mut Self {
        if a.is_none() || b.is_none() || a == b {
            log::warn!("Ignoring collision rule {} vs {}", a.name(), b.name());
            return self;
        }
        if !self.rules.contains(&(a, b)) && !self.rules.contains(&(b, a)) {
            self.rules.push((a, b));
        }
        self
    }

    /// Whether a contact between the two categories should be tested.
    /// Symmetric, pure, false for NONE and for identical categories.
    pub fn should_test(&self, a: CollisionCategory, b: CollisionCategory) -> bool {
        if a.is_none() || b.is_none() || a == b {
            return false;
        }
        self.rules.iter().any(|&(x, y)| {
            (a.intersects(x) && b.intersects(y)) || (a.intersects(y) && b.intersects(x))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PLAYER: CollisionCategory = CollisionCategory::PLAYER;
    const OBSTACLE: CollisionCategory = CollisionCategory::OBSTACLE;
    const NONE: CollisionCategory = CollisionCategory::NONE;

    #[test]
    fn test_player_obstacle_pair() {
        let filter = CollisionFilter::default();
        assert!(filter.should_test(PLAYER, OBSTACLE));
        assert!(filter.should_test(OBSTACLE, PLAYER));
    }

    #[test]
    fn test_rejected_pairs() {
        let filter = CollisionFilter::default();
        assert!(!filter.should_test(PLAYER, PLAYER));
        assert!(!filter.should_test(OBSTACLE, OBSTACLE));
        assert!(!filter.should_test(NONE, PLAYER));
        assert!(!filter.should_test(OBSTACLE, NONE));
        assert!(!filter.should_test(NONE, NONE));
    }

    #[test]
    fn test_masks_are_distinct_single_bits() {
        assert_eq!(PLAYER.bits().count_ones(), 1);
        assert_eq!(OBSTACLE.bits().count_ones(), 1);
        assert!(!PLAYER.intersects(OBSTACLE));
    }

    #[test]
    fn test_composed_category() {
        let projectile = CollisionCategory::from_bits(0b100);
        let mut filter = CollisionFilter::default();
        filter.allow(projectile, OBSTACLE);

        assert!(filter.should_test(projectile, OBSTACLE));
        assert!(!filter.should_test(projectile, PLAYER));
        // A mask carrying both player and projectile bits still hits obstacles
        assert!(filter.should_test(PLAYER | projectile, OBSTACLE));
        assert_eq!((PLAYER | projectile) & PLAYER, PLAYER);
    }

    #[test]
    fn test_degenerate_rules_ignored() {
        let mut filter = CollisionFilter::empty();
        filter.allow(PLAYER, PLAYER).allow(NONE, OBSTACLE);
        assert_eq!(filter, CollisionFilter::empty());
        assert!(!filter.should_test(PLAYER, OBSTACLE));
    }

    proptest! {
        #[test]
        fn prop_filter_symmetric(a in 0u32..8, b in 0u32..8) {
            let filter = CollisionFilter::default();
            let a = CollisionCategory::from_bits(a);
            let b = CollisionCategory::from_bits(b);
            prop_assert_eq!(filter.should_test(a, b), filter.should_test(b, a));
        }

        #[test]
        fn prop_none_never_matches(a in any::<u32>()) {
            let filter = CollisionFilter::default();
            let a = CollisionCategory::from_bits(a);
            prop_assert!(!filter.should_test(a, NONE));
            prop_assert!(!filter.should_test(NONE, a));
        }
    }
}
