/// Visibility set: a 32-bit mask of layer memberships.
///
/// Nodes carry the layers they belong to; cameras carry the layers they
/// render. A node is visible to a camera when the two masks intersect.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Layers(u32);

impl Layers {
    pub const NONE: Self = Self(0);

    /// Set {0}: the default membership of new nodes and cameras.
    pub const DEFAULT: Self = Self(1);

    /// Set {1}: background content seen only by the backdrop camera.
    pub const BACKGROUND: Self = Self(1 << 1);

    /// Mask containing exactly `layer`. Layers outside `0..32` yield an empty set.
    #[inline]
    pub const fn only(layer: u32) -> Self {
        if layer < 32 { Self(1 << layer) } else { Self::NONE }
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_layer_zero() {
        assert_eq!(Layers::default(), Layers::only(0));
        assert!(Layers::default().intersects(Layers::only(0)));
        assert!(!Layers::default().intersects(Layers::only(1)));
    }

    #[test]
    fn background_and_default_are_disjoint() {
        assert!(!Layers::BACKGROUND.intersects(Layers::DEFAULT));
        assert!(Layers::BACKGROUND.intersects(Layers::only(1)));
    }

    #[test]
    fn background_is_layer_one() {
        assert_eq!(Layers::BACKGROUND, Layers::only(1));
    }

    #[test]
    fn out_of_range_layer_is_empty() {
        assert_eq!(Layers::only(32), Layers::NONE);
        assert!(!Layers::NONE.intersects(Layers::DEFAULT));
    }
}
