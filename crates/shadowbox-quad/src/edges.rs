bitflags::bitflags! {
    /// The edges of a shadow container that reserve room for the shadow.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Edges: u8 {
        const LEFT = 0b0001;
        const TOP = 0b0010;
        const RIGHT = 0b0100;
        const BOTTOM = 0b1000;

        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Default for Edges {
    fn default() -> Self {
        Edges::ALL
    }
}
