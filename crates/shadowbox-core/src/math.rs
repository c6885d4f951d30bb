use std::ops::Mul;

pub use euclid;

/// Units in physical (device) pixels.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Physical;

/// A point in units of physical pixels.
pub type PhysicalPoint = euclid::Point2D<f32, Physical>;
/// A point in units of physical pixels.
pub type PhysicalPointI32 = euclid::Point2D<i32, Physical>;

/// An offset in units of physical pixels.
pub type PhysicalVector = euclid::Vector2D<f32, Physical>;

/// A size in units of physical pixels.
pub type PhysicalSizeU32 = euclid::Size2D<u32, Physical>;

/// A box in units of physical pixels, stored as its `min` (left, top) and
/// `max` (right, bottom) corners.
///
/// Unlike a [`euclid::Rect`], a box may be negative (`max < min` on an axis).
pub type PhysicalBox2D = euclid::Box2D<f32, Physical>;
/// A box in units of physical pixels.
pub type PhysicalBox2DI32 = euclid::Box2D<i32, Physical>;
/// A box in units of physical pixels.
pub type PhysicalBox2DU32 = euclid::Box2D<u32, Physical>;

/// Insets on the four sides of a box, in physical pixels.
///
/// Alias for ```euclid::SideOffsets2D<u32, Physical>```.
pub type PhysicalSideOffsetsU32 = euclid::SideOffsets2D<u32, Physical>;

/// Shorthand for `PhysicalVector::new(x, y)`.
#[inline]
pub const fn vector(x: f32, y: f32) -> PhysicalVector {
    PhysicalVector::new(x, y)
}

/// Shorthand for `PhysicalSizeU32::new(w, h)`.
#[inline]
pub const fn size_u32(w: u32, h: u32) -> PhysicalSizeU32 {
    PhysicalSizeU32::new(w, h)
}

/// A scaling factor in physical pixels per logical point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleFactor(pub f32);

impl ScaleFactor {
    pub fn new(scale_factor: f32) -> Self {
        Self(scale_factor)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Mul<ScaleFactor> for f32 {
    type Output = f32;
    fn mul(self, rhs: ScaleFactor) -> Self::Output {
        self * rhs.0
    }
}

/// Convert a length from logical points to physical pixels.
#[inline]
pub fn to_physical_length(length: f32, scale_factor: ScaleFactor) -> f32 {
    length * scale_factor
}
