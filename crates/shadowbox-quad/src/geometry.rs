use shadowbox_core::math::{
    PhysicalBox2D, PhysicalBox2DU32, PhysicalPoint, PhysicalSideOffsetsU32, PhysicalSizeU32,
};

use crate::{Edges, StyleConfig};

/// The insets a shadow container reserves inside its own bounds so the
/// shadow around its children is not clipped.
pub type Padding = PhysicalSideOffsetsU32;

/// The rectangle, in bitmap coordinates, that the rounded rectangle casting
/// the shadow is filled into.
///
/// `min` is the (left, top) corner and `max` is the (right, bottom) corner.
/// When the container is too small for its shadow this box is negative.
pub type DrawRect = PhysicalBox2D;

/// Computes the padding insets for a style.
///
/// Each shown edge reserves `floor(blur_extent + |offset|)` pixels along its
/// axis. Hidden edges reserve nothing. The result does not depend on the size
/// of the container.
pub fn padding(style: &StyleConfig) -> Padding {
    let x_pad = (style.blur_extent() + style.dx().abs()).floor() as u32;
    let y_pad = (style.blur_extent() + style.dy().abs()).floor() as u32;

    let edges = style.edges();
    let side = |edge: Edges, pad: u32| if edges.contains(edge) { pad } else { 0 };

    Padding::new(
        side(Edges::TOP, y_pad),
        side(Edges::RIGHT, x_pad),
        side(Edges::BOTTOM, y_pad),
        side(Edges::LEFT, x_pad),
    )
}

/// Computes the rectangle the shadow-casting fill is drawn into for a bitmap
/// of the given size.
///
/// The rectangle is first inset by the blur extent on all four sides and
/// then shrunk by `|dx|` on both horizontal ends and by `|dy|` on both
/// vertical ends. It is never translated: the rasterizer applies the signed
/// offset itself when it casts the shadow.
///
/// The result may be negative; see [`is_degenerate`].
pub fn draw_rect(style: &StyleConfig, size: PhysicalSizeU32) -> DrawRect {
    let blur = style.blur_extent();
    let dx = style.dx().abs();
    let dy = style.dy().abs();

    let mut left = blur;
    let mut top = blur;
    let mut right = size.width as f32 - blur;
    let mut bottom = size.height as f32 - blur;

    top += dy;
    bottom -= dy;
    left += dx;
    right -= dx;

    DrawRect::new(
        PhysicalPoint::new(left, top),
        PhysicalPoint::new(right, bottom),
    )
}

/// Whether a draw rect has collapsed, i.e. `right < left` or `bottom < top`.
///
/// A rasterizer must treat a degenerate rect as a no-op fill.
#[inline]
pub fn is_degenerate(rect: &DrawRect) -> bool {
    rect.is_negative()
}

/// The area left for children of a container of `size` once `padding` is
/// reserved. Collapses to an empty box when the padding does not fit.
pub fn content_box(padding: &Padding, size: PhysicalSizeU32) -> PhysicalBox2DU32 {
    let min_x = padding.left.min(size.width);
    let min_y = padding.top.min(size.height);
    let max_x = size.width.saturating_sub(padding.right).max(min_x);
    let max_y = size.height.saturating_sub(padding.bottom).max(min_y);

    PhysicalBox2DU32::new((min_x, min_y).into(), (max_x, max_y).into())
}

/// The padding and draw rect of a shadow container at one size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowGeometry {
    pub size: PhysicalSizeU32,
    pub padding: Padding,
    pub draw_rect: DrawRect,
}

impl ShadowGeometry {
    pub fn compute(style: &StyleConfig, size: PhysicalSizeU32) -> Self {
        let geometry = Self {
            size,
            padding: padding(style),
            draw_rect: draw_rect(style, size),
        };

        log::trace!("shadow geometry: {geometry:?}");

        geometry
    }

    pub fn is_degenerate(&self) -> bool {
        is_degenerate(&self.draw_rect)
    }

    pub fn content_box(&self) -> PhysicalBox2DU32 {
        content_box(&self.padding, self.size)
    }
}
