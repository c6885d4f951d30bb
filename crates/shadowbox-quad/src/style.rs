use shadowbox_core::color::{self, RGBA8};
use shadowbox_core::math::PhysicalVector;

use crate::Edges;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum StyleError {
    #[error("shadow alpha must be a number in the range 0.0..=1.0, got {0}")]
    InvalidAlpha(f32),
}

/// The styling of a drop shadow.
///
/// A `StyleConfig` is immutable once built. To change the styling, start a
/// new builder with [`StyleConfig::to_builder`] and build a new config.
/// Deserialized configs go through [`StyleConfigBuilder::build`] as well.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StyleConfigRaw"))]
pub struct StyleConfig {
    alpha: f32,
    color: RGBA8,
    blur_extent: f32,
    corner_radius: f32,
    offset: PhysicalVector,
    edges: Edges,
}

impl StyleConfig {
    pub fn builder() -> StyleConfigBuilder {
        StyleConfigBuilder::new()
    }

    pub fn to_builder(&self) -> StyleConfigBuilder {
        StyleConfigBuilder { style: *self }
    }

    /// The opacity of the shadow in the range `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The opacity of the shadow as an 8 bit channel, `round(alpha * 255)`.
    pub fn alpha_u8(&self) -> u8 {
        color::alpha_to_u8(self.alpha)
    }

    /// The color of the shadow.
    pub fn color(&self) -> RGBA8 {
        self.color
    }

    /// The color the rounded rectangle itself is filled with. Only the shadow
    /// is ever visible.
    pub fn fill_color(&self) -> RGBA8 {
        color::TRANSPARENT
    }

    /// How far the shadow spreads outward, in physical pixels.
    pub fn blur_extent(&self) -> f32 {
        self.blur_extent
    }

    /// The corner radius of the rounded rectangle, in physical pixels.
    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// The offset of the shadow from the content, in physical pixels.
    pub fn offset(&self) -> PhysicalVector {
        self.offset
    }

    pub fn dx(&self) -> f32 {
        self.offset.x
    }

    pub fn dy(&self) -> f32 {
        self.offset.y
    }

    /// The edges that reserve room for the shadow.
    pub fn edges(&self) -> Edges {
        self.edges
    }

    pub fn show_left(&self) -> bool {
        self.edges.contains(Edges::LEFT)
    }

    pub fn show_top(&self) -> bool {
        self.edges.contains(Edges::TOP)
    }

    pub fn show_right(&self) -> bool {
        self.edges.contains(Edges::RIGHT)
    }

    pub fn show_bottom(&self) -> bool {
        self.edges.contains(Edges::BOTTOM)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            color: color::DEFAULT_SHADOW_COLOR,
            blur_extent: 0.0,
            corner_radius: 0.0,
            offset: PhysicalVector::zero(),
            edges: Edges::ALL,
        }
    }
}

pub struct StyleConfigBuilder {
    style: StyleConfig,
}

impl StyleConfigBuilder {
    pub fn new() -> Self {
        Self {
            style: StyleConfig::default(),
        }
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.style.alpha = alpha;
        self
    }

    pub fn color(mut self, color: impl Into<RGBA8>) -> Self {
        self.style.color = color.into();
        self
    }

    pub fn blur_extent(mut self, blur_extent: f32) -> Self {
        self.style.blur_extent = blur_extent;
        self
    }

    pub fn corner_radius(mut self, corner_radius: f32) -> Self {
        self.style.corner_radius = corner_radius;
        self
    }

    pub fn offset(mut self, offset: PhysicalVector) -> Self {
        self.style.offset = offset;
        self
    }

    pub fn dx(mut self, dx: f32) -> Self {
        self.style.offset.x = dx;
        self
    }

    pub fn dy(mut self, dy: f32) -> Self {
        self.style.offset.y = dy;
        self
    }

    pub fn edges(mut self, edges: Edges) -> Self {
        self.style.edges = edges;
        self
    }

    pub fn show_left(self, show: bool) -> Self {
        self.show_edge(Edges::LEFT, show)
    }

    pub fn show_top(self, show: bool) -> Self {
        self.show_edge(Edges::TOP, show)
    }

    pub fn show_right(self, show: bool) -> Self {
        self.show_edge(Edges::RIGHT, show)
    }

    pub fn show_bottom(self, show: bool) -> Self {
        self.show_edge(Edges::BOTTOM, show)
    }

    fn show_edge(mut self, edge: Edges, show: bool) -> Self {
        self.style.edges.set(edge, show);
        self
    }

    /// Validates and normalizes the style.
    ///
    /// An alpha outside of `0.0..=1.0` is clamped, and a negative (or NaN)
    /// blur extent or corner radius is treated as zero. Only a NaN alpha is
    /// rejected.
    pub fn build(self) -> Result<StyleConfig, StyleError> {
        let mut style = self.style;

        if style.alpha.is_nan() {
            return Err(StyleError::InvalidAlpha(style.alpha));
        }
        if !(0.0..=1.0).contains(&style.alpha) {
            log::warn!(
                "Shadow alpha {} is outside of the 0.0..=1.0 range, clamping.",
                style.alpha
            );
            style.alpha = style.alpha.clamp(0.0, 1.0);
        }

        style.blur_extent = non_negative("blur extent", style.blur_extent);
        style.corner_radius = non_negative("corner radius", style.corner_radius);

        Ok(style)
    }
}

impl Default for StyleConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<StyleConfig> for StyleConfigBuilder {
    fn from(style: StyleConfig) -> Self {
        style.to_builder()
    }
}

/// The unvalidated fields of a [`StyleConfig`] as they appear in serialized
/// form. Missing fields take their default values.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct StyleConfigRaw {
    alpha: f32,
    color: RGBA8,
    blur_extent: f32,
    corner_radius: f32,
    offset: PhysicalVector,
    edges: Edges,
}

#[cfg(feature = "serde")]
impl Default for StyleConfigRaw {
    fn default() -> Self {
        let style = StyleConfig::default();
        Self {
            alpha: style.alpha,
            color: style.color,
            blur_extent: style.blur_extent,
            corner_radius: style.corner_radius,
            offset: style.offset,
            edges: style.edges,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<StyleConfigRaw> for StyleConfig {
    type Error = StyleError;

    fn try_from(raw: StyleConfigRaw) -> Result<Self, Self::Error> {
        StyleConfig::builder()
            .alpha(raw.alpha)
            .color(raw.color)
            .blur_extent(raw.blur_extent)
            .corner_radius(raw.corner_radius)
            .offset(raw.offset)
            .edges(raw.edges)
            .build()
    }
}

fn non_negative(name: &str, value: f32) -> f32 {
    if value >= 0.0 {
        value
    } else {
        log::warn!("Shadow {name} must not be negative, got {value}. Using 0.0.");
        0.0
    }
}

/// Shorthand for a style with the given blur extent and offset, showing all
/// edges.
#[cfg(test)]
pub(crate) fn style(blur_extent: f32, dx: f32, dy: f32) -> StyleConfig {
    StyleConfig::builder()
        .blur_extent(blur_extent)
        .dx(dx)
        .dy(dy)
        .build()
        .unwrap()
}
