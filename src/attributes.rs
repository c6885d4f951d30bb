//! Reading a [`StyleConfig`] from the styled attributes of a host toolkit.

use rustc_hash::FxHashMap;

use crate::color::{self, RGBA8};
use crate::math::{self, ScaleFactor};
use crate::quad::{StyleConfig, StyleError};

/// The styled attributes a shadow container understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Alpha,
    ShadowColor,
    ShadowLimit,
    CornerRadius,
    Dx,
    Dy,
    LeftShow,
    TopShow,
    RightShow,
    BottomShow,
}

impl Attribute {
    pub const ALL: [Attribute; 10] = [
        Attribute::Alpha,
        Attribute::ShadowColor,
        Attribute::ShadowLimit,
        Attribute::CornerRadius,
        Attribute::Dx,
        Attribute::Dy,
        Attribute::LeftShow,
        Attribute::TopShow,
        Attribute::RightShow,
        Attribute::BottomShow,
    ];

    /// The name of the attribute as it appears in markup.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Alpha => "alpha",
            Attribute::ShadowColor => "shadowColor",
            Attribute::ShadowLimit => "shadowLimit",
            Attribute::CornerRadius => "cornerRadius",
            Attribute::Dx => "dx",
            Attribute::Dy => "dy",
            Attribute::LeftShow => "leftShow",
            Attribute::TopShow => "topShow",
            Attribute::RightShow => "rightShow",
            Attribute::BottomShow => "bottomShow",
        }
    }
}

/// A source of attribute values, such as a host toolkit's styled attribute
/// set.
///
/// Every getter returns `None` when the attribute is absent or has a
/// different type, in which case the default value is used.
pub trait AttributeSource {
    fn float(&self, attr: Attribute) -> Option<f32>;

    /// A dimension, already resolved to physical pixels.
    fn dimension(&self, attr: Attribute) -> Option<f32>;

    fn boolean(&self, attr: Attribute) -> Option<bool>;

    fn color(&self, attr: Attribute) -> Option<RGBA8>;
}

/// A dimension stored in an [`AttributeMap`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// Physical pixels.
    Px(f32),
    /// Logical points, scaled by the map's [`ScaleFactor`].
    Points(f32),
}

impl Dimension {
    pub fn to_physical(self, scale_factor: ScaleFactor) -> f32 {
        match self {
            Dimension::Px(px) => px,
            Dimension::Points(pt) => math::to_physical_length(pt, scale_factor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Float(f32),
    Dimension(Dimension),
    Boolean(bool),
    Color(RGBA8),
}

impl From<f32> for AttributeValue {
    fn from(v: f32) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<Dimension> for AttributeValue {
    fn from(v: Dimension) -> Self {
        AttributeValue::Dimension(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Boolean(v)
    }
}

impl From<RGBA8> for AttributeValue {
    fn from(v: RGBA8) -> Self {
        AttributeValue::Color(v)
    }
}

/// An in-memory [`AttributeSource`].
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    values: FxHashMap<Attribute, AttributeValue>,
    scale_factor: ScaleFactor,
}

impl AttributeMap {
    pub fn new(scale_factor: ScaleFactor) -> Self {
        Self {
            values: FxHashMap::default(),
            scale_factor,
        }
    }

    pub fn scale_factor(&self) -> ScaleFactor {
        self.scale_factor
    }

    pub fn set(&mut self, attr: Attribute, value: impl Into<AttributeValue>) -> &mut Self {
        self.values.insert(attr, value.into());
        self
    }

    pub fn with(mut self, attr: Attribute, value: impl Into<AttributeValue>) -> Self {
        self.set(attr, value);
        self
    }

    pub fn remove(&mut self, attr: Attribute) -> Option<AttributeValue> {
        self.values.remove(&attr)
    }

    pub fn get(&self, attr: Attribute) -> Option<AttributeValue> {
        self.values.get(&attr).copied()
    }
}

impl AttributeSource for AttributeMap {
    fn float(&self, attr: Attribute) -> Option<f32> {
        match self.get(attr)? {
            AttributeValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn dimension(&self, attr: Attribute) -> Option<f32> {
        match self.get(attr)? {
            AttributeValue::Dimension(d) => Some(d.to_physical(self.scale_factor)),
            // Bare numbers are taken as pixels.
            AttributeValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn boolean(&self, attr: Attribute) -> Option<bool> {
        match self.get(attr)? {
            AttributeValue::Boolean(v) => Some(v),
            _ => None,
        }
    }

    fn color(&self, attr: Attribute) -> Option<RGBA8> {
        match self.get(attr)? {
            AttributeValue::Color(v) => Some(v),
            _ => None,
        }
    }
}

/// Builds a [`StyleConfig`] from an attribute source.
///
/// Absent attributes take their defaults: every edge is shown, the alpha is
/// `1.0`, the extents and offsets are `0.0`, and the color is
/// [`color::DEFAULT_SHADOW_COLOR`].
pub fn style_from_attributes(source: &impl AttributeSource) -> Result<StyleConfig, StyleError> {
    StyleConfig::builder()
        .alpha(source.float(Attribute::Alpha).unwrap_or(1.0))
        .show_left(source.boolean(Attribute::LeftShow).unwrap_or(true))
        .show_right(source.boolean(Attribute::RightShow).unwrap_or(true))
        .show_bottom(source.boolean(Attribute::BottomShow).unwrap_or(true))
        .show_top(source.boolean(Attribute::TopShow).unwrap_or(true))
        .corner_radius(source.dimension(Attribute::CornerRadius).unwrap_or(0.0))
        .blur_extent(source.dimension(Attribute::ShadowLimit).unwrap_or(0.0))
        .dx(source.dimension(Attribute::Dx).unwrap_or(0.0))
        .dy(source.dimension(Attribute::Dy).unwrap_or(0.0))
        .color(
            source
                .color(Attribute::ShadowColor)
                .unwrap_or(color::DEFAULT_SHADOW_COLOR),
        )
        .build()
}
