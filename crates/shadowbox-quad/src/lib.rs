mod edges;

pub mod geometry;
pub mod primitive;
pub mod style;

pub use edges::Edges;
pub use geometry::{DrawRect, Padding, ShadowGeometry};
pub use primitive::{ShadowQuadPrimitive, ShadowRequest};
pub use style::{StyleConfig, StyleConfigBuilder, StyleError};
