mod layout;
mod rasterizer;

pub mod attributes;
pub mod error;

pub use attributes::{style_from_attributes, AttributeMap, AttributeSource};
pub use error::ShadowError;
pub use layout::ShadowLayout;
pub use rasterizer::Rasterizer;

pub use shadowbox_core::*;

pub use shadowbox_quad as quad;
pub use shadowbox_quad::{ShadowGeometry, ShadowRequest, StyleConfig};
