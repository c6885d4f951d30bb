use bytemuck::{Pod, Zeroable};

use shadowbox_core::color::{PackedSrgb, RGBA8};
use shadowbox_core::math::{PhysicalSizeU32, PhysicalVector};

use crate::geometry::{self, DrawRect};
use crate::StyleConfig;

/// Everything a rasterizer needs to paint a shadow background.
///
/// The rasterizer is expected to produce a `size` bitmap containing a rounded
/// rectangle filled with `fill_color` at `draw_rect`, casting a shadow of
/// `shadow_color` that is blurred over `blur_extent` pixels and offset by
/// `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowRequest {
    /// The size of the bitmap in physical pixels.
    pub size: PhysicalSizeU32,
    /// Where the rounded rectangle is filled. May be degenerate.
    pub draw_rect: DrawRect,
    pub corner_radius: f32,
    /// The signed offset of the shadow.
    pub offset: PhysicalVector,
    pub blur_extent: f32,
    pub shadow_color: RGBA8,
    /// The opacity of the paint as an 8 bit channel.
    pub alpha: u8,
    pub fill_color: RGBA8,
}

impl ShadowRequest {
    pub fn new(style: &StyleConfig, size: PhysicalSizeU32) -> Self {
        Self {
            size,
            draw_rect: geometry::draw_rect(style, size),
            corner_radius: style.corner_radius(),
            offset: style.offset(),
            blur_extent: style.blur_extent(),
            shadow_color: style.color(),
            alpha: style.alpha_u8(),
            fill_color: style.fill_color(),
        }
    }

    /// Whether painting this request leaves the bitmap untouched.
    pub fn is_noop(&self) -> bool {
        self.size.is_empty() || geometry::is_degenerate(&self.draw_rect)
    }

    pub fn packed(&self) -> ShadowQuadPrimitive {
        ShadowQuadPrimitive::new(self)
    }
}

/// A [`ShadowRequest`] packed into a format for upload to a GPU rasterizer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShadowQuadPrimitive {
    /// The top-left corner of the fill in physical pixels.
    pub position: [f32; 2],

    /// The size of the fill in physical pixels. Zero when degenerate.
    pub size: [f32; 2],

    /// The size of the target bitmap in physical pixels.
    pub target_size: [f32; 2],

    /// The shadow offset in physical pixels.
    pub shadow_offset: [f32; 2],

    /// The shadow color, with alpha multiplied by the request's opacity.
    pub shadow_color: PackedSrgb,

    /// The fill color.
    pub fill_color: PackedSrgb,

    /// The corner radius of the fill in physical pixels.
    pub corner_radius: f32,

    /// The shadow blur radius in physical pixels.
    pub shadow_blur_radius: f32,
}

impl ShadowQuadPrimitive {
    pub fn new(request: &ShadowRequest) -> Self {
        let rect = &request.draw_rect;

        Self {
            position: [rect.min.x, rect.min.y],
            size: [
                (rect.max.x - rect.min.x).max(0.0),
                (rect.max.y - rect.min.y).max(0.0),
            ],
            target_size: [request.size.width as f32, request.size.height as f32],
            shadow_offset: request.offset.into(),
            shadow_color: PackedSrgb::from_srgba8_with_opacity(
                request.shadow_color,
                request.alpha,
            ),
            fill_color: request.fill_color.into(),
            corner_radius: request.corner_radius,
            shadow_blur_radius: request.blur_extent,
        }
    }
}

impl From<ShadowRequest> for ShadowQuadPrimitive {
    fn from(r: ShadowRequest) -> ShadowQuadPrimitive {
        r.packed()
    }
}

impl<'a> From<&'a ShadowRequest> for ShadowQuadPrimitive {
    fn from(r: &'a ShadowRequest) -> ShadowQuadPrimitive {
        r.packed()
    }
}

#[cfg(test)]
mod tests {
    use shadowbox_core::color;
    use shadowbox_core::math::{size_u32, vector};

    use super::*;

    fn styled() -> StyleConfig {
        StyleConfig::builder()
            .blur_extent(10.0)
            .corner_radius(6.0)
            .offset(vector(-4.0, 6.0))
            .color(color::BLACK)
            .alpha(0.5)
            .build()
            .unwrap()
    }

    #[test]
    fn request_carries_style() {
        let r = ShadowRequest::new(&styled(), size_u32(200, 200));
        assert_eq!(r.size, size_u32(200, 200));
        assert_eq!(
            (r.draw_rect.min.x, r.draw_rect.min.y, r.draw_rect.max.x, r.draw_rect.max.y),
            (14.0, 16.0, 186.0, 184.0)
        );
        assert_eq!(r.corner_radius, 6.0);
        assert_eq!(r.offset, vector(-4.0, 6.0));
        assert_eq!(r.blur_extent, 10.0);
        assert_eq!(r.shadow_color, color::BLACK);
        assert_eq!(r.alpha, 128);
        assert_eq!(r.fill_color, color::TRANSPARENT);
        assert!(!r.is_noop());
    }

    #[test]
    fn small_or_empty_requests_are_noops() {
        assert!(ShadowRequest::new(&styled(), size_u32(0, 0)).is_noop());
        assert!(ShadowRequest::new(&styled(), size_u32(20, 400)).is_noop());
        assert!(ShadowRequest::new(&StyleConfig::default(), size_u32(0, 10)).is_noop());
    }

    #[test]
    fn packing() {
        let p = ShadowRequest::new(&styled(), size_u32(200, 200)).packed();
        assert_eq!(p.position, [14.0, 16.0]);
        assert_eq!(p.size, [172.0, 168.0]);
        assert_eq!(p.target_size, [200.0, 200.0]);
        assert_eq!(p.shadow_offset, [-4.0, 6.0]);
        assert_eq!(
            [p.shadow_color.r(), p.shadow_color.g(), p.shadow_color.b()],
            [0.0, 0.0, 0.0]
        );
        assert!((p.shadow_color.a() - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(p.fill_color, PackedSrgb::TRANSPARENT);
        assert_eq!(p.corner_radius, 6.0);
        assert_eq!(p.shadow_blur_radius, 10.0);

        let bytes: &[u8] = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), std::mem::size_of::<ShadowQuadPrimitive>());
    }

    #[test]
    fn shadow_color_is_linearized() {
        let style = StyleConfig::builder()
            .blur_extent(4.0)
            .color(RGBA8::new(0x99, 0x99, 0x99, 0xFF))
            .alpha(0.2)
            .build()
            .unwrap();
        let p = ShadowRequest::new(&style, size_u32(64, 64)).packed();

        let linear = color::srgb8_to_f32(0x99);
        assert_eq!(p.shadow_color.r(), linear);
        assert_eq!(p.shadow_color.g(), linear);
        assert_eq!(p.shadow_color.b(), linear);
        assert!(p.shadow_color.r() < 0x99 as f32 / 255.0);
        assert!((p.shadow_color.a() - 51.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_packs_to_zero_size() {
        let p: ShadowQuadPrimitive = ShadowRequest::new(&styled(), size_u32(20, 400)).into();
        assert_eq!(p.size[0], 0.0);
    }
}
