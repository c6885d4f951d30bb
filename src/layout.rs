use crate::attributes::{style_from_attributes, AttributeSource};
use crate::error::ShadowError;
use crate::math::{PhysicalBox2DI32, PhysicalBox2DU32, PhysicalSizeU32};
use crate::quad::geometry;
use crate::quad::{Padding, ShadowGeometry, ShadowRequest, StyleConfig};
use crate::Rasterizer;

/// A container that draws a soft drop shadow behind its children.
///
/// `ShadowLayout` does not own any children itself. A host toolkit forwards
/// its size-change and layout callbacks to [`ShadowLayout::on_size_changed`]
/// and [`ShadowLayout::on_layout`], reserves [`ShadowLayout::padding`] inside
/// the container, and installs [`ShadowLayout::background`] as the
/// container's background.
pub struct ShadowLayout<R: Rasterizer> {
    style: StyleConfig,
    padding: Padding,
    rasterizer: R,
    background: Option<R::Output>,

    invalidate_on_size_changed: bool,
    force_invalidate: bool,
}

impl<R: Rasterizer> ShadowLayout<R> {
    pub fn new(style: StyleConfig, rasterizer: R) -> Self {
        Self {
            padding: geometry::padding(&style),
            style,
            rasterizer,
            background: None,
            invalidate_on_size_changed: true,
            force_invalidate: false,
        }
    }

    /// Create a new layout styled by the given attributes.
    pub fn from_attributes(
        attributes: &impl AttributeSource,
        rasterizer: R,
    ) -> Result<Self, ShadowError> {
        let style = style_from_attributes(attributes)?;
        Ok(Self::new(style, rasterizer))
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replace the style. The padding is recomputed immediately and the
    /// background is regenerated on the next size change or layout pass.
    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
        self.padding = geometry::padding(&style);
        self.invalidate_shadow();
    }

    /// The insets reserved for the shadow. These do not depend on the size of
    /// the container.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// The container has no minimum size of its own.
    pub fn suggested_minimum_size(&self) -> PhysicalSizeU32 {
        PhysicalSizeU32::zero()
    }

    /// The area left for children in a container of the given size.
    pub fn content_box(&self, size: PhysicalSizeU32) -> PhysicalBox2DU32 {
        geometry::content_box(&self.padding, size)
    }

    pub fn geometry(&self, size: PhysicalSizeU32) -> ShadowGeometry {
        ShadowGeometry::compute(&self.style, size)
    }

    /// The most recently painted background, if any.
    pub fn background(&self) -> Option<&R::Output> {
        self.background.as_ref()
    }

    pub fn take_background(&mut self) -> Option<R::Output> {
        self.background.take()
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    /// Whether every size change repaints the background (the default). When
    /// disabled, the background is only painted for the first non-empty size
    /// and after [`ShadowLayout::invalidate_shadow`].
    pub fn set_invalidate_shadow_on_size_changed(&mut self, invalidate: bool) {
        self.invalidate_on_size_changed = invalidate;
    }

    pub fn invalidate_shadow_on_size_changed(&self) -> bool {
        self.invalidate_on_size_changed
    }

    /// Mark the background as stale. The host is expected to schedule a
    /// layout pass, during which the background is repainted.
    pub fn invalidate_shadow(&mut self) {
        self.force_invalidate = true;
    }

    pub fn is_shadow_invalidated(&self) -> bool {
        self.force_invalidate
    }

    /// Call when the container has been resized.
    ///
    /// Returns `true` if the background was repainted.
    pub fn on_size_changed(&mut self, size: PhysicalSizeU32) -> Result<bool, ShadowError> {
        if size.is_empty() {
            return Ok(false);
        }

        if self.background.is_none() || self.invalidate_on_size_changed || self.force_invalidate {
            self.force_invalidate = false;
            self.repaint(size)?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Call after the container has been laid out within `bounds`.
    ///
    /// Returns `true` if the background was repainted.
    pub fn on_layout(&mut self, bounds: PhysicalBox2DI32) -> Result<bool, ShadowError> {
        if !self.force_invalidate {
            return Ok(false);
        }
        self.force_invalidate = false;

        let size = bounds_size(&bounds);
        if size.is_empty() {
            log::debug!("skipping shadow repaint for empty bounds {bounds:?}");
            return Ok(false);
        }

        self.repaint(size)?;
        Ok(true)
    }

    fn repaint(&mut self, size: PhysicalSizeU32) -> Result<(), ShadowError> {
        let request = ShadowRequest::new(&self.style, size);

        log::debug!(
            "painting shadow background {}x{}, draw rect {:?}",
            size.width,
            size.height,
            request.draw_rect
        );

        let background = self
            .rasterizer
            .rasterize(&request)
            .map_err(|e| ShadowError::Rasterize(Box::new(e)))?;

        self.background = Some(background);

        Ok(())
    }
}

/// The size of host bounds. Edges are subtracted in 64 bits so extreme
/// coordinates cannot overflow; inverted bounds give an empty size.
fn bounds_size(bounds: &PhysicalBox2DI32) -> PhysicalSizeU32 {
    let extent = |min: i32, max: i32| (i64::from(max) - i64::from(min)).clamp(0, u32::MAX as i64) as u32;

    PhysicalSizeU32::new(
        extent(bounds.min.x, bounds.max.x),
        extent(bounds.min.y, bounds.max.y),
    )
}

impl<R: Rasterizer + Default> Default for ShadowLayout<R> {
    fn default() -> Self {
        Self::new(StyleConfig::default(), R::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, AttributeMap, Dimension};
    use crate::math::{size_u32, PhysicalPointI32};

    #[derive(Default)]
    struct Recorder {
        requests: Vec<ShadowRequest>,
    }

    impl Rasterizer for Recorder {
        type Output = PhysicalSizeU32;
        type Error = std::convert::Infallible;

        fn rasterize(&mut self, request: &ShadowRequest) -> Result<Self::Output, Self::Error> {
            self.requests.push(*request);
            Ok(request.size)
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("out of memory")]
    struct OutOfMemory;

    struct Failing;

    impl Rasterizer for Failing {
        type Output = ();
        type Error = OutOfMemory;

        fn rasterize(&mut self, _request: &ShadowRequest) -> Result<(), OutOfMemory> {
            Err(OutOfMemory)
        }
    }

    fn bounds(left: i32, top: i32, right: i32, bottom: i32) -> PhysicalBox2DI32 {
        PhysicalBox2DI32::new(
            PhysicalPointI32::new(left, top),
            PhysicalPointI32::new(right, bottom),
        )
    }

    fn styled() -> StyleConfig {
        StyleConfig::builder()
            .blur_extent(10.0)
            .dx(4.0)
            .build()
            .unwrap()
    }

    #[test]
    fn padding_comes_from_style() {
        let layout = ShadowLayout::new(styled(), Recorder::default());
        let p = layout.padding();
        assert_eq!((p.left, p.top, p.right, p.bottom), (14, 10, 14, 10));
        assert_eq!(layout.suggested_minimum_size(), size_u32(0, 0));

        let c = layout.content_box(size_u32(200, 200));
        assert_eq!((c.min.x, c.min.y, c.max.x, c.max.y), (14, 10, 186, 190));
    }

    #[test]
    fn every_size_change_repaints_by_default() {
        let mut layout = ShadowLayout::new(styled(), Recorder::default());
        assert!(layout.on_size_changed(size_u32(200, 200)).unwrap());
        assert!(layout.on_size_changed(size_u32(300, 100)).unwrap());

        assert_eq!(layout.background(), Some(&size_u32(300, 100)));
        let requests = &layout.rasterizer().requests;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].draw_rect.max.x, 186.0);
    }

    #[test]
    fn empty_sizes_are_ignored() {
        let mut layout = ShadowLayout::new(styled(), Recorder::default());
        assert!(!layout.on_size_changed(size_u32(0, 200)).unwrap());
        assert!(!layout.on_size_changed(size_u32(200, 0)).unwrap());
        assert!(layout.background().is_none());
        assert!(layout.rasterizer().requests.is_empty());
    }

    #[test]
    fn first_size_paints_even_without_size_invalidation() {
        let mut layout = ShadowLayout::new(styled(), Recorder::default());
        layout.set_invalidate_shadow_on_size_changed(false);
        assert!(!layout.invalidate_shadow_on_size_changed());

        assert!(layout.on_size_changed(size_u32(200, 200)).unwrap());
        assert!(!layout.on_size_changed(size_u32(250, 200)).unwrap());
        assert_eq!(layout.background(), Some(&size_u32(200, 200)));

        layout.invalidate_shadow();
        assert!(layout.on_size_changed(size_u32(260, 200)).unwrap());
        assert!(!layout.is_shadow_invalidated());
        assert!(!layout.on_size_changed(size_u32(270, 200)).unwrap());
        assert_eq!(layout.rasterizer().requests.len(), 2);
    }

    #[test]
    fn invalidation_repaints_once_on_layout() {
        let mut layout = ShadowLayout::new(styled(), Recorder::default());
        assert!(!layout.on_layout(bounds(0, 0, 200, 200)).unwrap());

        layout.invalidate_shadow();
        assert!(layout.on_layout(bounds(10, 20, 210, 120)).unwrap());
        assert!(!layout.on_layout(bounds(10, 20, 210, 120)).unwrap());

        assert_eq!(layout.background(), Some(&size_u32(200, 100)));
        assert_eq!(layout.rasterizer().requests.len(), 1);
    }

    #[test]
    fn layout_with_extreme_bounds_does_not_overflow() {
        let mut layout = ShadowLayout::new(styled(), Recorder::default());
        layout.invalidate_shadow();
        assert!(layout.on_layout(bounds(-10, 0, i32::MAX, 10)).unwrap());
        assert_eq!(
            layout.background(),
            Some(&size_u32(i32::MAX as u32 + 10, 10))
        );

        layout.invalidate_shadow();
        assert!(layout.on_layout(bounds(i32::MIN, i32::MIN, i32::MAX, i32::MAX)).unwrap());
        assert_eq!(layout.background(), Some(&size_u32(u32::MAX, u32::MAX)));

        layout.invalidate_shadow();
        assert!(!layout.on_layout(bounds(i32::MAX, 0, i32::MIN, 10)).unwrap());
        assert_eq!(layout.rasterizer().requests.len(), 2);
    }

    #[test]
    fn layout_with_empty_bounds_clears_invalidation() {
        let mut layout = ShadowLayout::new(styled(), Recorder::default());
        layout.invalidate_shadow();
        assert!(!layout.on_layout(bounds(5, 5, 5, 40)).unwrap());
        assert!(!layout.is_shadow_invalidated());
        assert!(layout.rasterizer().requests.is_empty());
    }

    #[test]
    fn set_style_updates_padding_and_invalidates() {
        let mut layout = ShadowLayout::new(styled(), Recorder::default());
        layout.set_invalidate_shadow_on_size_changed(false);
        layout.on_size_changed(size_u32(200, 200)).unwrap();

        let style = layout.style().to_builder().dy(-6.0).build().unwrap();
        layout.set_style(style);
        let p = layout.padding();
        assert_eq!((p.left, p.top, p.right, p.bottom), (14, 16, 14, 16));
        assert!(layout.is_shadow_invalidated());

        assert!(layout.on_layout(bounds(0, 0, 200, 200)).unwrap());
        let last = layout.rasterizer().requests.last().unwrap();
        assert_eq!(last.offset.y, -6.0);
        assert_eq!(last.draw_rect.min.y, 16.0);
    }

    #[test]
    fn degenerate_sizes_still_reach_the_rasterizer() {
        let style = StyleConfig::builder().blur_extent(20.0).build().unwrap();
        let mut layout = ShadowLayout::new(style, Recorder::default());
        assert!(layout.on_size_changed(size_u32(30, 200)).unwrap());
        assert!(layout.rasterizer().requests[0].is_noop());
    }

    #[test]
    fn rasterizer_errors_keep_the_old_background() {
        let mut layout = ShadowLayout::new(styled(), Failing);
        let err = layout.on_size_changed(size_u32(200, 200)).unwrap_err();
        assert!(matches!(err, ShadowError::Rasterize(_)));
        assert_eq!(err.to_string(), "failed to rasterize shadow background: out of memory");
        assert!(layout.background().is_none());
    }

    #[test]
    fn from_attributes() {
        let attrs = AttributeMap::default()
            .with(Attribute::ShadowLimit, Dimension::Px(8.0))
            .with(Attribute::TopShow, false);
        let layout = ShadowLayout::from_attributes(&attrs, Recorder::default()).unwrap();
        let p = layout.padding();
        assert_eq!((p.left, p.top, p.right, p.bottom), (8, 0, 8, 8));

        let attrs = AttributeMap::default().with(Attribute::Alpha, f32::NAN);
        let err = ShadowLayout::from_attributes(&attrs, Recorder::default())
            .err()
            .unwrap();
        assert!(matches!(err, ShadowError::Style(_)));
    }

    #[test]
    fn borrowed_rasterizer() {
        let mut recorder = Recorder::default();
        {
            let mut layout = ShadowLayout::new(styled(), &mut recorder);
            layout.on_size_changed(size_u32(64, 64)).unwrap();
            assert_eq!(layout.take_background(), Some(size_u32(64, 64)));
            assert!(layout.background().is_none());
        }
        assert_eq!(recorder.requests.len(), 1);
    }
}
