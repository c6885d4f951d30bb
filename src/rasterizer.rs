use crate::quad::ShadowRequest;

/// Paints shadow backgrounds.
///
/// A rasterizer fills the rounded rectangle of a [`ShadowRequest`] and casts
/// its blurred, offset shadow into a new bitmap of the request's size. A
/// degenerate draw rect (see [`ShadowRequest::is_noop`]) must produce a
/// bitmap with nothing painted rather than an error.
pub trait Rasterizer {
    /// The painted background, e.g. a bitmap or a GPU texture handle.
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    fn rasterize(&mut self, request: &ShadowRequest) -> Result<Self::Output, Self::Error>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    type Output = R::Output;
    type Error = R::Error;

    fn rasterize(&mut self, request: &ShadowRequest) -> Result<Self::Output, Self::Error> {
        (**self).rasterize(request)
    }
}
