use shadowbox::attributes::{Attribute, AttributeMap, Dimension};
use shadowbox::math::{size_u32, ScaleFactor};
use shadowbox::quad::ShadowQuadPrimitive;
use shadowbox::{color, Rasterizer, ShadowLayout, ShadowRequest};

fn main() {
    // Set up logging stuff
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", "debug");
    env_logger::init_from_env(env);

    let attrs = AttributeMap::new(ScaleFactor::new(2.0))
        .with(Attribute::ShadowLimit, Dimension::Points(5.0))
        .with(Attribute::CornerRadius, Dimension::Points(4.0))
        .with(Attribute::Dx, Dimension::Px(-4.0))
        .with(Attribute::Dy, Dimension::Px(6.0))
        .with(Attribute::ShadowColor, color::from_argb(0x5500_0000))
        .with(Attribute::Alpha, 0.8_f32);

    let mut layout = match ShadowLayout::from_attributes(&attrs, PackingRasterizer) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let p = layout.padding();
    println!(
        "padding (l, t, r, b): {}, {}, {}, {}",
        p.left, p.top, p.right, p.bottom
    );

    for (w, h) in [(200, 200), (30, 200), (0, 0)] {
        let size = size_u32(w, h);
        let geometry = layout.geometry(size);
        let r = geometry.draw_rect;

        println!(
            "{w}x{h}: draw rect (l, t, r, b): {}, {}, {}, {}{}",
            r.min.x,
            r.min.y,
            r.max.x,
            r.max.y,
            if geometry.is_degenerate() {
                " (degenerate)"
            } else {
                ""
            }
        );

        match layout.on_size_changed(size) {
            Ok(true) => println!("  packed: {:?}", layout.background()),
            Ok(false) => println!("  background not repainted"),
            Err(e) => eprintln!("  {e}"),
        }
    }
}

/// Stands in for a GPU rasterizer by packing each request for upload.
struct PackingRasterizer;

impl Rasterizer for PackingRasterizer {
    type Output = ShadowQuadPrimitive;
    type Error = std::convert::Infallible;

    fn rasterize(&mut self, request: &ShadowRequest) -> Result<Self::Output, Self::Error> {
        Ok(request.packed())
    }
}
