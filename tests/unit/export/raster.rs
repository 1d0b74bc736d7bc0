use super::*;
use crate::foundation::core::Canvas;

#[test]
fn uncomposed_surface_is_not_ready() {
    let surface = RasterSurface::new(Canvas::square(4));
    let err = export_png(&surface, "emoji", 1).unwrap_err();
    assert!(matches!(err, MojiError::NotReady(_)), "{err}");
}

#[test]
fn png_roundtrips_straight_alpha_pixels() {
    let mut surface = RasterSurface::new(Canvas::square(2));
    // Premultiplied half-transparent red.
    surface.clear([128, 0, 0, 128]);
    surface.mark_composed(1);

    let download = export_png(&surface, "emoji", 42).unwrap();
    assert_eq!(download.file_name, "emoji_42.png");
    assert_eq!(download.content_type, "image/png");

    let decoded = image::load_from_memory(&download.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0, 128]);
}
