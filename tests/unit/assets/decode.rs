use super::*;

const MAGENTA: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
  <rect x="0" y="0" width="32" height="32" fill="#ff00ff"/>
</svg>"##;

#[test]
fn parse_svg_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok).unwrap();

    let bad = br#"<svg"#;
    assert!(parse_svg(bad).is_err());
}

#[test]
fn rasterize_stretches_to_canvas() {
    let tree = parse_svg(MAGENTA).unwrap();
    let px = rasterize_svg_to_premul_rgba8(&tree, Canvas::square(8)).unwrap();
    assert_eq!(px.len(), 8 * 8 * 4);
    // Full-bleed rect covers every pixel, including the far corner.
    assert_eq!(&px[px.len() - 4..], &[255, 0, 255, 255]);
}

#[test]
fn unpremultiply_inverts_premultiply() {
    let straight = [200u8, 100, 50, 128];
    let mut buf = premultiply(straight).to_vec();
    unpremultiply_in_place(&mut buf);
    for (got, want) in buf.iter().zip(straight.iter()) {
        assert!((*got as i16 - *want as i16).abs() <= 1, "{got} vs {want}");
    }

    let mut clear = vec![9u8, 9, 9, 0];
    unpremultiply_in_place(&mut clear);
    assert_eq!(clear, [0, 0, 0, 0]);
}
