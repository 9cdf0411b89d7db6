use super::*;

/// Banner with distinct caps and a horizontally uniform body.
fn banner(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if x < 8 {
            Rgba([200, x as u8, y as u8, 128])
        } else if x >= w - 8 {
            Rgba([10, (w - x) as u8, y as u8, 64])
        } else {
            Rgba([90, 80, y as u8, 255])
        }
    })
}

#[test]
fn caps_are_copied_verbatim_with_alpha_split_out() {
    let src = banner(100, 12);
    let sliced = SlicedHeader::slice(&src, 8, 1).unwrap();

    assert_eq!(sliced.sprite_width(), 17);
    assert_eq!(sliced.true_width(), 100);
    assert_eq!(sliced.height(), 12);

    assert_eq!(*sliced.color().get_pixel(3, 5), Rgba([200, 3, 5, 255]));
    assert_eq!(*sliced.alpha().get_pixel(3, 5), Rgba([128, 128, 128, 255]));
    // Last sprite column is the last source column.
    assert_eq!(*sliced.color().get_pixel(16, 2), Rgba([10, 1, 2, 255]));
    assert_eq!(*sliced.alpha().get_pixel(16, 2), Rgba([64, 64, 64, 255]));
}

#[test]
fn expanded_banner_matches_a_uniform_source() {
    let src = banner(100, 12);
    let sliced = SlicedHeader::slice(&src, 8, 1).unwrap();
    assert_eq!(sliced.expand(100).unwrap(), src);
}

#[test]
fn tiled_middle_is_equal_across_seams() {
    let src = RgbaImage::from_fn(40, 4, |x, y| {
        let v = if x < 6 || x >= 34 { 0 } else { ((x - 6) % 4) as u8 * 50 };
        Rgba([v, v, y as u8, 255])
    });
    let sliced = SlicedHeader::slice(&src, 6, 4).unwrap();
    let wide = sliced.expand(200).unwrap();
    for y in 0..4 {
        for x in 6..190 {
            assert_eq!(wide.get_pixel(x, y), wide.get_pixel(x + 4, y), "x={x} y={y}");
        }
    }
}

#[test]
fn single_column_middle_has_no_seam() {
    let sliced = SlicedHeader::slice(&banner(64, 8), 8, 1).unwrap();
    assert_eq!(sliced.seam_error(), 0);
}

#[test]
fn gradient_middle_reports_its_seam() {
    let src = RgbaImage::from_fn(30, 2, |x, _| Rgba([x as u8 * 8, 0, 0, 255]));
    let sliced = SlicedHeader::slice(&src, 4, 3).unwrap();
    assert_eq!(sliced.seam_error(), 16);
}

#[test]
fn too_narrow_header_is_an_asset_error() {
    let err = SlicedHeader::slice(&banner(16, 8), 8, 1).unwrap_err();
    assert!(err.to_string().starts_with("asset error:"));
}

#[test]
fn expanding_below_the_caps_is_rejected() {
    let sliced = SlicedHeader::slice(&banner(64, 8), 8, 1).unwrap();
    assert!(sliced.expand(15).is_err());
}

#[test]
fn overflowing_cap_width_is_a_configuration_error() {
    let err = SlicedHeader::slice(&banner(64, 8), u32::MAX / 2 + 1, 1).unwrap_err();
    assert!(err.is_configuration());
}
