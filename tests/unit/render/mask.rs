use super::*;

#[test]
fn filled_rect_reaches_full_coverage() {
    let mut canvas = MaskCanvas::new(8, 8).unwrap();
    canvas.fill_rect(kurbo::Rect::new(2.0, 2.0, 6.0, 6.0));
    let cov = canvas.finish();
    assert_eq!(cov.len(), 64);
    assert_eq!(cov[4 * 8 + 4], 255);
    assert_eq!(cov[0], 0);
    assert_eq!(cov[7 * 8 + 7], 0);
}

#[test]
fn polygon_covers_its_interior() {
    let mut canvas = MaskCanvas::new(16, 16).unwrap();
    canvas.fill_polygon(&[(0.0, 0.0), (16.0, 8.0), (0.0, 16.0)]);
    let cov = canvas.finish();
    assert_eq!(cov[8 * 16 + 2], 255);
    assert_eq!(cov[15], 0);
}

#[test]
fn zero_sized_mask_is_rejected() {
    assert!(MaskCanvas::new(0, 4).is_err());
    assert!(MaskCanvas::new(4, 70_000).is_err());
}

#[test]
fn squash_splits_thirds_into_channels() {
    // 1 column, 6 rows: two texel rows.
    let cov = [10, 11, 20, 21, 30, 31];
    let img = squash_rgb(&cov, 1, 6).unwrap();
    assert_eq!(img.dimensions(), (1, 2));
    assert_eq!(img.get_pixel(0, 0).0, [30, 20, 10, 255]);
    assert_eq!(img.get_pixel(0, 1).0, [31, 21, 11, 255]);
}

#[test]
fn squash_requires_multiple_of_three() {
    assert!(squash_rgb(&[0; 4], 1, 4).is_err());
    assert!(squash_rgb(&[0; 5], 1, 6).is_err());
}
