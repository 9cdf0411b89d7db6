use super::*;

#[test]
fn every_cell_decodes_to_its_value() {
    let img = test_pattern(2).unwrap();
    assert_eq!(img.dimensions(), (32, 32));
    for gy in 0..GRID {
        for gx in 0..GRID {
            let px = *img.get_pixel(gx * 2 + 1, gy * 2);
            assert_eq!(pixel::decode(px, 8).unwrap(), expected_value(gx, gy));
        }
    }
}

#[test]
fn origin_is_bottom_left() {
    let img = test_pattern(1).unwrap();
    assert_eq!(pixel::decode(*img.get_pixel(0, 15), 8).unwrap(), 0);
    assert_eq!(pixel::decode(*img.get_pixel(15, 0), 8).unwrap(), 255);
}

#[test]
fn zero_cell_is_rejected() {
    assert!(test_pattern(0).is_err());
}
