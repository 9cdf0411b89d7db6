use super::*;

#[test]
fn fnv_hash_is_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"scrollcal");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"scrollcal");
    assert_eq!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_u32(1);
    c.write_u32(2);
    let mut d = Fnv1a64::new_default();
    d.write_u32(2);
    d.write_u32(1);
    assert_ne!(c.finish(), d.finish());
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn srgb_transfer_functions_invert() {
    for code in 0..=255u8 {
        let x = f64::from(code) / 255.0;
        let back = linear_to_srgb(srgb_to_linear(x));
        assert!((back - x).abs() < 1e-9, "code {code}");
    }
}

#[test]
fn host_sampling_is_lossy_at_both_ends() {
    assert_eq!(srgb8_to_linear8(0), 0);
    assert_eq!(srgb8_to_linear8(255), 255);
    // Dark codes collapse.
    assert_eq!(srgb8_to_linear8(1), srgb8_to_linear8(2));
    // Bright codes skip linear values.
    let top = srgb8_to_linear8(254);
    assert!(255 - top >= 2);
}

#[test]
fn host_sampling_is_monotonic() {
    let mut prev = 0u8;
    for code in 0..=255u8 {
        let l = srgb8_to_linear8(code);
        assert!(l >= prev);
        prev = l;
    }
}
