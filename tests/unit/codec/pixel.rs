use super::*;

#[test]
fn level_table_matches_calibration() {
    assert_eq!(calibrate_levels().unwrap(), LEVEL_TO_SRGB);
}

#[test]
fn every_level_samples_inside_its_window() {
    for (k, &code) in LEVEL_TO_SRGB.iter().enumerate() {
        let linear = usize::from(srgb8_to_linear8(code));
        assert!(
            linear == 4 * k + 1 || linear == 4 * k + 2,
            "level {k}: code {code} samples to {linear}"
        );
    }
}

#[test]
fn round_trips_full_color_domain() {
    for v in 0..(1u32 << COLOR_BITS) {
        let px = encode(v, 18).unwrap();
        assert_eq!(px.0[3], 255, "values below 2^18 stay opaque");
        assert_eq!(decode(px, 18).unwrap(), v);
    }
}

#[test]
fn round_trips_sparse_26_bit_domain() {
    let max = (1u32 << MAX_BITS) - 1;
    let mut v = 0u32;
    while v <= max {
        let px = encode(v, MAX_BITS).unwrap();
        assert_eq!(decode_sampled(sample(px), MAX_BITS).unwrap(), v);
        v += 9973;
    }
    for v in [max, max - 1, 1 << 18, (1 << 18) - 1, 1 << 25] {
        assert_eq!(decode(encode(v, MAX_BITS).unwrap(), MAX_BITS).unwrap(), v);
    }
}

#[test]
fn narrow_widths_round_trip() {
    for bits in 1..=12u8 {
        for v in 0..(1u32 << bits) {
            assert_eq!(decode(encode(v, bits).unwrap(), bits).unwrap(), v);
        }
    }
}

#[test]
fn out_of_range_values_are_configuration_errors() {
    assert!(encode(1 << 10, 10).unwrap_err().is_configuration());
    assert!(encode(0, 27).unwrap_err().is_configuration());
    assert!(encode(0, 0).unwrap_err().is_configuration());
    assert!(encode(u32::MAX, MAX_BITS).is_err());
}

#[test]
fn decode_rejects_values_wider_than_declared() {
    let px = encode(1 << 20, 21).unwrap();
    assert!(decode(px, 18).unwrap_err().is_configuration());
}

#[test]
fn sampling_leaves_alpha_untouched() {
    let px = Rgba([10, 20, 30, 77]);
    assert_eq!(sample(px).0[3], 77);
}
