//! Value-to-pixel codec that survives the host's sRGB sampling.
//!
//! A value of up to [`MAX_BITS`] bits is split into three 6-bit levels carried by the blue, green
//! and red channels, plus an 8-bit high part carried by alpha:
//!
//! | bits      | channel | stored as                         |
//! |-----------|---------|-----------------------------------|
//! | `[0,6)`   | B       | calibrated sRGB code for level    |
//! | `[6,12)`  | G       | calibrated sRGB code for level    |
//! | `[12,18)` | R       | calibrated sRGB code for level    |
//! | `[18,26)` | A       | `255 - hi` (alpha is not gamma-converted) |
//!
//! The host converts color channels to linear and keeps 8 bits of the result, which merges dark
//! codes and skips bright ones. Each level `k` is therefore written as the sRGB code whose linear
//! sample lands strictly inside the window `[4k, 4k + 4)`, and the shader recovers the level with
//! `linear >> 2`.

use image::Rgba;

use crate::foundation::{
    error::{ScrollcalError, ScrollcalResult},
    math::srgb8_to_linear8,
};

/// Widest value a single pixel can carry through the host's sampling.
pub const MAX_BITS: u8 = 26;

/// Bits carried by each color channel.
pub const CHANNEL_BITS: u32 = 6;

/// Bits carried by the three color channels together; wider values spill into alpha.
pub const COLOR_BITS: u32 = CHANNEL_BITS * 3;

const LEVELS: usize = 1 << CHANNEL_BITS;
const LEVEL_MASK: u32 = (LEVELS as u32) - 1;

/// sRGB code written for each 6-bit level. Frozen: the consuming shader depends on these exact
/// codes sampling into `{4k+1, 4k+2}`.
pub(crate) const LEVEL_TO_SRGB: [u8; LEVELS] = [
    7, 37, 52, 63, 72, 81, 88, 94, 101, 106, 111, 116, 121, 126, 130, 134, 138, 142, 146, 149, 153,
    156, 160, 163, 166, 169, 172, 175, 178, 181, 183, 186, 189, 191, 194, 196, 199, 201, 204, 206,
    208, 211, 213, 215, 217, 219, 222, 224, 226, 228, 230, 232, 234, 236, 238, 240, 242, 243, 245,
    247, 249, 251, 253, 254,
];

/// Reject widths the codec cannot carry.
pub fn check_width(bits: u8) -> ScrollcalResult<()> {
    if bits == 0 || bits > MAX_BITS {
        return Err(ScrollcalError::configuration(format!(
            "bit width {bits} is outside 1..={MAX_BITS}"
        )));
    }
    Ok(())
}

/// Reject values that do not fit in `bits`.
pub fn check_value(value: u32, bits: u8) -> ScrollcalResult<()> {
    check_width(bits)?;
    if u64::from(value) >= (1u64 << bits) {
        return Err(ScrollcalError::configuration(format!(
            "value {value} does not fit in {bits} bits"
        )));
    }
    Ok(())
}

/// Encode `value` as a pixel. Fails if `value` does not fit in `bits`.
pub fn encode(value: u32, bits: u8) -> ScrollcalResult<Rgba<u8>> {
    check_value(value, bits)?;

    let level = |shift: u32| LEVEL_TO_SRGB[((value >> shift) & LEVEL_MASK) as usize];
    let hi = (value >> COLOR_BITS) as u8;

    Ok(Rgba([
        level(CHANNEL_BITS * 2),
        level(CHANNEL_BITS),
        level(0),
        255 - hi,
    ]))
}

/// Apply the host's texture sampling to a stored pixel.
pub fn sample(pixel: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    Rgba([
        srgb8_to_linear8(r),
        srgb8_to_linear8(g),
        srgb8_to_linear8(b),
        a,
    ])
}

/// Decode a texel as the shader sees it (after [`sample`]).
pub fn decode_sampled(texel: Rgba<u8>, bits: u8) -> ScrollcalResult<u32> {
    check_width(bits)?;
    let [r, g, b, a] = texel.0;
    let level = |c: u8| u32::from(c >> 2);

    let value = (u32::from(255 - a) << COLOR_BITS)
        | (level(r) << (CHANNEL_BITS * 2))
        | (level(g) << CHANNEL_BITS)
        | level(b);

    if u64::from(value) >= (1u64 << bits) {
        return Err(ScrollcalError::configuration(format!(
            "decoded value {value} exceeds declared width of {bits} bits"
        )));
    }
    Ok(value)
}

/// Decode a pixel read straight from the stored image.
pub fn decode(pixel: Rgba<u8>, bits: u8) -> ScrollcalResult<u32> {
    decode_sampled(sample(pixel), bits)
}

/// Re-derive the level table from the sampling model.
///
/// For each level, picks the lowest sRGB code whose linear sample is nearest the middle of the
/// level's window. Used to validate [`LEVEL_TO_SRGB`].
pub fn calibrate_levels() -> ScrollcalResult<[u8; LEVELS]> {
    let mut table = [0u8; LEVELS];
    for (k, slot) in table.iter_mut().enumerate() {
        let target = (k * 4) as f64 + 1.5;
        let mut best: Option<(f64, u8)> = None;
        for code in 0..=255u8 {
            let linear = srgb8_to_linear8(code);
            if usize::from(linear >> 2) != k {
                continue;
            }
            let dist = (f64::from(linear) - target).abs();
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, code));
            }
        }
        let (_, code) = best.ok_or_else(|| {
            ScrollcalError::configuration(format!("no sRGB code samples into level {k}"))
        })?;
        *slot = code;
    }
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/pixel.rs"]
mod tests;
