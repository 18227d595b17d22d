//! 8-bit fixed-point encoding for low precision parameters.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional bits in the encoding.
const FRAC_BITS: u32 = 3;
const SCALE: f32 = (1 << FRAC_BITS) as f32;

/// Fixed-point number stored in a single byte.
///
/// ```text
/// 0 0000 000
/// S IIII FFF
/// ```
///
/// `S` is the sign, `I` the integer magnitude and `F` the fractional part, so the
/// stored value is `bits / 8`. Representable values run from -16.000 to +15.875
/// in steps of 0.125.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed8(i8);

impl Fixed8 {
    pub const ZERO: Fixed8 = Fixed8(0);
    /// -16.000
    pub const MIN: Fixed8 = Fixed8(i8::MIN);
    /// +15.875
    pub const MAX: Fixed8 = Fixed8(i8::MAX);
    /// Smallest positive value, 0.125.
    pub const EPSILON: Fixed8 = Fixed8(1);

    pub const fn from_bits(bits: i8) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> i8 {
        self.0
    }

    /// Decode to a float. Every bit pattern is a finite value.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SCALE
    }

    /// Encode a float, rounding to the nearest 0.125 and saturating at
    /// [`Fixed8::MIN`] and [`Fixed8::MAX`]. NaN encodes as zero.
    pub fn from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        let scaled = (value * SCALE).round();
        Self(scaled.clamp(i8::MIN as f32, i8::MAX as f32) as i8)
    }
}

impl From<Fixed8> for f32 {
    fn from(x: Fixed8) -> f32 {
        x.to_f32()
    }
}

impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.to_f32())
    }
}
