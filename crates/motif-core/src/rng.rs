//! Deterministic pseudo-random draws for cosmetic decoration.
//!
//! Values depend only on the input string. No clock, no entropy source, no
//! process state, so a result decorated today and next year looks the same.

use std::fmt::Display;

/// Largest 32-bit signed magnitude, used as the divisor.
const MAX_MAGNITUDE: u32 = i32::MAX.unsigned_abs();

/// Map a string to a float in `[0, 1)`.
///
/// Accumulates a wrapping 32-bit signed hash over the UTF-16 code units
/// (`hash = hash * 31 + unit`), takes the magnitude, and divides by
/// `i32::MAX`. The two magnitudes that would land on or past 1.0
/// (`i32::MAX` and `i32::MIN`) are reduced modulo `i32::MAX`.
///
/// An empty string yields 0.5.
#[must_use]
pub fn pseudo_random(s: &str) -> f64 {
    if s.is_empty() {
        return 0.5;
    }
    let hash = s
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    f64::from(hash.unsigned_abs() % MAX_MAGNITUDE) / f64::from(MAX_MAGNITUDE)
}

/// A seed string from which independent draws are taken by offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed(String);

impl Seed {
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Draw a float in `[0, 1)` for `offset`.
    ///
    /// The offset is appended to the seed text, so `draw(1)` and `draw("1")`
    /// are the same draw.
    #[must_use]
    pub fn draw(&self, offset: impl Display) -> f64 {
        pseudo_random(&format!("{}{offset}", self.0))
    }

    /// Draw an index into a list of `len` items. `len` must be non-zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn pick(&self, offset: impl Display, len: usize) -> usize {
        debug_assert!(len > 0, "pick from an empty list");
        ((self.draw(offset) * len as f64) as usize).min(len.saturating_sub(1))
    }
}
