//! Linear RGB color support.

use crate::Vec3;

/// Linear RGB triple. Channel values are unbounded until clamped.
pub type Color = Vec3;

/// Cap each channel at 1.0.
///
/// Only an upper bound is applied: negative channels pass through
/// unchanged and are floored later, at the 8-bit conversion boundary.
#[inline]
pub fn clamp_channels(c: Color) -> Color {
    c.min(Color::ONE)
}
