//=================================
// Scalar Interpolation
//=================================

/// Linearly interpolates between `a` and `b`.
///
/// `t` is clamped into `[0, 1]`, so the result never leaves the `[a, b]` segment.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Inverse of [`lerp`]: where `value` sits between `a` and `b`, clamped into `[0, 1]`.
///
/// Returns 0 when the range is empty.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_clamps_factor() {
        assert_eq!(lerp(1.0, 3.0, 0.5), 2.0);
        assert_eq!(lerp(1.0, 3.0, -1.0), 1.0);
        assert_eq!(lerp(1.0, 3.0, 4.0), 3.0);
        assert_eq!(lerp(3.0, 1.0, 0.25), 2.5);
    }

    #[test]
    fn inverse_lerp_handles_reversed_and_empty_ranges() {
        assert_eq!(inverse_lerp(0.0, 4.0, 1.0), 0.25);
        assert_eq!(inverse_lerp(4.0, 0.0, 1.0), 0.75);
        assert_eq!(inverse_lerp(0.0, 4.0, 9.0), 1.0);
        assert_eq!(inverse_lerp(2.0, 2.0, 2.0), 0.0);
    }
}
