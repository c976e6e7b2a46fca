use crate::Vec3;

/// Scale a vector to unit length.
///
/// Unlike `DVec3::normalize`, the zero vector is not special-cased: it is
/// multiplied by `+inf`, so its components become NaN and propagate through
/// whatever uses them. Callers rely on that to turn degenerate geometry into
/// black or background pixels instead of aborting a render.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let mag = v.length();
    let div = if mag == 0.0 { f64::INFINITY } else { 1.0 / mag };
    v * div
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        let cases = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0, 2.0, -3.0),
            Vec3::new(1e-6, 0.0, 0.0),
            Vec3::new(1e6, -1e6, 5.0),
        ];

        for v in cases {
            let n = normalize(v);
            assert!((n.length() - 1.0).abs() < 1e-12, "{v:?} -> {n:?}");
        }
    }

    #[test]
    fn test_normalize_keeps_direction() {
        let n = normalize(Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(n, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normalize_zero_is_not_finite() {
        let n = normalize(Vec3::ZERO);
        assert!(!n.is_finite());
        assert!(n.x.is_nan());
    }
}
