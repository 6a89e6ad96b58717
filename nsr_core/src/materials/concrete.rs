//! Concrete properties for strength design (NSR-10 C.10.2)
//!
//! Only the equivalent rectangular stress block is needed by the column
//! engine: the 0.85 f'c stress intensity, the ultimate crushing strain and
//! the block depth factor β1.

/// Maximum usable strain at the extreme concrete compression fiber (C.10.2.3)
pub const EPSILON_CU: f64 = 0.003;

/// Stress intensity of the equivalent block as a fraction of f'c (C.10.2.7.1)
pub const STRESS_BLOCK_INTENSITY: f64 = 0.85;

/// Upper value of β1, used for f'c up to 28 MPa
pub const BETA1_MAX: f64 = 0.85;

/// Lower bound of β1 for high-strength concrete
pub const BETA1_MIN: f64 = 0.65;

/// Depth factor β1 of the equivalent rectangular stress block (C.10.2.7.3).
///
/// `a = β1 · c`. For f'c ≤ 28 MPa β1 = 0.85; above that it drops 0.05 for
/// every 7 MPa, never below 0.65. The caller guarantees `fc_mpa > 0`.
///
/// # Example
///
/// ```rust
/// use nsr_core::materials::concrete::beta1;
///
/// assert_eq!(beta1(21.0), 0.85);
/// assert!((beta1(35.0) - 0.80).abs() < 1e-12);
/// assert_eq!(beta1(70.0), 0.65);
/// ```
pub fn beta1(fc_mpa: f64) -> f64 {
    if fc_mpa <= 28.0 {
        BETA1_MAX
    } else {
        let beta = BETA1_MAX - 0.05 * ((fc_mpa - 28.0) / 7.0);
        beta.max(BETA1_MIN)
    }
}

/// Nominal axial strength of the section under pure compression, Po (C.10.3.6).
///
/// `Po = 0.85 f'c (Ag − Ast) + fy Ast` in N, with areas in mm² and
/// stresses in MPa.
pub fn pure_axial_capacity_n(fc_mpa: f64, fy_mpa: f64, gross_area_mm2: f64, steel_area_mm2: f64) -> f64 {
    if steel_area_mm2 > 0.0 {
        STRESS_BLOCK_INTENSITY * fc_mpa * (gross_area_mm2 - steel_area_mm2) + fy_mpa * steel_area_mm2
    } else {
        STRESS_BLOCK_INTENSITY * fc_mpa * gross_area_mm2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_beta1_normal_strength() {
        assert_eq!(beta1(17.5), 0.85);
        assert_eq!(beta1(28.0), 0.85);
    }

    #[test]
    fn test_beta1_high_strength() {
        // 42 MPa: 0.85 - 0.05 * 2 = 0.75
        assert!((beta1(42.0) - 0.75).abs() < 1e-12);
        // 56 MPa hits the floor exactly
        assert!((beta1(56.0) - 0.65).abs() < 1e-12);
        assert_eq!(beta1(100.0), 0.65);
    }

    #[test]
    fn test_pure_axial_capacity() {
        // 400 x 500 section, 8 #6 bars (As ~ 2292 mm²), f'c 28, fy 420
        let po = pure_axial_capacity_n(28.0, 420.0, 200_000.0, 2292.0);
        let expected = 0.85 * 28.0 * (200_000.0 - 2292.0) + 420.0 * 2292.0;
        assert!((po - expected).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn beta1_stays_in_band(fc in 1.0f64..150.0) {
            let b = beta1(fc);
            prop_assert!(b >= BETA1_MIN && b <= BETA1_MAX);
        }

        #[test]
        fn beta1_is_non_increasing(fc in 1.0f64..120.0, delta in 0.0f64..30.0) {
            prop_assert!(beta1(fc + delta) <= beta1(fc));
        }
    }
}
