use crate::domain::errors::GeometryError;
use std::f32::consts::{FRAC_PI_2, PI};

/// Heading in radians that turns an entity at `(x2, y2)` toward the pointer at `(x1, y1)`.
///
/// Raw angles strictly inside `(0, π)` are snapped to `0` below `π/2` and to `π` otherwise
/// before the quarter-turn offset is applied, so that half-plane only ever yields `π/2` or
/// `3π/2`. The other half-plane maps continuously onto `[-π/2, π/2]`.
pub fn aim_heading(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<f32, GeometryError> {
    if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
        return Err(GeometryError::InvalidArgument);
    }

    let mut raw = (y1 - y2).atan2(x1 - x2);
    if raw > 0.0 {
        raw = if raw < FRAC_PI_2 { 0.0 } else { PI };
    }

    Ok(raw + FRAC_PI_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn when_pointer_is_level_to_the_right_then_heading_is_quarter_turn() {
        let heading = aim_heading(100.0, 50.0, 10.0, 50.0).expect("finite input");
        assert!(close(heading, FRAC_PI_2));
    }

    #[test]
    fn when_pointer_is_below_right_then_heading_snaps_to_quarter_turn() {
        let heading = aim_heading(100.0, 90.0, 10.0, 50.0).expect("finite input");
        assert!(close(heading, FRAC_PI_2));
    }

    #[test]
    fn when_pointer_is_below_left_then_heading_snaps_to_three_quarter_turn() {
        let heading = aim_heading(0.0, 90.0, 10.0, 50.0).expect("finite input");
        assert!(close(heading, 3.0 * FRAC_PI_2));
    }

    #[test]
    fn when_pointer_is_straight_below_then_heading_is_three_quarter_turn() {
        let heading = aim_heading(10.0, 90.0, 10.0, 50.0).expect("finite input");
        assert!(close(heading, 3.0 * FRAC_PI_2));
    }

    #[test]
    fn when_pointer_is_straight_above_then_heading_is_zero() {
        let heading = aim_heading(10.0, 0.0, 10.0, 50.0).expect("finite input");
        assert!(close(heading, 0.0));
    }

    #[test]
    fn when_pointer_is_above_left_then_heading_is_continuous_and_negative() {
        let heading = aim_heading(0.0, 40.0, 10.0, 50.0).expect("finite input");
        // atan2(-10, -10) = -3π/4, shifted by π/2.
        assert!(close(heading, -PI / 4.0));
    }

    #[test]
    fn when_sweeping_the_plane_then_headings_fall_in_the_quantized_partition() {
        for dx in -20..=20 {
            for dy in -20..=20 {
                let heading =
                    aim_heading(dx as f32 * 7.5, dy as f32 * 7.5, 0.0, 0.0).expect("finite input");
                let snapped = close(heading, FRAC_PI_2) || close(heading, 3.0 * FRAC_PI_2);
                let lower = (-FRAC_PI_2 - EPS..=FRAC_PI_2 + EPS).contains(&heading);
                assert!(snapped || lower, "dx={dx} dy={dy} heading={heading}");
            }
        }
    }

    #[test]
    fn when_any_coordinate_is_not_finite_then_invalid_argument() {
        assert_eq!(
            aim_heading(f32::NAN, 0.0, 0.0, 0.0),
            Err(GeometryError::InvalidArgument)
        );
        assert_eq!(
            aim_heading(0.0, f32::INFINITY, 0.0, 0.0),
            Err(GeometryError::InvalidArgument)
        );
        assert_eq!(
            aim_heading(0.0, 0.0, f32::NEG_INFINITY, 0.0),
            Err(GeometryError::InvalidArgument)
        );
        assert_eq!(
            aim_heading(0.0, 0.0, 0.0, f32::NAN),
            Err(GeometryError::InvalidArgument)
        );
    }
}
