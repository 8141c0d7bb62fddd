//! Tests for ring guide geometry

#[cfg(test)]
mod tests {
    use pixelbloom::spatial::ellipse::{ArrangementGuide, MIN_RADIUS};
    use std::f64::consts::{FRAC_PI_2, PI};

    // Tests radii are floored to the minimum radius
    // Verified by accepting zero radii
    #[test]
    fn test_radius_floor() {
        let guide = ArrangementGuide::new(0.0, 0.0, 0.0, f64::NAN);
        assert!((guide.radius_x - MIN_RADIUS).abs() < f64::EPSILON);
        assert!((guide.radius_y - MIN_RADIUS).abs() < f64::EPSILON);
    }

    // Tests positive angles point downward on screen
    // Verified by negating the sine term
    #[test]
    fn test_point_at() {
        let guide = ArrangementGuide::new(10.0, 20.0, 4.0, 2.0);
        let (x, y) = guide.point_at(FRAC_PI_2);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 22.0).abs() < 1e-9);
        let (x, _) = guide.point_at(PI);
        assert!((x - 6.0).abs() < 1e-9);
    }

    // Tests scaling and shifting keep the other properties
    // Verified by scaling about the origin
    #[test]
    fn test_scaled_and_shifted() {
        let guide = ArrangementGuide::new(5.0, 5.0, 10.0, 4.0);
        let scaled = guide.scaled(0.5);
        assert!((scaled.center_x - 5.0).abs() < 1e-12);
        assert!((scaled.radius_x - 5.0).abs() < 1e-12);
        assert!((scaled.area() - guide.area() / 4.0).abs() < 1e-9);

        let shifted = guide.shifted_y(-3.0);
        assert!((shifted.center_y - 2.0).abs() < 1e-12);
        assert!((shifted.radius_y - guide.radius_y).abs() < 1e-12);
    }
}
