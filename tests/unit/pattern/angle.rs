//! Tests for angle normalization and snapping to the canonical sets

#[cfg(test)]
mod tests {
    use hatchcraft::math::numeric::approx_eq;
    use hatchcraft::pattern::AngleSet;
    use hatchcraft::pattern::angle::{BRICK_SHALLOW, BRICK_STEEP, line_axis, normalize_degrees};

    // Tests reduction of arbitrary angles to the undirected axis
    // Verified by wrapping on 360 only
    #[test]
    fn test_line_axis() {
        assert!(approx_eq(normalize_degrees(-90.0), 270.0, 1e-12));
        assert!(approx_eq(normalize_degrees(720.0), 0.0, 1e-12));
        assert!(approx_eq(line_axis(190.0), 10.0, 1e-12));
        assert!(approx_eq(line_axis(-45.0), 135.0, 1e-12));
        assert!(approx_eq(line_axis(180.0), 0.0, 1e-12));
    }

    // Tests snapping of near-canonical directions
    // Verified by measuring distance on the full circle
    #[test]
    fn test_basic_quantize() {
        let set = AngleSet::Basic;
        assert!(approx_eq(set.quantize(3.0), 0.0, 1e-12));
        assert!(approx_eq(set.quantize(177.0), 0.0, 1e-12));
        assert!(approx_eq(set.quantize(47.0), 45.0, 1e-12));
        assert!(approx_eq(set.quantize(225.0), 45.0, 1e-12));
        assert!(approx_eq(set.quantize(268.0), 90.0, 1e-12));
        assert!(approx_eq(set.quantize(-40.0), 135.0, 1e-12));
    }

    // Tests ties resolve to the member listed first
    // Verified by comparing with <= when folding
    #[test]
    fn test_ties_prefer_first_member() {
        let set = AngleSet::Basic;
        assert_eq!(set.nearest_index(22.5), 0);
        assert_eq!(set.nearest_index(67.5), 1);
        assert_eq!(set.nearest_index(112.5), 2);
        assert_eq!(set.nearest_index(157.5), 0);
    }

    // Tests the brick-bond diagonals are only available in the extended set
    // Verified by sharing one angle table between both sets
    #[test]
    fn test_brick_bond_angles() {
        assert_eq!(AngleSet::Basic.angles().len(), 4);
        assert_eq!(AngleSet::BrickBond.angles().len(), 8);
        assert!(approx_eq(BRICK_SHALLOW, 0.5f64.atan().to_degrees(), 1e-9));
        assert!(approx_eq(BRICK_STEEP, 2.0f64.atan().to_degrees(), 1e-9));

        assert!(approx_eq(AngleSet::BrickBond.quantize(25.0), BRICK_SHALLOW, 1e-12));
        assert!(approx_eq(AngleSet::BrickBond.quantize(200.0), BRICK_SHALLOW, 1e-12));
        assert!(approx_eq(AngleSet::BrickBond.quantize(118.0), 180.0 - BRICK_STEEP, 1e-12));
        assert!(approx_eq(AngleSet::Basic.quantize(25.0), 45.0, 1e-12));
        assert!(approx_eq(AngleSet::Basic.quantize(20.0), 0.0, 1e-12));
    }

    // Tests snapping an already snapped angle changes nothing
    // Verified by returning the member index instead of its angle
    #[test]
    fn test_quantize_idempotent() {
        for set in [AngleSet::Basic, AngleSet::BrickBond] {
            for step in 0..720 {
                let degrees = f64::from(step) * 0.5 - 90.0;
                let once = set.quantize(degrees);
                assert!(approx_eq(set.quantize(once), once, 1e-12));
            }
        }
    }

    // Tests every member lies in the half-turn range
    // Verified by adding 180 to one of the steep diagonals
    #[test]
    fn test_members_in_range() {
        for set in [AngleSet::Basic, AngleSet::BrickBond] {
            assert!(set.angles().iter().all(|&a| (0.0..180.0).contains(&a)));
        }
        assert_eq!(AngleSet::default(), AngleSet::Basic);
    }
}
