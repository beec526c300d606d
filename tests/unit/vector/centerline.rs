//! Tests for stroke following on thinned masks

#[cfg(test)]
mod tests {
    use crate::common::stroke_mask;
    use hatchcraft::raster::BinaryMask;
    use hatchcraft::vector::Point;
    use hatchcraft::vector::centerline::trace_centerlines;
    use hatchcraft::vector::contour::ContourConfig;

    fn square_loop() -> BinaryMask {
        stroke_mask(
            20,
            20,
            &[
                ((4, 4), (15, 4)),
                ((15, 4), (15, 15)),
                ((15, 15), (4, 15)),
                ((4, 15), (4, 4)),
            ],
        )
    }

    // Tests a one-pixel loop is followed once as a closed polyline
    // Verified by tracing the loop from every pixel
    #[test]
    fn test_loop_traced_once() {
        let chains = trace_centerlines(&square_loop(), &ContourConfig::default());

        assert_eq!(chains.len(), 1);
        assert!(chains[0].is_closed());
        assert_eq!(chains[0].len(), 44);
        assert_eq!(chains[0].points().first(), Some(&Point::new(4.0, 4.0)));
    }

    // Tests a junction splits the strokes into chains that end at the node
    // Verified by continuing through junction pixels
    #[test]
    fn test_junction_splits_chains() {
        let mask = stroke_mask(24, 24, &[((2, 10), (20, 10)), ((11, 10), (11, 20))]);
        let chains = trace_centerlines(&mask, &ContourConfig::default());

        assert_eq!(chains.len(), 3);
        assert!(chains.iter().all(|chain| !chain.is_closed()));
        let mut lengths: Vec<usize> = chains.iter().map(|chain| chain.len()).collect();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![10, 10, 11]);

        let junction = Point::new(11.0, 10.0);
        for chain in &chains {
            let ends = [chain.points().first(), chain.points().last()];
            assert!(ends.contains(&Some(&junction)));
        }
    }

    // Tests a four-connected staircase reads as one stroke, not a run of junctions
    // Verified by linking diagonals next to a shared side pixel
    #[test]
    fn test_staircase_is_one_chain() {
        let mut mask = BinaryMask::new(16, 16);
        for k in 0..8 {
            mask.set(2 + k, 2 + k, true);
            mask.set(3 + k, 2 + k, true);
        }
        let chains = trace_centerlines(&mask, &ContourConfig::default());

        assert_eq!(chains.len(), 1);
        assert!(!chains[0].is_closed());
        assert_eq!(chains[0].len(), 16);
        assert_eq!(chains[0].points().first(), Some(&Point::new(2.0, 2.0)));
        assert_eq!(chains[0].points().last(), Some(&Point::new(10.0, 9.0)));
    }

    // Tests short chains and isolated pixels fall below the noise floor
    // Verified by keeping chains without checking their length
    #[test]
    fn test_noise_floor() {
        let mut mask = stroke_mask(20, 20, &[((5, 5), (7, 5)), ((5, 10), (15, 10))]);
        mask.set(18, 18, true);
        let chains = trace_centerlines(&mask, &ContourConfig::default());

        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].points().first(), Some(&Point::new(5.0, 10.0)));

        assert!(trace_centerlines(&BinaryMask::new(10, 10), &ContourConfig::default()).is_empty());
    }

    // Tests the area floor applies to closed loops but not to open chains
    // Verified by filtering open chains by their zero area
    #[test]
    fn test_area_floor_closed_only() {
        let config = ContourConfig {
            min_area: 200.0,
            ..ContourConfig::default()
        };
        assert!(trace_centerlines(&square_loop(), &config).is_empty());

        let stroke = stroke_mask(20, 20, &[((2, 10), (17, 10))]);
        assert_eq!(trace_centerlines(&stroke, &config).len(), 1);
    }
}
