//! Tests for tile sizes, lattice steps, repeat vectors, periods, and dash sequences

#[cfg(test)]
mod tests {
    use hatchcraft::HatchError;
    use hatchcraft::math::numeric::approx_eq;
    use hatchcraft::pattern::angle::{BRICK_SHALLOW, BRICK_STEEP, HALF_TURN};
    use hatchcraft::pattern::family::{FamilyCluster, Interval};
    use hatchcraft::pattern::tiling::{
        LatticeStep, RepeatVector, TileSize, dash_sequence, is_tileable, lattice_direction,
        parallel_period, repeat_step, repeat_vector, synthesize,
    };
    use hatchcraft::vector::Point;

    fn tile(width: f64, height: f64) -> TileSize {
        TileSize::new(width, height).unwrap_or_else(|_| TileSize::unit())
    }

    fn assert_tokens(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!(approx_eq(*a, *e, 1e-9), "{actual:?} vs {expected:?}");
        }
    }

    // Tests tile validation rejects non-positive and non-finite sides
    // Verified by accepting zero width
    #[test]
    fn test_tile_size_validation() {
        assert!(TileSize::new(10.0, 5.0).is_ok());
        for (w, h) in [(0.0, 1.0), (1.0, -1.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
            assert!(matches!(
                TileSize::new(w, h),
                Err(HatchError::InvalidParameter { .. })
            ));
        }
        let scaled = tile(10.0, 5.0).scaled(2.0);
        assert!(approx_eq(scaled.width, 20.0, 1e-12) && approx_eq(scaled.height, 10.0, 1e-12));
    }

    // Tests the shortest lattice step along each family direction
    // Verified by accepting unreduced steps
    #[test]
    fn test_lattice_direction() {
        let square = tile(10.0, 10.0);
        assert_eq!(lattice_direction(0.0, square), Some(LatticeStep::WIDTH));
        assert_eq!(lattice_direction(90.0, square), Some(LatticeStep::HEIGHT));
        assert_eq!(lattice_direction(45.0, square), Some(LatticeStep::new(1, 1)));
        assert_eq!(lattice_direction(135.0, square), Some(LatticeStep::new(1, -1)));
        assert_eq!(lattice_direction(BRICK_SHALLOW, square), Some(LatticeStep::new(2, 1)));
        assert_eq!(lattice_direction(BRICK_STEEP, square), Some(LatticeStep::new(1, 2)));
        assert_eq!(
            lattice_direction(HALF_TURN - BRICK_SHALLOW, square),
            Some(LatticeStep::new(2, -1))
        );

        let wide = tile(20.0, 10.0);
        assert_eq!(lattice_direction(45.0, wide), Some(LatticeStep::new(1, 2)));
        assert_eq!(lattice_direction(BRICK_SHALLOW, wide), Some(LatticeStep::new(1, 1)));

        let irrational = tile(10.0, 10.0 * 2.0f64.sqrt());
        assert_eq!(lattice_direction(45.0, irrational), None);
        assert!(!is_tileable(45.0, irrational));
        assert!(is_tileable(0.0, irrational));
        assert!(is_tileable(90.0, irrational));
    }

    // Tests the repeat step spans the lattice together with the family direction
    // Verified by always stepping by the tile height for near-horizontal families
    #[test]
    fn test_repeat_step() {
        let square = tile(10.0, 10.0);
        assert_eq!(repeat_step(0.0, square), LatticeStep::HEIGHT);
        assert_eq!(repeat_step(90.0, square), LatticeStep::WIDTH);
        assert_eq!(repeat_step(45.0, square), LatticeStep::HEIGHT);
        assert_eq!(repeat_step(BRICK_SHALLOW, square), LatticeStep::WIDTH);
        assert_eq!(repeat_step(BRICK_STEEP, square), LatticeStep::HEIGHT);
        assert_eq!(repeat_step(HALF_TURN - BRICK_SHALLOW, square), LatticeStep::WIDTH);
        assert_eq!(repeat_step(HALF_TURN - BRICK_STEEP, square), LatticeStep::HEIGHT);

        for angle in [0.0, 45.0, 90.0, 135.0, BRICK_SHALLOW, BRICK_STEEP] {
            for shape in [square, tile(20.0, 10.0), tile(10.0, 30.0)] {
                let Some(direction) = lattice_direction(angle, shape) else {
                    continue;
                };
                let step = repeat_step(angle, shape);
                assert_eq!(direction.cross(step).abs(), 1, "{angle} on {shape:?}");
            }
        }

        let three_by_two = LatticeStep::new(3, 2);
        assert_eq!(three_by_two.cross(LatticeStep::WIDTH), -2);
        assert_eq!(three_by_two.cross(LatticeStep::HEIGHT), 3);
        let angle = 2.0f64.atan2(3.0).to_degrees();
        assert_eq!(lattice_direction(angle, square), Some(three_by_two));
        let complement = repeat_step(angle, square);
        assert_eq!(three_by_two.cross(complement).abs(), 1);
        assert_eq!(complement.to_point(square), Point::new(10.0, 10.0));
    }

    // Tests the repeat vector projects the repeat step onto the family frame
    // Verified by swapping the parallel and perpendicular components
    #[test]
    fn test_repeat_vector_axes() {
        let rect = tile(10.0, 20.0);

        let horizontal = repeat_vector(0.0, rect);
        assert!(approx_eq(horizontal.delta_parallel, 0.0, 1e-12));
        assert!(approx_eq(horizontal.delta_perpendicular, 20.0, 1e-12));

        let vertical = repeat_vector(90.0, rect);
        assert!(approx_eq(vertical.delta_parallel, 0.0, 1e-9));
        assert!(approx_eq(vertical.delta_perpendicular, -10.0, 1e-9));

        let diagonal = repeat_vector(45.0, tile(10.0, 10.0));
        let half_diagonal = 50.0f64.sqrt();
        assert!(approx_eq(diagonal.delta_parallel.abs(), half_diagonal, 1e-9));
        assert!(approx_eq(diagonal.delta_perpendicular.abs(), half_diagonal, 1e-9));
    }

    // Tests the translation reconstructs the repeat step
    // Verified by using the direction for both components
    #[test]
    fn test_repeat_translation() {
        let square = tile(10.0, 10.0);
        for angle in [0.0, 45.0, 90.0, 135.0, BRICK_SHALLOW, BRICK_STEEP] {
            let translation = repeat_vector(angle, square).to_translation(angle);
            let edge = repeat_step(angle, square).to_point(square);
            assert!(approx_eq(translation.x, edge.x, 1e-9));
            assert!(approx_eq(translation.y, edge.y, 1e-9));
        }
        let zero = RepeatVector::default().to_translation(30.0);
        assert_eq!(zero, Point::default());
    }

    // Tests periods for axis-aligned and diagonal families
    // Verified by dividing by the wrong trigonometric component
    #[test]
    fn test_parallel_period() {
        let rect = tile(10.0, 20.0);
        assert!(approx_eq(parallel_period(0.0, rect), 10.0, 1e-12));
        assert!(approx_eq(parallel_period(90.0, rect), 20.0, 1e-9));
        assert!(approx_eq(parallel_period(45.0, tile(10.0, 10.0)), 200.0f64.sqrt(), 1e-9));
        assert!(approx_eq(parallel_period(135.0, tile(10.0, 10.0)), 200.0f64.sqrt(), 1e-9));
    }

    // Tests brick diagonals repeat after the two-tile lattice step
    // Verified by dividing the tile width by the cosine
    #[test]
    fn test_brick_period() {
        let square = tile(10.0, 10.0);
        for angle in [BRICK_SHALLOW, BRICK_STEEP, HALF_TURN - BRICK_SHALLOW] {
            assert!(approx_eq(parallel_period(angle, square), 500.0f64.sqrt(), 1e-9));
        }

        let irrational = tile(10.0, 10.0 * 2.0f64.sqrt());
        assert!(approx_eq(parallel_period(45.0, irrational), 200.0f64.sqrt(), 1e-9));
        assert_eq!(repeat_step(45.0, irrational), LatticeStep::HEIGHT);
    }

    // Tests a single dash closes with the remaining gap
    // Verified by omitting the closing gap
    #[test]
    fn test_single_dash() {
        let layout = dash_sequence(&[Interval::new(1.0, 9.0)], 10.0);
        assert!(approx_eq(layout.start, 1.0, 1e-12));
        assert_tokens(&layout.tokens, &[8.0, -2.0]);
    }

    // Tests a dash running over the period boundary is joined with the first dash
    // Verified by leaving the wrapped part as a separate leading dash
    #[test]
    fn test_dash_folding_across_period() {
        let layout = dash_sequence(&[Interval::new(1.0, 3.0), Interval::new(8.0, 12.0)], 10.0);
        assert!(approx_eq(layout.start, 8.0, 1e-12));
        assert_tokens(&layout.tokens, &[5.0, -5.0]);

        let layout = dash_sequence(
            &[
                Interval::new(0.0, 2.0),
                Interval::new(4.0, 5.0),
                Interval::new(7.0, 10.0),
            ],
            10.0,
        );
        assert!(approx_eq(layout.start, 7.0, 1e-12));
        assert_tokens(&layout.tokens, &[5.0, -2.0, 1.0, -2.0]);
    }

    // Tests intervals beyond one period wrap back into it
    // Verified by skipping the wrap of interval starts
    #[test]
    fn test_intervals_wrap_into_period() {
        let layout = dash_sequence(&[Interval::new(0.0, 2.0), Interval::new(14.0, 16.0)], 10.0);
        assert!(approx_eq(layout.start, 0.0, 1e-12));
        assert_tokens(&layout.tokens, &[2.0, -2.0, 2.0, -4.0]);
        let total: f64 = layout.tokens.iter().map(|t| t.abs()).sum();
        assert!(approx_eq(total, 10.0, 1e-9));
    }

    // Tests full coverage becomes a continuous line
    // Verified by emitting a zero-length closing gap
    #[test]
    fn test_continuous_line() {
        assert!(dash_sequence(&[Interval::new(0.0, 10.0)], 10.0).tokens.is_empty());
        assert!(dash_sequence(&[Interval::new(2.0, 40.0)], 10.0).tokens.is_empty());
        assert!(
            dash_sequence(&[Interval::new(0.0, 6.0), Interval::new(5.0, 10.0)], 10.0)
                .tokens
                .is_empty()
        );
        assert!(dash_sequence(&[], 10.0).tokens.is_empty());
    }

    // Tests the full family record for a single horizontal stroke
    // Verified by placing the origin at the interval end
    #[test]
    fn test_synthesize_horizontal_stroke() {
        let cluster = FamilyCluster {
            angle: 0.0,
            offset: 5.0,
            intervals: vec![Interval::new(1.0, 9.0)],
            segment_count: 1,
        };
        let family = synthesize(&cluster, tile(10.0, 10.0));

        assert_eq!(
            family.to_record(5),
            "0.00000, 1.00000, 5.00000, 0.00000, 10.00000, 8.00000, -2.00000"
        );
    }

    // Tests a vertical family steps by the tile width
    // Verified by stepping vertical families by the tile height
    #[test]
    fn test_synthesize_vertical_family() {
        let cluster = FamilyCluster {
            angle: 90.0,
            offset: -3.0,
            intervals: vec![Interval::new(0.0, 20.0)],
            segment_count: 1,
        };
        let family = synthesize(&cluster, tile(10.0, 20.0));

        assert!(family.dashes.is_empty());
        assert!(approx_eq(family.origin.x, 3.0, 1e-9));
        assert!(approx_eq(family.repeat.delta_perpendicular, -10.0, 1e-9));
    }
}
