//! Tests for Douglas-Peucker simplification of open and closed polylines

#[cfg(test)]
mod tests {
    use hatchcraft::vector::simplify::{douglas_peucker, simplify};
    use hatchcraft::vector::{Point, Polyline};

    fn jagged_line() -> Vec<Point> {
        (0..=20)
            .map(|i| Point::new(f64::from(i), if i % 2 == 0 { 0.0 } else { 0.2 }))
            .collect()
    }

    // Tests small deviations collapse to the chord
    // Verified by dropping the endpoints
    #[test]
    fn test_collapses_noise() {
        let reduced = douglas_peucker(&jagged_line(), 0.5);
        assert_eq!(reduced, vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0)]);
    }

    // Tests a real corner survives
    // Verified by comparing with >= instead of >
    #[test]
    fn test_keeps_corner() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.1),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let reduced = douglas_peucker(&points, 0.5);
        assert_eq!(
            reduced,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
    }

    // Tests vertex counts never grow as the tolerance grows
    // Verified by reversing the comparison against the tolerance
    #[test]
    fn test_monotone_in_tolerance() {
        let points: Vec<Point> = (0..200)
            .map(|i| {
                let t = f64::from(i) * 0.1;
                Point::new(t, (t * 1.7).sin() * 3.0)
            })
            .collect();

        let mut previous = usize::MAX;
        for tolerance in [0.0, 0.01, 0.1, 0.5, 1.0, 5.0] {
            let count = douglas_peucker(&points, tolerance).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    // Tests a closed square keeps its four corners
    // Verified by treating closed loops as open chains
    #[test]
    fn test_closed_square() {
        let mut points = Vec::new();
        for i in 0..10 {
            points.push(Point::new(f64::from(i), 0.0));
        }
        for i in 0..10 {
            points.push(Point::new(10.0, f64::from(i)));
        }
        for i in 0..10 {
            points.push(Point::new(10.0 - f64::from(i), 10.0));
        }
        for i in 0..10 {
            points.push(Point::new(0.0, 10.0 - f64::from(i)));
        }

        let Some(reduced) = simplify(&Polyline::new(points, true), 0.01) else {
            unreachable!("square must survive simplification");
        };
        assert!(reduced.is_closed());
        assert_eq!(reduced.len(), 4);
        assert!(reduced.points().contains(&Point::new(10.0, 10.0)));
        assert_eq!(reduced.segments().len(), 4);
    }

    // Tests an out-and-back stroke becomes a single chord
    // Verified by keeping the returning vertices
    #[test]
    fn test_out_and_back_stroke() {
        let mut points: Vec<Point> = (0..=10).map(|i| Point::new(f64::from(i), 3.0)).collect();
        points.extend((1..10).rev().map(|i| Point::new(f64::from(i), 3.0)));

        let Some(reduced) = simplify(&Polyline::new(points, true), 0.005) else {
            unreachable!("stroke must survive simplification");
        };
        assert_eq!(
            reduced.points(),
            &[Point::new(0.0, 3.0), Point::new(10.0, 3.0)]
        );
        assert_eq!(reduced.segments().len(), 1);
    }

    // Tests single points cannot form a polyline
    // Verified by returning one-vertex polylines
    #[test]
    fn test_single_point_rejected() {
        assert!(simplify(&Polyline::new(vec![Point::new(1.0, 1.0)], true), 0.01).is_none());
        assert!(douglas_peucker(&[], 1.0).is_empty());
    }
}
