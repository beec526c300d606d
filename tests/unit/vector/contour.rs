//! Tests for border tracing and noise-floor filtering

#[cfg(test)]
mod tests {
    use crate::common::block_mask;
    use hatchcraft::raster::BinaryMask;
    use hatchcraft::vector::contour::{ContourConfig, ContourMode, trace_contours};

    fn ring() -> BinaryMask {
        let mut mask = block_mask(30, 30, &[(5, 5, 25, 25)]);
        for y in 10..20 {
            for x in 10..20 {
                mask.set(x, y, false);
            }
        }
        mask
    }

    // Tests outer-only mode ignores hole borders
    // Verified by keeping every border type
    #[test]
    fn test_outer_only_mode() {
        let config = ContourConfig {
            mode: ContourMode::Outer,
            ..ContourConfig::default()
        };
        let contours = trace_contours(&ring(), &config);
        assert_eq!(contours.len(), 1);
        assert!(contours.iter().all(|c| c.is_closed()));
    }

    // Tests all mode also returns hole borders
    // Verified by filtering to outer borders only
    #[test]
    fn test_all_mode_includes_holes() {
        let contours = trace_contours(&ring(), &ContourConfig::default());
        assert_eq!(contours.len(), 2);
    }

    // Tests perimeter and area noise floors
    // Verified by comparing the floors with the wrong measure
    #[test]
    fn test_noise_floor() {
        let mut mask = block_mask(40, 40, &[(2, 2, 4, 4), (10, 10, 30, 30)]);
        mask.set(35, 35, true);

        let default = trace_contours(&mask, &ContourConfig::default());
        assert_eq!(default.len(), 2);

        let strict = ContourConfig {
            min_perimeter: 20.0,
            ..ContourConfig::default()
        };
        assert_eq!(trace_contours(&mask, &strict).len(), 1);

        let by_area = ContourConfig {
            min_area: 100.0,
            ..ContourConfig::default()
        };
        assert_eq!(trace_contours(&mask, &by_area).len(), 1);
    }

    // Tests an empty mask yields no contours
    // Verified by emitting the image border
    #[test]
    fn test_empty_mask() {
        assert!(trace_contours(&BinaryMask::new(10, 10), &ContourConfig::default()).is_empty());
    }
}
