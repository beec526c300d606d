//! Tests for conversion statistics and warnings

#[cfg(test)]
mod tests {
    use hatchcraft::pattern::{PatternDefinition, TileSize};
    use hatchcraft::pipeline::{ConversionStats, ConversionSuccess, ConversionWarning};
    use image::RgbImage;

    // Tests the one-line summary names every counter
    // Verified by swapping the segment and contour counts
    #[test]
    fn test_summary() {
        let stats = ConversionStats {
            contours: 4,
            segments: 12,
            degenerate_segments: 2,
            discarded_families: 1,
            families: 3,
            dash_tokens: 6,
        };
        assert_eq!(
            stats.summary(),
            "Generated 12 vector segments from 4 contours into 3 line families \
             (6 dash tokens, 2 degenerate segments dropped)"
        );
    }

    // Tests warning messages
    // Verified by reporting the family count as the token count
    #[test]
    fn test_warning_display() {
        assert_eq!(
            ConversionWarning::EmptyGeometry.to_string(),
            "no line families were detected"
        );
        let complex = ConversionWarning::ExcessiveComplexity {
            families: 300,
            max_dash_tokens: 40,
        };
        assert_eq!(
            complex.to_string(),
            "pattern is complex (300 families, up to 40 dash tokens per family)"
        );
        assert_eq!(
            ConversionWarning::UnclosedTiling { families: 2 }.to_string(),
            "2 families do not repeat on the tile and will show seams"
        );
    }

    // Tests warning lookup and serialization precision
    // Verified by ignoring the stored precision
    #[test]
    fn test_success_accessors() {
        let success = ConversionSuccess {
            pattern: PatternDefinition::new("P", "d", TileSize::unit(), Vec::new()),
            preview: RgbImage::new(1, 1),
            overlay: None,
            stats: ConversionStats::default(),
            warnings: vec![ConversionWarning::EmptyGeometry],
            precision: 2,
        };

        assert!(success.has_warning(|w| *w == ConversionWarning::EmptyGeometry));
        assert!(!success.has_warning(|w| matches!(w, ConversionWarning::ExcessiveComplexity { .. })));
        assert!(success.pattern_text().contains("; Size: 1.00x1.00 units"));
    }
}
