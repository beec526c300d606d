//! Tests for line family records and the `.pat` text format

#[cfg(test)]
mod tests {
    use hatchcraft::HatchError;
    use hatchcraft::io::configuration::{DEFAULT_PATTERN_DESCRIPTION, DEFAULT_PATTERN_NAME};
    use hatchcraft::math::numeric::approx_eq;
    use hatchcraft::pattern::definition::TYPE_MARKER;
    use hatchcraft::pattern::tiling::RepeatVector;
    use hatchcraft::pattern::{LineFamily, PatternDefinition, TileSize};
    use hatchcraft::vector::Point;

    fn stroke_family() -> LineFamily {
        LineFamily {
            angle: 0.0,
            origin: Point::new(1.0, 5.0),
            repeat: RepeatVector {
                delta_parallel: 0.0,
                delta_perpendicular: 10.0,
            },
            dashes: vec![8.0, -2.0],
        }
    }

    fn square_tile() -> TileSize {
        TileSize::new(10.0, 10.0).unwrap_or_else(|_| TileSize::unit())
    }

    fn expect_parse_error(text: &str) -> (usize, String) {
        match PatternDefinition::parse(text) {
            Err(HatchError::PatternParse { line, reason }) => (line, reason),
            other => unreachable!("expected a parse error, got {other:?}"),
        }
    }

    // Tests family frame vectors, offset, and period
    // Verified by returning the sum of signed tokens as the period
    #[test]
    fn test_family_properties() {
        let family = stroke_family();
        assert!(approx_eq(family.offset(), 5.0, 1e-12));
        assert_eq!(family.period(), Some(10.0));
        assert!(approx_eq(family.normal().y, 1.0, 1e-12));

        let continuous = LineFamily {
            dashes: Vec::new(),
            ..stroke_family()
        };
        assert_eq!(continuous.period(), None);
    }

    // Tests the full text of a serialized definition
    // Verified by writing the size line before the type marker
    #[test]
    fn test_serialize_layout() {
        let definition = PatternDefinition::new(
            "STROKE",
            "single dash",
            square_tile(),
            vec![stroke_family()],
        );
        assert_eq!(
            definition.serialize(5),
            "*STROKE, single dash\n;%TYPE=MODEL\n; Size: 10.00000x10.00000 units\n\
             0.00000, 1.00000, 5.00000, 0.00000, 10.00000, 8.00000, -2.00000\n"
        );
        assert_eq!(definition.to_string(), definition.serialize(5));
        assert_eq!(definition.dash_token_count(), 2);
        assert_eq!(definition.max_dash_tokens(), 2);
    }

    // Tests negative zero never reaches the output
    // Verified by formatting without rounding first
    #[test]
    fn test_no_negative_zero() {
        let family = LineFamily {
            origin: Point::new(-0.000_001, -0.0),
            ..stroke_family()
        };
        let record = family.to_record(5);
        assert!(!record.contains("-0.00000"), "{record}");
        assert!(!record.contains('e'));
    }

    // Tests header sanitization and defaults
    // Verified by keeping commas in the name
    #[test]
    fn test_header_sanitization() {
        let definition = PatternDefinition::new("A,B\nC", "two\nlines", square_tile(), Vec::new());
        assert_eq!(definition.name(), "A B C");
        assert_eq!(definition.description(), "two lines");
        assert!(definition.is_empty());

        let unnamed = PatternDefinition::new("  ", "", square_tile(), Vec::new());
        assert_eq!(unnamed.name(), DEFAULT_PATTERN_NAME);
        assert_eq!(unnamed.description(), DEFAULT_PATTERN_DESCRIPTION);
        assert!(unnamed.serialize(5).contains(TYPE_MARKER));
    }

    // Tests parsing reproduces the serialized text exactly
    // Verified by dropping the dash tokens while parsing
    #[test]
    fn test_parse_round_trip() {
        let definition = PatternDefinition::new(
            "MIXED",
            "round trip",
            square_tile(),
            vec![
                stroke_family(),
                LineFamily {
                    angle: 45.0,
                    origin: Point::new(0.25, 0.75),
                    repeat: RepeatVector {
                        delta_parallel: 7.07107,
                        delta_perpendicular: 7.07107,
                    },
                    dashes: Vec::new(),
                },
            ],
        );
        let text = definition.serialize(5);
        let parsed = PatternDefinition::parse(&text);

        let Ok(parsed) = parsed else {
            unreachable!("serialized text must parse");
        };
        assert_eq!(parsed.serialize(5), text);
        assert_eq!(parsed.families().len(), 2);
        assert_eq!(parsed.name(), "MIXED");
        assert!(approx_eq(parsed.tile().width, 10.0, 1e-12));
    }

    // Tests comments and blank lines are skipped and the tile defaults to 1x1
    // Verified by treating every comment as a size line
    #[test]
    fn test_parse_without_size() {
        let text = "*P, d\n\n; a comment\n90, 0, 0, 0, 1\n";
        let Ok(parsed) = PatternDefinition::parse(text) else {
            unreachable!("text is well formed");
        };
        assert_eq!(parsed.tile(), TileSize::unit());
        assert_eq!(parsed.families().len(), 1);
        assert!(parsed.families()[0].dashes.is_empty());
    }

    // Tests malformed records report their line numbers
    // Verified by counting lines from zero
    #[test]
    fn test_parse_errors() {
        let (line, reason) = expect_parse_error("*P, d\n;%TYPE=MODEL\n0, 0, 0\n");
        assert_eq!(line, 3);
        assert!(reason.contains("at least 5"), "{reason}");

        let (line, reason) = expect_parse_error("*P, d\n0, a, 0, 0, 1\n");
        assert_eq!(line, 2);
        assert!(reason.contains("'a'"), "{reason}");

        let (line, _) = expect_parse_error("\n\n; Size: 10 by 10 units\n");
        assert_eq!(line, 3);

        let (line, _) = expect_parse_error("; Size: 0x10 units\n");
        assert_eq!(line, 1);

        let (line, _) = expect_parse_error("0, 0, 0, 0, 1, inf\n");
        assert_eq!(line, 1);
    }
}
