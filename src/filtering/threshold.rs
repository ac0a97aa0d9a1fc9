// Threshold-expression grammar: comparison leaves and one-level combinators
use crate::error::Result;

use super::syntax_error;

/// One comparison against a fixed bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    LessThan(f64),
    LessOrEqual(f64),
    GreaterThan(f64),
    GreaterOrEqual(f64),
}

impl Comparison {
    /// True when `value` satisfies the comparison. A firing comparison marks
    /// the record for rejection.
    pub fn fires(&self, value: f64) -> bool {
        match *self {
            Comparison::LessThan(bound) => value < bound,
            Comparison::LessOrEqual(bound) => value <= bound,
            Comparison::GreaterThan(bound) => value > bound,
            Comparison::GreaterOrEqual(bound) => value >= bound,
        }
    }
}

/// A parsed threshold expression: a single comparison, or exactly two joined
/// by `&` or `|`. The grammar is flat, so nesting cannot occur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdExpr {
    Leaf(Comparison),
    And(Comparison, Comparison),
    Or(Comparison, Comparison),
}

impl ThresholdExpr {
    pub fn fires(&self, value: f64) -> bool {
        match self {
            ThresholdExpr::Leaf(leaf) => leaf.fires(value),
            ThresholdExpr::And(left, right) => left.fires(value) && right.fires(value),
            ThresholdExpr::Or(left, right) => left.fires(value) || right.fires(value),
        }
    }
}

/// Parse a threshold expression such as `<30`, `>=0.5`, `>0.05&<0.95` or
/// `<10|>90`. Splits on the first `&` or `|`; mixing both is rejected.
pub fn parse_threshold(text: &str) -> Result<ThresholdExpr> {
    if text.contains('&') && text.contains('|') {
        return Err(syntax_error(text, "'&' and '|' cannot be combined in one expression"));
    }
    if let Some((left, right)) = text.split_once('&') {
        Ok(ThresholdExpr::And(parse_leaf(text, left)?, parse_leaf(text, right)?))
    } else if let Some((left, right)) = text.split_once('|') {
        Ok(ThresholdExpr::Or(parse_leaf(text, left)?, parse_leaf(text, right)?))
    } else {
        Ok(ThresholdExpr::Leaf(parse_leaf(text, text)?))
    }
}

/// Parse one comparison leaf. `expression` is the full threshold string the
/// leaf came from, used in error reports.
fn parse_leaf(expression: &str, leaf: &str) -> Result<Comparison> {
    let leaf = leaf.trim();
    let (make, bound_text): (fn(f64) -> Comparison, &str) =
        if let Some(rest) = leaf.strip_prefix("<=") {
            (Comparison::LessOrEqual, rest)
        } else if let Some(rest) = leaf.strip_prefix(">=") {
            (Comparison::GreaterOrEqual, rest)
        } else if let Some(rest) = leaf.strip_prefix('<') {
            (Comparison::LessThan, rest)
        } else if let Some(rest) = leaf.strip_prefix('>') {
            (Comparison::GreaterThan, rest)
        } else {
            return Err(syntax_error(
                expression,
                format!("'{leaf}' must start with one of <, <=, >, >="),
            ));
        };
    let bound_text = bound_text.trim();
    let bound = bound_text
        .parse::<f64>()
        .map_err(|_| syntax_error(expression, format!("'{bound_text}' is not a numeric bound")))?;
    Ok(make(bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VarsiftError;

    #[test]
    fn test_parse_leaves() {
        assert_eq!(
            parse_threshold("<30").unwrap(),
            ThresholdExpr::Leaf(Comparison::LessThan(30.0))
        );
        assert_eq!(
            parse_threshold("<=0.5").unwrap(),
            ThresholdExpr::Leaf(Comparison::LessOrEqual(0.5))
        );
        assert_eq!(
            parse_threshold(">60").unwrap(),
            ThresholdExpr::Leaf(Comparison::GreaterThan(60.0))
        );
        assert_eq!(
            parse_threshold(">=0.001").unwrap(),
            ThresholdExpr::Leaf(Comparison::GreaterOrEqual(0.001))
        );
    }

    #[test]
    fn test_parse_combinators() {
        assert_eq!(
            parse_threshold(">0.05&<0.95").unwrap(),
            ThresholdExpr::And(Comparison::GreaterThan(0.05), Comparison::LessThan(0.95))
        );
        assert_eq!(
            parse_threshold("<10|>90").unwrap(),
            ThresholdExpr::Or(Comparison::LessThan(10.0), Comparison::GreaterThan(90.0))
        );
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!(
            parse_threshold(" > 0.05 & < 0.95 ").unwrap(),
            ThresholdExpr::And(Comparison::GreaterThan(0.05), Comparison::LessThan(0.95))
        );
    }

    #[test]
    fn test_parse_rejects_mixed_combinators() {
        let err = parse_threshold("<30&>60|<5").unwrap_err();
        assert!(matches!(err, VarsiftError::InvalidFilterSyntax { .. }));
    }

    #[test]
    fn test_parse_rejects_extra_combinator() {
        assert!(parse_threshold("<30&>60&<5").is_err());
        assert!(parse_threshold("<30|>60|").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_leaves() {
        assert!(parse_threshold("30").is_err());
        assert!(parse_threshold("<abc").is_err());
        assert!(parse_threshold("=30").is_err());
        assert!(parse_threshold("").is_err());
        assert!(parse_threshold("<").is_err());
    }

    #[test]
    fn test_error_carries_expression_and_reason() {
        match parse_threshold("<<30").unwrap_err() {
            VarsiftError::InvalidFilterSyntax { expression, reason } => {
                assert_eq!(expression, "<<30");
                assert!(reason.contains("numeric bound"), "reason: {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_fires_semantics() {
        let below_thirty = parse_threshold("<30").unwrap();
        assert!(below_thirty.fires(29.9));
        assert!(!below_thirty.fires(30.0));

        let at_most_thirty = parse_threshold("<=30").unwrap();
        assert!(at_most_thirty.fires(30.0));
        assert!(!at_most_thirty.fires(30.1));

        let band = parse_threshold(">0.05&<0.95").unwrap();
        assert!(band.fires(0.5));
        assert!(!band.fires(0.05));
        assert!(!band.fires(1.0));

        let tails = parse_threshold("<10|>90").unwrap();
        assert!(tails.fires(5.0));
        assert!(tails.fires(95.0));
        assert!(!tails.fires(50.0));
    }

    #[test]
    fn test_nan_never_fires() {
        for text in ["<30", "<=30", ">30", ">=30", ">0.05&<0.95", "<10|>90"] {
            assert!(
                !parse_threshold(text).unwrap().fires(f64::NAN),
                "{text} fired on NaN"
            );
        }
    }
}
