// Compilation of caller-facing settings into an executable plan
use crate::config::{FilterSettings, InfoFilterSetting};
use crate::error::{Result, VarsiftError};

use super::field::{parse_field_key, FieldAccessor};
use super::threshold::{parse_threshold, ThresholdExpr};

/// One compiled INFO filter: the configuration strings it came from plus
/// their parsed forms.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    /// Raw key string, e.g. `sum(DP4[2],DP4[3])`
    pub key: String,
    /// Raw threshold string, e.g. `<2`
    pub threshold: String,
    pub accessor: FieldAccessor,
    pub expr: ThresholdExpr,
}

/// A fully compiled filter plan. Building one validates every key and
/// threshold up front, so evaluation never hits a syntax error.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    /// Records with QUAL below this are rejected before any field filter runs
    pub quality_threshold: f64,
    /// Field filters in configuration order, which is evaluation order
    pub field_filters: Vec<FieldFilter>,
}

impl FilterSpec {
    pub fn compile(settings: &FilterSettings) -> Result<Self> {
        let mut field_filters = Vec::with_capacity(settings.info.len());
        for entry in &settings.info {
            let accessor = parse_field_key(&entry.key).map_err(|e| recompose(entry, e))?;
            let expr = parse_threshold(&entry.threshold).map_err(|e| recompose(entry, e))?;
            field_filters.push(FieldFilter {
                key: entry.key.clone(),
                threshold: entry.threshold.clone(),
                accessor,
                expr,
            });
        }
        Ok(Self {
            quality_threshold: settings.quality_threshold,
            field_filters,
        })
    }
}

/// Rewrite a syntax error so it names the whole offending entry, the way the
/// caller wrote it.
fn recompose(entry: &InfoFilterSetting, err: VarsiftError) -> VarsiftError {
    match err {
        VarsiftError::InvalidFilterSyntax { reason, .. } => VarsiftError::InvalidFilterSyntax {
            expression: format!("{}{}", entry.key, entry.threshold),
            reason,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::threshold::Comparison;

    #[test]
    fn test_compile_default_table() {
        let spec = FilterSpec::compile(&FilterSettings::mpileup_v41()).unwrap();
        assert_eq!(spec.quality_threshold, 50.0);
        assert_eq!(spec.field_filters.len(), 7);
        assert_eq!(spec.field_filters[0].key, "MQ");
        assert_eq!(
            spec.field_filters[0].expr,
            ThresholdExpr::Leaf(Comparison::LessThan(30.0))
        );
        assert_eq!(spec.field_filters[3].key, "sum(DP4[2],DP4[3])");
        assert!(matches!(
            spec.field_filters[3].accessor,
            FieldAccessor::Aggregate { .. }
        ));
    }

    #[test]
    fn test_compile_preserves_order() {
        let settings = FilterSettings {
            quality_threshold: 10.0,
            info: vec![
                InfoFilterSetting { key: "B".to_string(), threshold: "<1".to_string() },
                InfoFilterSetting { key: "A".to_string(), threshold: "<2".to_string() },
            ],
        };
        let spec = FilterSpec::compile(&settings).unwrap();
        assert_eq!(spec.field_filters[0].key, "B");
        assert_eq!(spec.field_filters[1].key, "A");
    }

    #[test]
    fn test_compile_error_names_the_entry() {
        let settings = FilterSettings {
            quality_threshold: 10.0,
            info: vec![InfoFilterSetting {
                key: "MQ".to_string(),
                threshold: "<<30".to_string(),
            }],
        };
        match FilterSpec::compile(&settings).unwrap_err() {
            VarsiftError::InvalidFilterSyntax { expression, .. } => {
                assert_eq!(expression, "MQ<<30");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_compile_rejects_bad_key() {
        let settings = FilterSettings {
            quality_threshold: 10.0,
            info: vec![InfoFilterSetting {
                key: "sum(DP4[2],PV4[3])".to_string(),
                threshold: "<2".to_string(),
            }],
        };
        assert!(FilterSpec::compile(&settings).is_err());
    }
}
