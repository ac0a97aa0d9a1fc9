// Field-key grammar and INFO value resolution
use crate::error::{Result, VarsiftError};
use crate::vcf::{InfoValue, VariantRecord};

use super::syntax_error;

/// Aggregation applied across several elements of one INFO list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    Sum,
}

/// A parsed field key: where in a record's INFO map a filter reads its value.
///
/// `Direct` addresses a scalar (`DP`) or one element of a list (`PV4[0]`).
/// `Aggregate` folds several elements of one list into a single value
/// (`sum(DP4[2],DP4[3])`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessor {
    Direct {
        key: String,
        index: Option<usize>,
    },
    Aggregate {
        function: AggregateFn,
        key: String,
        indices: Vec<usize>,
    },
}

impl FieldAccessor {
    /// The INFO key this accessor reads.
    pub fn base_key(&self) -> &str {
        match self {
            FieldAccessor::Direct { key, .. } => key,
            FieldAccessor::Aggregate { key, .. } => key,
        }
    }

    /// Resolve the accessor against one record's INFO map.
    ///
    /// `Ok(None)` means the filter cannot apply to this record (key absent,
    /// or value non-numeric) and is skipped; addressing past the end of a
    /// present list is a hard error carrying the record's line number.
    pub fn resolve(&self, record: &VariantRecord) -> Result<Option<f64>> {
        let key = self.base_key();
        let Some(value) = record.info.get(key) else {
            tracing::warn!(
                "INFO field '{}' absent on record at line {}, filter skipped",
                key,
                record.line
            );
            return Ok(None);
        };
        match self {
            FieldAccessor::Direct { index, .. } => match value {
                // an index on a scalar field is ignored
                InfoValue::Number(scalar) => Ok(Some(*scalar)),
                InfoValue::Numbers(values) => {
                    let index = index.unwrap_or(0);
                    match values.get(index) {
                        Some(element) => Ok(Some(*element)),
                        None => Err(out_of_range(key, index, values.len(), record.line)),
                    }
                }
                InfoValue::Flag | InfoValue::Text(_) => {
                    skip_non_numeric(key, record.line);
                    Ok(None)
                }
            },
            FieldAccessor::Aggregate { indices, .. } => match value {
                // a scalar behaves like a one-element list
                InfoValue::Number(scalar) => {
                    let mut sum = 0.0;
                    for &index in indices {
                        if index != 0 {
                            return Err(out_of_range(key, index, 1, record.line));
                        }
                        sum += *scalar;
                    }
                    Ok(Some(sum))
                }
                InfoValue::Numbers(values) => {
                    let mut sum = 0.0;
                    for &index in indices {
                        match values.get(index) {
                            Some(element) => sum += element,
                            None => return Err(out_of_range(key, index, values.len(), record.line)),
                        }
                    }
                    Ok(Some(sum))
                }
                InfoValue::Flag | InfoValue::Text(_) => {
                    skip_non_numeric(key, record.line);
                    Ok(None)
                }
            },
        }
    }
}

fn skip_non_numeric(key: &str, line: u64) {
    tracing::warn!(
        "INFO field '{}' is not numeric on record at line {}, filter skipped",
        key,
        line
    );
}

fn out_of_range(key: &str, index: usize, len: usize, line: u64) -> VarsiftError {
    VarsiftError::IndexOutOfRange {
        key: key.to_string(),
        index,
        len,
        line,
    }
}

/// Parse a field key: `KEY`, `KEY[i]`, or `sum(KEY[i],KEY[j],...)`.
pub fn parse_field_key(key: &str) -> Result<FieldAccessor> {
    let trimmed = key.trim();
    if let Some(interior) = trimmed.strip_prefix("sum(") {
        let interior = interior
            .strip_suffix(')')
            .ok_or_else(|| syntax_error(key, "'sum(' without a closing ')'"))?;
        let parts: Vec<&str> = interior.split(',').map(str::trim).collect();
        if parts.len() < 2 {
            return Err(syntax_error(key, "sum() takes at least two KEY[i] arguments"));
        }
        let (base, first) = parse_indexed_key(key, parts[0])?;
        let mut indices = Vec::with_capacity(parts.len());
        indices.push(first);
        for part in &parts[1..] {
            let (other, index) = parse_indexed_key(key, part)?;
            if other != base {
                return Err(syntax_error(
                    key,
                    format!("sum() arguments must address one field, found '{base}' and '{other}'"),
                ));
            }
            indices.push(index);
        }
        Ok(FieldAccessor::Aggregate {
            function: AggregateFn::Sum,
            key: base,
            indices,
        })
    } else if trimmed.contains('(') {
        Err(syntax_error(key, "only the sum(...) aggregate is supported"))
    } else if trimmed.contains('[') {
        let (base, index) = parse_indexed_key(key, trimmed)?;
        Ok(FieldAccessor::Direct {
            key: base,
            index: Some(index),
        })
    } else if trimmed.is_empty() {
        Err(syntax_error(key, "empty field key"))
    } else {
        Ok(FieldAccessor::Direct {
            key: trimmed.to_string(),
            index: None,
        })
    }
}

/// Parse `KEY[i]` into its base key and index.
fn parse_indexed_key(expression: &str, text: &str) -> Result<(String, usize)> {
    let (base, rest) = text
        .split_once('[')
        .ok_or_else(|| syntax_error(expression, format!("'{text}' must use KEY[index] syntax")))?;
    let (index_text, tail) = rest
        .split_once(']')
        .ok_or_else(|| syntax_error(expression, format!("'{text}' has '[' without a matching ']'")))?;
    if !tail.trim().is_empty() {
        return Err(syntax_error(expression, format!("unexpected '{tail}' after ']'")));
    }
    let base = base.trim();
    if base.is_empty() {
        return Err(syntax_error(expression, "missing field name before '['"));
    }
    let index_text = index_text.trim();
    let index = index_text.parse::<usize>().map_err(|_| {
        syntax_error(expression, format!("'{index_text}' is not a non-negative integer index"))
    })?;
    Ok((base.to_string(), index))
}
