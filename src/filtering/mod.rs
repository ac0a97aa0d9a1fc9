//! Threshold-expression engine for VCF variant records.
//!
//! Components:
//! - `threshold`: the comparison grammar (`<30`, `>0.05&<0.95`, `<10|>90`)
//! - `field`: field-key grammar and INFO resolution (`MQ`, `PV4[0]`, `sum(DP4[2],DP4[3])`)
//! - `spec`: compilation of settings into an executable plan
//! - `types`: decisions and run counters
//!
//! [`VariantFilter`] ties them together: per-record evaluation and one-pass
//! stream partitioning.

mod field;
mod spec;
mod threshold;
mod types;

pub use field::{parse_field_key, AggregateFn, FieldAccessor};
pub use spec::{FieldFilter, FilterSpec};
pub use threshold::{parse_threshold, Comparison, ThresholdExpr};
pub use types::{FilterDecision, FilterOutcome};

use std::time::Instant;

use crate::error::{Result, VarsiftError};
use crate::vcf::{RecordSink, VariantRecord};

pub(crate) fn syntax_error(expression: &str, reason: impl Into<String>) -> VarsiftError {
    VarsiftError::InvalidFilterSyntax {
        expression: expression.to_string(),
        reason: reason.into(),
    }
}

/// Applies a compiled [`FilterSpec`] to variant records.
pub struct VariantFilter {
    spec: FilterSpec,
}

impl VariantFilter {
    pub fn new(spec: FilterSpec) -> Self {
        Self { spec }
    }

    /// Evaluate one record: the quality gate first, then field filters in
    /// configured order, stopping at the first one that fires.
    ///
    /// A record with no QUAL value skips the gate rather than failing it.
    pub fn evaluate(&self, record: &VariantRecord) -> Result<FilterDecision> {
        match record.quality {
            Some(quality) if quality < self.spec.quality_threshold => {
                tracing::debug!(
                    "record at line {} rejected: QUAL {} below {}",
                    record.line,
                    quality,
                    self.spec.quality_threshold
                );
                return Ok(FilterDecision::Reject);
            }
            None => tracing::debug!("record at line {} has no QUAL, quality gate skipped", record.line),
            _ => {}
        }
        for filter in &self.spec.field_filters {
            let Some(value) = filter.accessor.resolve(record)? else {
                continue;
            };
            if filter.expr.fires(value) {
                tracing::debug!(
                    "record at line {} rejected by {}{} (value {})",
                    record.line,
                    filter.key,
                    filter.threshold,
                    value
                );
                return Ok(FilterDecision::Reject);
            }
        }
        Ok(FilterDecision::Pass)
    }

    /// Partition a record stream in a single order-preserving pass.
    ///
    /// Passing records go to `primary`; rejected records go to `secondary`
    /// when one is supplied and are dropped otherwise. Each record is written
    /// as soon as its verdict is known. The first fatal error (unreadable
    /// input, out-of-range index) aborts the run.
    pub fn partition<I>(
        &self,
        records: I,
        primary: &mut dyn RecordSink,
        mut secondary: Option<&mut dyn RecordSink>,
    ) -> Result<FilterOutcome>
    where
        I: IntoIterator<Item = Result<VariantRecord>>,
    {
        let start = Instant::now();
        let mut total = 0u64;
        let mut passed = 0u64;
        for record in records {
            let record = record?;
            total += 1;
            match self.evaluate(&record)? {
                FilterDecision::Pass => {
                    passed += 1;
                    primary.write_record(&record)?;
                }
                FilterDecision::Reject => {
                    if let Some(sink) = secondary.as_deref_mut() {
                        sink.write_record(&record)?;
                    }
                }
            }
        }
        let outcome = FilterOutcome {
            total,
            passed,
            filtered: total - passed,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };
        tracing::info!(
            "partitioned {} record(s): {} passed, {} filtered in {}ms",
            outcome.total,
            outcome.passed,
            outcome.filtered,
            outcome.elapsed_ms
        );
        Ok(outcome)
    }
}
