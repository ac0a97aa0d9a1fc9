//! Filter settings: the caller-facing configuration surface.
//!
//! Settings are plain strings (a quality threshold plus ordered
//! key/threshold pairs) and stay uninterpreted until
//! [`FilterSpec::compile`](crate::filtering::FilterSpec::compile) turns them
//! into an executable plan. They load from TOML files, build from built-in
//! per-flavor tables, and take CLI overrides on top.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VarsiftError};
use crate::vcf::VcfFlavor;

/// One INFO filter as configured: a field key and a threshold expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoFilterSetting {
    /// Field key: `KEY`, `KEY[i]`, or `sum(KEY[i],KEY[j])`
    pub key: String,
    /// Threshold expression, e.g. `<30` or `>0.05&<0.95`
    pub threshold: String,
}

/// Filter configuration as the caller sees it.
///
/// Serialized as TOML with one `[[info]]` table per filter; entry order is
/// preserved and becomes evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Records with QUAL below this are rejected outright
    pub quality_threshold: f64,
    #[serde(default)]
    pub info: Vec<InfoFilterSetting>,
}

impl FilterSettings {
    /// The built-in table for mpileup-produced VCF 4.1:
    ///
    /// | key                   | threshold      | rejects                      |
    /// |-----------------------|----------------|------------------------------|
    /// | MQ                    | `<30`          | low mapping quality          |
    /// | AF1                   | `>0.05&<0.95`  | mid-band allele frequency    |
    /// | DP                    | `<4`           | shallow depth                |
    /// | sum(DP4[2],DP4[3])    | `<2`           | under two alternate reads    |
    /// | PV4[0]                | `<0.001`       | strand bias                  |
    /// | PV4[2]                | `<0.001`       | map-quality bias             |
    /// | PV4[3]                | `<0.001`       | tail-distance bias           |
    ///
    /// with a quality gate of 50.
    pub fn mpileup_v41() -> Self {
        let info = [
            ("MQ", "<30"),
            ("AF1", ">0.05&<0.95"),
            ("DP", "<4"),
            ("sum(DP4[2],DP4[3])", "<2"),
            ("PV4[0]", "<0.001"),
            ("PV4[2]", "<0.001"),
            ("PV4[3]", "<0.001"),
        ];
        Self {
            quality_threshold: 50.0,
            info: info
                .into_iter()
                .map(|(key, threshold)| InfoFilterSetting {
                    key: key.to_string(),
                    threshold: threshold.to_string(),
                })
                .collect(),
        }
    }

    /// Settings that let every record through. The starting point for forced
    /// runs on unrecognised input, where only caller-supplied filters apply.
    pub fn pass_all() -> Self {
        Self {
            quality_threshold: 0.0,
            info: Vec::new(),
        }
    }

    /// The built-in table for a detected flavor, `None` when there is none.
    pub fn defaults_for(flavor: VcfFlavor) -> Option<Self> {
        match flavor {
            VcfFlavor::MpileupV41 => Some(Self::mpileup_v41()),
            VcfFlavor::Unknown => None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VarsiftError::Io {
            source: e,
            context: format!("failed to read filter settings from {}", path.display()),
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Insert a filter for `key`, or replace its threshold if one exists.
    /// New entries evaluate after all existing ones.
    pub fn upsert(&mut self, key: &str, threshold: &str) {
        match self.info.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.threshold = threshold.to_string(),
            None => self.info.push(InfoFilterSetting {
                key: key.to_string(),
                threshold: threshold.to_string(),
            }),
        }
    }

    /// Apply CLI overrides: each `KEY<THRESHOLD>` string upserts an entry,
    /// and an explicit quality value replaces the gate.
    pub fn apply_overrides(&mut self, filters: &[String], quality: Option<f64>) -> Result<()> {
        for raw in filters {
            let (key, threshold) = split_filter_arg(raw)?;
            self.upsert(&key, &threshold);
        }
        if let Some(quality) = quality {
            self.quality_threshold = quality;
        }
        Ok(())
    }
}

/// Split a combined filter argument like `MQ<30` or `sum(DP4[2],DP4[3])<2`
/// into its key and threshold at the first comparison operator. Keys never
/// contain `<` or `>`, so the split point is unambiguous.
pub fn split_filter_arg(text: &str) -> Result<(String, String)> {
    let position = text.find(['<', '>']).ok_or_else(|| VarsiftError::InvalidFilterSyntax {
        expression: text.to_string(),
        reason: "expected a comparison operator (one of <, <=, >, >=)".to_string(),
    })?;
    let (key, threshold) = text.split_at(position);
    let key = key.trim();
    if key.is_empty() {
        return Err(VarsiftError::InvalidFilterSyntax {
            expression: text.to_string(),
            reason: "missing field key before the comparison".to_string(),
        });
    }
    Ok((key.to_string(), threshold.trim().to_string()))
}
