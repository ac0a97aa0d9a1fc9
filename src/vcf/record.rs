// Variant record model and VCF data-line parsing
use ahash::{HashMap, HashMapExt};

use crate::error::{Result, VarsiftError};

/// One INFO entry value.
///
/// VCF INFO entries are untyped on the wire; varsift parses numbers where
/// possible and keeps everything else as text. Filters only ever compare
/// numeric values, so `Flag` and `Text` entries behave like missing fields
/// when a filter addresses them.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    /// Key present without a value (e.g. `INDEL`)
    Flag,
    /// Single numeric value (e.g. `DP=179`)
    Number(f64),
    /// Comma-separated numeric list (e.g. `DP4=0,0,80,99`)
    Numbers(Vec<f64>),
    /// Anything non-numeric (e.g. `ANN=missense`)
    Text(String),
}

/// One data line of a VCF file.
///
/// The engine reads `quality` and `info`; the remaining columns are kept for
/// diagnostics and `raw` preserves the exact source line so writers can emit
/// records in the stream's native serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt: String,
    /// QUAL column; `.` parses to `None`
    pub quality: Option<f64>,
    pub filter: String,
    /// Parsed INFO column
    pub info: HashMap<String, InfoValue>,
    /// The unmodified source line
    pub raw: String,
    /// 1-based line number in the source stream
    pub line: u64,
}

impl VariantRecord {
    /// Parse one VCF data line. `line` is the 1-based source line number,
    /// carried through for diagnostics.
    pub fn parse(text: &str, line: u64) -> Result<Self> {
        let columns: Vec<&str> = text.split('\t').collect();
        if columns.len() < 8 {
            return Err(VarsiftError::MalformedRecord {
                line,
                reason: format!(
                    "expected at least 8 tab-separated columns, found {}",
                    columns.len()
                ),
            });
        }

        let pos = columns[1].parse::<u64>().map_err(|_| VarsiftError::MalformedRecord {
            line,
            reason: format!("POS '{}' is not an integer", columns[1]),
        })?;

        let quality = match columns[5] {
            "." => None,
            text => Some(text.parse::<f64>().map_err(|_| VarsiftError::MalformedRecord {
                line,
                reason: format!("QUAL '{}' is not numeric", text),
            })?),
        };

        Ok(Self {
            chrom: columns[0].to_string(),
            pos,
            id: columns[2].to_string(),
            ref_allele: columns[3].to_string(),
            alt: columns[4].to_string(),
            quality,
            filter: columns[6].to_string(),
            info: parse_info(columns[7]),
            raw: text.to_string(),
            line,
        })
    }
}

/// Parse the `;`-separated INFO column into a map.
fn parse_info(text: &str) -> HashMap<String, InfoValue> {
    let mut info = HashMap::new();
    if text == "." {
        return info;
    }
    for entry in text.split(';') {
        if entry.is_empty() {
            continue;
        }
        match entry.split_once('=') {
            None => {
                info.insert(entry.to_string(), InfoValue::Flag);
            }
            Some((key, value)) => {
                info.insert(key.to_string(), parse_info_value(value));
            }
        }
    }
    info
}

fn parse_info_value(text: &str) -> InfoValue {
    if text.contains(',') {
        let mut values = Vec::new();
        for element in text.split(',') {
            match parse_element(element) {
                Some(value) => values.push(value),
                None => return InfoValue::Text(text.to_string()),
            }
        }
        InfoValue::Numbers(values)
    } else {
        match parse_element(text) {
            Some(value) => InfoValue::Number(value),
            None => InfoValue::Text(text.to_string()),
        }
    }
}

/// `.` marks a missing measurement and becomes NaN; comparisons against NaN
/// never fire, so an absent value cannot reject a record.
fn parse_element(text: &str) -> Option<f64> {
    if text == "." {
        return Some(f64::NAN);
    }
    text.parse::<f64>().ok()
}
