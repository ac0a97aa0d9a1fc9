// VCF header model and flavor detection
use std::fmt;

/// The leading `#` lines of a VCF file, with the fields varsift dispatches on
/// pulled out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VcfHeader {
    /// All header lines in file order, including the `#CHROM` column line
    pub lines: Vec<String>,
    /// Version from `##fileformat=VCFv<version>`
    pub version: Option<String>,
    /// Producing tool from `##source=`, falling back to `##samtoolsVersion=`
    pub source: Option<String>,
}

impl VcfHeader {
    pub fn parse(lines: Vec<String>) -> Self {
        let mut version = None;
        let mut source = None;
        let mut samtools = None;
        for line in &lines {
            if let Some(value) = line.strip_prefix("##fileformat=") {
                let value = value.trim();
                version = Some(value.strip_prefix("VCFv").unwrap_or(value).to_string());
            } else if let Some(value) = line.strip_prefix("##source=") {
                source = Some(value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("##samtoolsVersion=") {
                samtools = Some(format!("samtools {}", value.trim()));
            }
        }
        Self {
            lines,
            version,
            source: source.or(samtools),
        }
    }

    /// Detected dialect, used to pick a built-in filter table.
    pub fn flavor(&self) -> VcfFlavor {
        match self.version.as_deref() {
            Some("4.1") => VcfFlavor::MpileupV41,
            _ => VcfFlavor::Unknown,
        }
    }
}

/// VCF dialects varsift ships a default filter table for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcfFlavor {
    /// VCF 4.1 as produced by the samtools/bcftools mpileup lineage
    MpileupV41,
    /// Anything varsift has no built-in table for
    Unknown,
}

impl fmt::Display for VcfFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcfFlavor::MpileupV41 => write!(f, "mpileup VCF 4.1"),
            VcfFlavor::Unknown => write!(f, "unrecognised"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(lines: &[&str]) -> VcfHeader {
        VcfHeader::parse(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_mpileup_v41_detected() {
        let header = header(&[
            "##fileformat=VCFv4.1",
            "##samtoolsVersion=0.1.19-44428cd",
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
        ]);
        assert_eq!(header.version.as_deref(), Some("4.1"));
        assert_eq!(header.source.as_deref(), Some("samtools 0.1.19-44428cd"));
        assert_eq!(header.flavor(), VcfFlavor::MpileupV41);
    }

    #[test]
    fn test_other_versions_are_unknown() {
        let header = header(&["##fileformat=VCFv4.2", "##source=freeBayes v1.3.6"]);
        assert_eq!(header.version.as_deref(), Some("4.2"));
        assert_eq!(header.source.as_deref(), Some("freeBayes v1.3.6"));
        assert_eq!(header.flavor(), VcfFlavor::Unknown);
    }

    #[test]
    fn test_missing_fileformat_is_unknown() {
        let header = header(&["#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO"]);
        assert_eq!(header.version, None);
        assert_eq!(header.flavor(), VcfFlavor::Unknown);
    }

    #[test]
    fn test_source_preferred_over_samtools_version() {
        let header = header(&[
            "##fileformat=VCFv4.1",
            "##source=custom-caller",
            "##samtoolsVersion=0.1.19",
        ]);
        assert_eq!(header.source.as_deref(), Some("custom-caller"));
    }
}
