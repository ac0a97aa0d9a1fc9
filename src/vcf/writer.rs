// VCF output: record sinks and the line-oriented writer
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, VarsiftError};
use crate::vcf::header::VcfHeader;
use crate::vcf::record::VariantRecord;

/// Destination for records in stream order.
///
/// The partitioner pushes each record to exactly one sink as soon as its
/// verdict is known, so implementations never see records out of order.
pub trait RecordSink {
    fn write_record(&mut self, record: &VariantRecord) -> Result<()>;

    /// Flush any buffered output. Called once after the last record.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink, mainly for tests and library callers.
impl RecordSink for Vec<VariantRecord> {
    fn write_record(&mut self, record: &VariantRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Writes a VCF stream: header lines verbatim, then each record's source
/// line unchanged.
pub struct VcfWriter<W: Write> {
    output: W,
}

impl VcfWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| VarsiftError::Io {
            source: e,
            context: format!("failed to create {}", path.display()),
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> VcfWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Write every header line, byte for byte, in the order read.
    pub fn write_header(&mut self, header: &VcfHeader) -> Result<()> {
        for line in &header.lines {
            writeln!(self.output, "{}", line).map_err(write_error)?;
        }
        Ok(())
    }
}

impl<W: Write> RecordSink for VcfWriter<W> {
    fn write_record(&mut self, record: &VariantRecord) -> Result<()> {
        writeln!(self.output, "{}", record.raw).map_err(write_error)
    }

    fn finish(&mut self) -> Result<()> {
        self.output.flush().map_err(write_error)
    }
}

fn write_error(e: std::io::Error) -> VarsiftError {
    VarsiftError::Io {
        source: e,
        context: "failed to write VCF output".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcf::reader::VcfReader;
    use std::io::Cursor;

    #[test]
    fn test_roundtrip_preserves_bytes() {
        let input = "\
##fileformat=VCFv4.1\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
1\t100\t.\tA\tT\t60\t.\tDP=10;DP4=0,0,8,9\n";

        let reader = VcfReader::new(Cursor::new(input)).unwrap();
        let header = reader.header().clone();
        let mut writer = VcfWriter::new(Vec::new());
        writer.write_header(&header).unwrap();
        for record in reader.records() {
            writer.write_record(&record.unwrap()).unwrap();
        }
        writer.finish().unwrap();
        assert_eq!(String::from_utf8(writer.output).unwrap(), input);
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<VariantRecord> = Vec::new();
        let a = VariantRecord::parse("1\t100\t.\tA\tT\t60\t.\tDP=10", 1).unwrap();
        let b = VariantRecord::parse("1\t200\t.\tC\tG\t60\t.\tDP=12", 2).unwrap();
        sink.write_record(&a).unwrap();
        sink.write_record(&b).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].pos, 100);
        assert_eq!(sink[1].pos, 200);
    }
}
