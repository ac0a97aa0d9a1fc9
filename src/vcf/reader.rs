// Streaming VCF reader: eager header, lazy records
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, VarsiftError};
use crate::vcf::header::VcfHeader;
use crate::vcf::record::VariantRecord;

/// Line-oriented VCF reader.
///
/// The header is consumed eagerly on construction so callers can inspect the
/// flavor before deciding how to filter; data lines are parsed lazily, one
/// record per iterator step.
#[derive(Debug)]
pub struct VcfReader<R: BufRead> {
    input: R,
    header: VcfHeader,
    /// First data line, captured while scanning past the header
    pending: Option<(u64, String)>,
    line: u64,
}

impl VcfReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| VarsiftError::Io {
            source: e,
            context: format!("failed to open {}", path.display()),
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> VcfReader<R> {
    /// Wrap a buffered input and read its header.
    pub fn new(mut input: R) -> Result<Self> {
        let mut lines = Vec::new();
        let mut pending = None;
        let mut line = 0u64;
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = input.read_line(&mut buf).map_err(|e| VarsiftError::Io {
                source: e,
                context: "failed to read VCF header".to_string(),
            })?;
            if read == 0 {
                break;
            }
            line += 1;
            let text = buf.trim_end_matches(['\n', '\r']);
            if text.is_empty() {
                continue;
            }
            if text.starts_with('#') {
                lines.push(text.to_string());
            } else {
                pending = Some((line, text.to_string()));
                break;
            }
        }
        Ok(Self {
            input,
            header: VcfHeader::parse(lines),
            pending,
            line,
        })
    }

    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Consume the reader, yielding parsed records in stream order.
    pub fn records(self) -> Records<R> {
        Records {
            input: self.input,
            pending: self.pending,
            line: self.line,
            buf: String::new(),
        }
    }
}

/// Iterator over the data lines of a [`VcfReader`].
#[derive(Debug)]
pub struct Records<R: BufRead> {
    input: R,
    pending: Option<(u64, String)>,
    line: u64,
    buf: String,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((line, text)) = self.pending.take() {
            return Some(VariantRecord::parse(&text, line));
        }
        loop {
            self.buf.clear();
            match self.input.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let text = self.buf.trim_end_matches(['\n', '\r']);
                    if text.is_empty() {
                        continue;
                    }
                    return Some(VariantRecord::parse(text, self.line));
                }
                Err(e) => {
                    return Some(Err(VarsiftError::Io {
                        source: e,
                        context: format!("failed to read VCF record at line {}", self.line + 1),
                    }))
                }
            }
        }
    }
}
