//! VCF stream model: records, headers, and line-oriented IO.
//!
//! Readers parse the columns the engine dispatches on and keep every line's
//! original bytes, so filtered output is written exactly as it arrived.

mod header;
mod reader;
mod record;
mod writer;

pub use header::{VcfFlavor, VcfHeader};
pub use reader::{Records, VcfReader};
pub use record::{InfoValue, VariantRecord};
pub use writer::{RecordSink, VcfWriter};
