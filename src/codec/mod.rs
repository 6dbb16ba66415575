//! Codec adapters
//!
//! Each adapter turns a whole [`Dataset`] into bytes and back. The adapters
//! are stateless; the runner drives them through the [`Codec`] trait.

pub mod binary;
pub mod markup;
pub mod structured;

pub use binary::BinaryCodec;
pub use markup::{MarkupCodec, MarkupRecordStream};
pub use structured::StructuredCodec;

use crate::dataset::Dataset;
use crate::error::CodecResult;
use std::fmt;

/// Wire formats under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Binary, self-describing, tagged (CBOR)
    Binary,
    /// Structured text (JSON)
    Structured,
    /// Markup text (XML)
    Markup,
}

impl Format {
    /// All formats, in the order a run visits them
    pub const ALL: [Format; 3] = [Format::Binary, Format::Structured, Format::Markup];

    /// Short label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Format::Binary => "CBOR",
            Format::Structured => "JSON",
            Format::Markup => "XML",
        }
    }

    /// File name of this format's artifact
    pub fn artifact_file_name(self) -> &'static str {
        match self {
            Format::Binary => "binary.cbor",
            Format::Structured => "structured.json",
            Format::Markup => "markup.xml",
        }
    }

    /// The adapter for this format
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Format::Binary => Box::new(BinaryCodec),
            Format::Structured => Box::new(StructuredCodec),
            Format::Markup => Box::new(MarkupCodec),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uniform encode/decode interface over one wire format
pub trait Codec {
    /// Format this adapter speaks
    fn format(&self) -> Format;

    /// Encode the whole dataset
    fn encode(&self, dataset: &Dataset) -> CodecResult<Vec<u8>>;

    /// Decode a whole dataset; never returns a partial collection
    fn decode(&self, bytes: &[u8]) -> CodecResult<Dataset>;
}

/// One adapter per format, in run order
pub fn all_codecs() -> Vec<Box<dyn Codec>> {
    Format::ALL.iter().map(|format| format.codec()).collect()
}
