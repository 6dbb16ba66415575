//! Structured text codec (JSON)

use super::{Codec, Format};
use crate::dataset::Dataset;
use crate::error::{CodecError, CodecResult};

/// JSON adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredCodec;

impl Codec for StructuredCodec {
    fn format(&self) -> Format {
        Format::Structured
    }

    fn encode(&self, dataset: &Dataset) -> CodecResult<Vec<u8>> {
        // serde_json silently writes `null` for NaN and infinities, which
        // would not decode back into a float
        if let Some(index) = dataset.first_non_finite() {
            return Err(CodecError::encode(
                Format::Structured,
                format!("record {index} has a non-finite float"),
            ));
        }
        serde_json::to_vec(dataset).map_err(|e| CodecError::encode(Format::Structured, e))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Dataset> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::decode(Format::Structured, e))
    }
}
