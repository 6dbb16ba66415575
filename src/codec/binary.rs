//! Binary tagged codec (CBOR)
//!
//! The dataset is written as one definite-length CBOR array. On decode the
//! array header sizes the destination before any record is read.

use super::{Codec, Format};
use crate::dataset::Dataset;
use crate::error::{CodecError, CodecResult};

/// CBOR adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn format(&self) -> Format {
        Format::Binary
    }

    fn encode(&self, dataset: &Dataset) -> CodecResult<Vec<u8>> {
        serde_cbor::to_vec(dataset).map_err(|e| CodecError::encode(Format::Binary, e))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Dataset> {
        serde_cbor::from_slice(bytes).map_err(|e| CodecError::decode(Format::Binary, e))
    }
}
