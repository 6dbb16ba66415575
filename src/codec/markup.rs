//! Markup text codec (XML)
//!
//! Encoding writes one `<record>` element per record, back to back, with no
//! enclosing root. Decoding is streaming: [`MarkupRecordStream`] parses one
//! element at a time until the reader reports end of input, so the decode
//! cost includes per-record parse overhead.
//!
//! Between and after records the stream skips whitespace, XML declarations,
//! comments, processing instructions and doctypes. Anything else, including
//! a truncated element, is a decode error.

use super::{Codec, Format};
use crate::dataset::{Dataset, Record};
use crate::error::{CodecError, CodecResult};
use quick_xml::events::Event;
use quick_xml::se::Serializer;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

/// Element name of one serialized record
pub const RECORD_TAG: &str = "record";

/// Decode-side shape of a `<record>` element
///
/// An empty sequence is written as no `<sequence>` elements at all, so only
/// that field may be absent. Every other field is required.
#[derive(Deserialize)]
struct MarkupRecord {
    text: String,
    #[serde(default)]
    sequence: Vec<i64>,
    scalar: i64,
    fraction: f64,
}

impl From<MarkupRecord> for Record {
    fn from(record: MarkupRecord) -> Self {
        Record {
            text: record.text,
            sequence: record.sequence,
            scalar: record.scalar,
            fraction: record.fraction,
        }
    }
}

/// XML adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupCodec;

impl Codec for MarkupCodec {
    fn format(&self) -> Format {
        Format::Markup
    }

    fn encode(&self, dataset: &Dataset) -> CodecResult<Vec<u8>> {
        let mut out = String::new();
        for record in dataset {
            let serializer = Serializer::with_root(&mut out, Some(RECORD_TAG))
                .map_err(|e| CodecError::encode(Format::Markup, e))?;
            record
                .serialize(serializer)
                .map_err(|e| CodecError::encode(Format::Markup, e))?;
        }
        Ok(out.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Dataset> {
        let mut stream = MarkupRecordStream::new(bytes)?;
        let mut dataset = Dataset::default();
        while let Some(record) = stream.next_record()? {
            dataset.push(record);
        }
        Ok(dataset)
    }
}

/// Record-at-a-time reader over back-to-back `<record>` elements
pub struct MarkupRecordStream<'a> {
    input: &'a str,
    reader: Reader<&'a [u8]>,
    finished: bool,
}

impl<'a> MarkupRecordStream<'a> {
    /// Start reading `bytes`, which must be UTF-8
    pub fn new(bytes: &'a [u8]) -> CodecResult<Self> {
        let input = std::str::from_utf8(bytes).map_err(decode_error)?;
        Ok(Self {
            input,
            reader: Reader::from_str(input),
            finished: false,
        })
    }

    /// Decode the next record, or `None` once the input is exhausted
    pub fn next_record(&mut self) -> CodecResult<Option<Record>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let start = self.reader.buffer_position() as usize;
            match self.reader.read_event().map_err(decode_error)? {
                Event::Start(tag) => {
                    if tag.name().as_ref() != RECORD_TAG.as_bytes() {
                        return Err(unexpected_element(tag.name().as_ref(), start));
                    }
                    self.reader.read_to_end(tag.name()).map_err(decode_error)?;
                    let end = self.reader.buffer_position() as usize;
                    return self.parse_fragment(start, end).map(Some);
                }
                Event::Empty(tag) => {
                    if tag.name().as_ref() != RECORD_TAG.as_bytes() {
                        return Err(unexpected_element(tag.name().as_ref(), start));
                    }
                    let end = self.reader.buffer_position() as usize;
                    return self.parse_fragment(start, end).map(Some);
                }
                Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => continue,
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                Event::Eof => {
                    self.finished = true;
                    return Ok(None);
                }
                other => {
                    return Err(CodecError::decode(
                        Format::Markup,
                        format!("unexpected {other:?} at byte {start}"),
                    ))
                }
            }
        }
    }

    fn parse_fragment(&self, start: usize, end: usize) -> CodecResult<Record> {
        let fragment = self.input.get(start..end).ok_or_else(|| {
            CodecError::decode(Format::Markup, format!("bad element span {start}..{end}"))
        })?;
        quick_xml::de::from_str::<MarkupRecord>(fragment)
            .map(Record::from)
            .map_err(|e| {
                CodecError::decode(Format::Markup, format!("record at byte {start}: {e}"))
            })
    }
}

impl Iterator for MarkupRecordStream<'_> {
    type Item = CodecResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

fn decode_error(err: impl ToString) -> CodecError {
    CodecError::decode(Format::Markup, err)
}

fn unexpected_element(name: &[u8], at: usize) -> CodecError {
    CodecError::decode(
        Format::Markup,
        format!(
            "unexpected element <{}> at byte {at}",
            String::from_utf8_lossy(name)
        ),
    )
}
