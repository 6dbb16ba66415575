//! Synthetic dataset under test
//!
//! A [`Dataset`] is an ordered list of [`Record`]s. It serializes as a bare
//! sequence, so every codec sees the same shape.

pub mod generator;

pub use generator::{clock_seed, DatasetGenerator, ALPHABET};

use serde::{Deserialize, Serialize};

/// One synthetic test entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Alphanumeric text
    pub text: String,
    /// Random signed integers, as many as the text is long
    pub sequence: Vec<i64>,
    /// Random signed scalar
    pub scalar: i64,
    /// Random float in `[0, 1)`
    pub fraction: f64,
}

/// Ordered collection of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap an existing list of records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Empty dataset with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Borrow the records
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Index of the first record whose float is NaN or infinite
    pub fn first_non_finite(&self) -> Option<usize> {
        self.records.iter().position(|r| !r.fraction.is_finite())
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Dataset> for Vec<Record> {
    fn from(dataset: Dataset) -> Self {
        dataset.records
    }
}
