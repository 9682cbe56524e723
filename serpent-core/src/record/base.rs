//! Named values for logging.
use crate::error::SerpentError;
use std::collections::{hash_map::Iter, HashMap};

/// Represents possible types of values in a [`Record`].
///
/// Episode statistics and training losses are all scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, like a loss or a score.
    Scalar(f32),
}

/// A set of values keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, SerpentError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            None => Err(SerpentError::RecordKeyError(k.to_string())),
        }
    }

    /// The number of values in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_scalar() {
        let record = Record::from_slice(&[
            ("loss", RecordValue::Scalar(0.5)),
            ("score", RecordValue::Scalar(2.0)),
        ]);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get_scalar("loss"), Ok(0.5));
        assert_eq!(record.get_scalar("score"), Ok(2.0));
        assert_eq!(
            record.get_scalar("step"),
            Err(SerpentError::RecordKeyError("step".into()))
        );
    }

    #[test]
    fn test_from_slice_keeps_last_duplicate() {
        let record = Record::from_slice(&[
            ("a", RecordValue::Scalar(1.0)),
            ("a", RecordValue::Scalar(3.0)),
        ]);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get_scalar("a"), Ok(3.0));
    }
}
