//! # Attribute Mappings
//!
//! Every scene-graph chunk carries a DICT: an int32 count followed by that
//! many (key, value) string pairs. Order is preserved and keys may repeat;
//! lookups return the first match.

use crate::error::DecodeResult;
use crate::reader::ByteReader;

/// Ordered key/value string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Reads a DICT from the chunk cursor.
    ///
    /// # Errors
    ///
    /// Fails on a negative count or a truncated string.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let count = reader.read_len("attribute count")?;
        // Cap the reservation: the count comes from untrusted input.
        let mut entries = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            let key = reader.read_string()?;
            let value = reader.read_string()?;
            entries.push((key, value));
        }
        Ok(Self { entries })
    }

    /// Appends a pair, keeping any earlier entry with the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Returns the value of the first entry with `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if any entry has `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parses the first value for `key` as a float.
    ///
    /// Absent keys yield `default`; a present value that fails to parse
    /// yields `0.0`. Parsing ignores the process locale: `.` is the decimal
    /// point and `,` a group separator, so `"1,5"` reads as `15`.
    #[must_use]
    pub fn get_f32_or(&self, key: &str, default: f32) -> f32 {
        self.get(key).map_or(default, |v| {
            let digits: String = v.trim().chars().filter(|&c| c != ',').collect();
            digits.parse::<f32>().unwrap_or(0.0)
        })
    }

    /// Number of pairs, duplicates included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no pairs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(pairs: &[(&str, &str)]) -> Vec<u8> {
        let mut out = i32::try_from(pairs.len()).unwrap().to_le_bytes().to_vec();
        for (k, v) in pairs {
            for s in [k, v] {
                out.extend_from_slice(&i32::try_from(s.len()).unwrap().to_le_bytes());
                out.extend_from_slice(s.as_bytes());
            }
        }
        out
    }

    #[test]
    fn test_read_preserves_order() {
        let data = encode(&[("_name", "hull"), ("_hidden", "0")]);
        let attrs = Attributes::read(&mut ByteReader::new(&data)).unwrap();
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["_name", "_hidden"]);
    }

    #[test]
    fn test_first_match_wins() {
        let attrs: Attributes = [("_t", "1 2 3"), ("_t", "4 5 6")].into_iter().collect();
        assert_eq!(attrs.get("_t"), Some("1 2 3"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_float_parsing() {
        let attrs: Attributes = [("_rough", "0.25"), ("_ior", "abc")].into_iter().collect();
        assert!((attrs.get_f32_or("_rough", 1.0) - 0.25).abs() < f32::EPSILON);
        assert!(attrs.get_f32_or("_ior", 1.0).abs() < f32::EPSILON);
        assert!((attrs.get_f32_or("_flux", 1.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_float_group_separators() {
        let attrs: Attributes = [("_ior", " 1,5 "), ("_flux", "1,000.25")].into_iter().collect();
        assert!((attrs.get_f32_or("_ior", 1.0) - 15.0).abs() < f32::EPSILON);
        assert!((attrs.get_f32_or("_flux", 1.0) - 1000.25).abs() < 1e-3);
    }
}
