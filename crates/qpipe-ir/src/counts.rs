//! Aggregate gate counts.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of gates per gate type.
///
/// Keys keep the order in which a gate type was first seen, so two runs over
/// the same circuit always render identically. The [`Display`](fmt::Display)
/// form is a dictionary literal: `{'H': 2, 'CNOT': 3}`, or `{}` when empty.
/// Quotes, backslashes and control characters in labels are escaped, so the
/// rendering never spans more than one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateCounts {
    entries: Vec<(String, usize)>,
    index: FxHashMap<String, usize>,
}

impl GateCounts {
    /// Create an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `label`.
    pub fn increment(&mut self, label: &str) {
        self.add(label, 1);
    }

    /// Add `n` occurrences of `label`.
    pub fn add(&mut self, label: &str, n: usize) {
        if let Some(&pos) = self.index.get(label) {
            self.entries[pos].1 += n;
        } else {
            self.index.insert(label.to_string(), self.entries.len());
            self.entries.push((label.to_string(), n));
        }
    }

    /// Count for `label`, if it was seen.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.index.get(label).map(|&pos| self.entries[pos].1)
    }

    /// Number of distinct gate types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no gates were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of gates across all types.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Iterate over `(label, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(label, n)| (label.as_str(), *n))
    }

    /// JSON object with the same key order as the display form.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(label, n)| (label.clone(), serde_json::Value::from(*n)))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for GateCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (label, n)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("'")?;
            for ch in label.chars() {
                match ch {
                    '\'' => f.write_str("\\'")?,
                    '\\' => f.write_str("\\\\")?,
                    '\n' => f.write_str("\\n")?,
                    '\r' => f.write_str("\\r")?,
                    '\t' => f.write_str("\\t")?,
                    c if c.is_control() => write!(f, "\\x{:02x}", u32::from(c))?,
                    _ => write!(f, "{ch}")?,
                }
            }
            write!(f, "': {n}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for GateCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, n) in &self.entries {
            map.serialize_entry(label, n)?;
        }
        map.end()
    }
}

impl<'a> FromIterator<&'a str> for GateCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Self::new();
        for label in iter {
            counts.increment(label);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_display() {
        assert_eq!(GateCounts::new().to_string(), "{}");
    }

    #[test]
    fn test_first_seen_order() {
        let counts: GateCounts = ["CNOT", "H", "CNOT", "H", "CNOT"].into_iter().collect();
        assert_eq!(counts.to_string(), "{'CNOT': 3, 'H': 2}");
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get("H"), Some(2));
        assert_eq!(counts.get("X"), None);
    }

    #[test]
    fn test_quote_escaping() {
        let counts: GateCounts = ["it's"].into_iter().collect();
        assert_eq!(counts.to_string(), "{'it\\'s': 1}");
    }

    proptest::proptest! {
        #[test]
        fn prop_counts_sum_to_input(labels in proptest::collection::vec("[A-Z]{1,3}", 0..64)) {
            let counts: GateCounts = labels.iter().map(String::as_str).collect();
            proptest::prop_assert_eq!(counts.total(), labels.len());
            for (label, n) in counts.iter() {
                let expected = labels.iter().filter(|l| l.as_str() == label).count();
                proptest::prop_assert_eq!(n, expected);
            }
        }
    }

    #[test]
    fn test_control_characters_escaped() {
        let counts: GateCounts = ["my\ngate", "a\tb\r", "bell\u{7}"].into_iter().collect();
        let text = counts.to_string();
        assert_eq!(text, "{'my\\ngate': 1, 'a\\tb\\r': 1, 'bell\\x07': 1}");
        assert!(!text.chars().any(char::is_control));
    }

    #[test]
    fn test_json_keeps_order() {
        let counts: GateCounts = ["Z", "A"].into_iter().collect();
        assert_eq!(counts.to_json().to_string(), r#"{"Z":1,"A":1}"#);
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"Z":1,"A":1}"#);
    }
}
