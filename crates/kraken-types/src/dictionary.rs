//! Ordered keyed results with pagination metadata
//!
//! Several Kraken endpoints return a JSON object mapping string keys
//! (asset names, pair names, transaction ids) to payloads, with the
//! paginating ones appending `"last"` and/or `"count"` fields alongside
//! the data entries. [`Dictionary`] models that shape: an
//! insertion-ordered map plus the lifted metadata. Metadata that the
//! response omits stays `None`; it is never defaulted.

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// An ordered string-keyed result collection
///
/// `last` and `count` are reserved keys lifted out of the map during
/// deserialization; they never appear as data entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary<T> {
    entries: IndexMap<String, T>,
    /// Pagination cursor, present only on paginating endpoints
    pub last: Option<String>,
    /// Total entry count, present only on paginating endpoints
    pub count: Option<u64>,
}

impl<T> Dictionary<T> {
    /// Number of data entries (metadata excluded)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over entries in response order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in response order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<T> Default for Dictionary<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            last: None,
            count: None,
        }
    }
}

impl<T> IntoIterator for Dictionary<T> {
    type Item = (String, T);
    type IntoIter = indexmap::map::IntoIter<String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Dictionary<T> {
    type Item = (&'a String, &'a T);
    type IntoIter = indexmap::map::Iter<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Dictionary<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DictionaryVisitor(PhantomData))
    }
}

struct DictionaryVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for DictionaryVisitor<T> {
    type Value = Dictionary<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a keyed result object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut dictionary = Dictionary::default();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "last" => {
                    // Trades report the cursor as a string, OHLC and
                    // spreads as a number; both normalize to a string.
                    let value: Value = map.next_value()?;
                    dictionary.last = Some(match value {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "unexpected \"last\" value: {other}"
                            )))
                        }
                    });
                }
                "count" => {
                    let value: Value = map.next_value()?;
                    dictionary.count = Some(match value {
                        Value::Number(ref n) => n.as_u64().ok_or_else(|| {
                            serde::de::Error::custom(format!("unexpected \"count\" value: {n}"))
                        })?,
                        Value::String(ref s) => s.parse().map_err(serde::de::Error::custom)?,
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "unexpected \"count\" value: {other}"
                            )))
                        }
                    });
                }
                _ => {
                    dictionary.entries.insert(key, map.next_value()?);
                }
            }
        }

        Ok(dictionary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_object_has_no_metadata() {
        let dict: Dictionary<String> =
            serde_json::from_str(r#"{"ZEUR": "21.1589468600"}"#).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("ZEUR"), Some(&"21.1589468600".to_string()));
        assert_eq!(dict.last, None);
        assert_eq!(dict.count, None);
    }

    #[test]
    fn last_is_lifted_out_of_the_entries() {
        let dict: Dictionary<Vec<Vec<String>>> = serde_json::from_str(
            r#"{"XETHZEUR": [["271.49021", "0.72000000"]], "last": "1503524404183915423"}"#,
        )
        .unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.last.as_deref(), Some("1503524404183915423"));
        assert!(dict.get("last").is_none());
    }

    #[test]
    fn numeric_last_is_stringified() {
        let dict: Dictionary<Vec<Vec<u64>>> =
            serde_json::from_str(r#"{"XXBTZUSD": [[1]], "last": 1503524404}"#).unwrap();
        assert_eq!(dict.last.as_deref(), Some("1503524404"));
    }

    #[test]
    fn count_is_lifted() {
        let dict: Dictionary<Value> =
            serde_json::from_str(r#"{"TXID-1": {}, "TXID-2": {}, "count": 50}"#).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.count, Some(50));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let dict: Dictionary<u32> =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = dict.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn element_type_mismatch_is_an_error() {
        let result: Result<Dictionary<u64>, _> = serde_json::from_str(r#"{"K": "not-a-number"}"#);
        assert!(result.is_err());
    }
}
