use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use ahash::RandomState;

use crate::types_v2::ScalarValue;

/// One row of a query result keyed by column name.
///
/// Entries keep the column order of the result. A column name that appears
/// twice keeps its first position and takes the later value.
#[derive(Clone, Debug, Default)]
pub struct Record {
    entries: Vec<(Arc<str>, ScalarValue)>,
    positions: HashMap<Arc<str>, usize, RandomState>,
}

impl Record {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn insert(&mut self, column: Arc<str>, value: ScalarValue) {
        match self.positions.get(&column) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.positions.insert(column.clone(), self.entries.len());
                self.entries.push((column, value));
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&ScalarValue> {
        self.positions.get(column).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column names in result order.
    pub fn columns(&self) -> impl Iterator<Item = &Arc<str>> {
        self.entries.iter().map(|(column, _)| column)
    }

    pub fn values(&self) -> impl Iterator<Item = &ScalarValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.entries
            .iter()
            .map(|(column, value)| (column.as_ref(), value))
    }
}

impl<K: Into<Arc<str>>> FromIterator<(K, ScalarValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, ScalarValue)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut record = Record::with_capacity(iter.size_hint().0);
        for (column, value) in iter {
            record.insert(column.into(), value);
        }
        record
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(column, value)| other.get(column) == Some(value))
    }
}

impl Index<&str> for Record {
    type Output = ScalarValue;

    /// # Panics
    /// if the record has no such column
    fn index(&self, column: &str) -> &Self::Output {
        match self.get(column) {
            Some(value) => value,
            None => panic!("no column named {} in record", column),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (column, value)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", column, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lookup_by_column_name() {
        let record: Record = vec![("id", 1i32.into()), ("title", "a".into())]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("id"), Some(&ScalarValue::from(1i32)));
        assert_eq!(record["title"], ScalarValue::from("a"));
        assert_eq!(record.get("missing"), None);
        assert!(record.contains_column("title"));
    }

    #[test]
    fn keeps_column_order() {
        let record: Record = vec![("b", 2i32.into()), ("a", 1i32.into())]
            .into_iter()
            .collect();
        let columns = record.columns().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(columns, vec!["b", "a"]);
        assert_eq!(record.to_string(), "{b: 2, a: 1}");
    }

    #[test]
    fn duplicate_column_takes_later_value() {
        let record: Record = vec![("x", 1i32.into()), ("y", 2i32.into()), ("x", 3i32.into())]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record["x"], ScalarValue::from(3i32));
        let columns = record.columns().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(columns, vec!["x", "y"]);
    }

    #[test]
    fn equality_ignores_order() {
        let left: Record = vec![("a", 1i32.into()), ("b", 2i32.into())]
            .into_iter()
            .collect();
        let right: Record = vec![("b", 2i32.into()), ("a", 1i32.into())]
            .into_iter()
            .collect();
        let other: Record = vec![("a", 1i32.into())].into_iter().collect();
        assert_eq!(left, right);
        assert_ne!(left, other);
    }

    #[test]
    #[should_panic(expected = "no column named nope")]
    fn index_missing_column_panics() {
        let record = Record::default();
        let _ = &record["nope"];
    }
}
