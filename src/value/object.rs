use indexmap::map::{IndexMap, IntoIter, Iter, IterMut};

use super::Value;

/// Ordered map of field names to values.
///
/// Insertion order is kept, so response keys come out in the order the
/// selection set planned them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    key_value_list: IndexMap<String, Value>,
}

impl Object {
    /// Creates an empty object with room for `size` fields.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            key_value_list: IndexMap::with_capacity(size),
        }
    }

    /// Adds a field, returning the value it replaced, if any.
    ///
    /// A replaced field keeps its original position.
    pub fn add_field(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.key_value_list.insert(key.into(), value)
    }

    /// Checks whether a field with the given name exists.
    pub fn contains_field(&self, key: &str) -> bool {
        self.key_value_list.contains_key(key)
    }

    /// Returns the value of the given field.
    pub fn get_field_value(&self, key: &str) -> Option<&Value> {
        self.key_value_list.get(key)
    }

    /// Returns the value of the given field mutably.
    pub fn get_mut_field_value(&mut self, key: &str) -> Option<&mut Value> {
        self.key_value_list.get_mut(key)
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.key_value_list.len()
    }

    /// Whether there are no fields at all.
    pub fn is_empty(&self) -> bool {
        self.key_value_list.is_empty()
    }

    /// Iterates over field name/value pairs in order.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.key_value_list.iter()
    }

    /// Iterates mutably over field name/value pairs in order.
    pub fn iter_mut(&mut self) -> IterMut<'_, String, Value> {
        self.key_value_list.iter_mut()
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.key_value_list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
    {
        let iter = iter.into_iter();
        let mut obj = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            obj.add_field(k, v);
        }
        obj
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}
