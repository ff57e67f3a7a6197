// stepwise/src/core/value.rs

//! Type-erased state values and the ordered `Values` map used both for run
//! arguments and for step outputs.

use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A single state value. Cloning is cheap: the payload is shared.
#[derive(Clone)]
pub struct Value {
  inner: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Value {
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self {
      inner: Arc::new(value),
      type_name: std::any::type_name::<T>(),
    }
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.inner.downcast_ref::<T>()
  }

  pub fn is<T: Any>(&self) -> bool {
    self.inner.is::<T>()
  }

  pub(crate) fn as_any(&self) -> &dyn Any {
    &*self.inner
  }

  /// Name of the type the value was created from.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// True when both values share the same allocation.
  pub fn ptr_eq(a: &Value, b: &Value) -> bool {
    Arc::ptr_eq(&a.inner, &b.inner)
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Value<{}>", self.type_name)
  }
}

/// Insertion-ordered mapping from state keys to values.
#[derive(Clone, Default)]
pub struct Values(IndexMap<String, Value>);

impl Values {
  pub fn new() -> Self {
    Self(IndexMap::new())
  }

  /// Builder-style insert.
  ///
  /// ```
  /// use stepwise::Values;
  /// let values = Values::new().with("val", 1_i32).with("name", "foo");
  /// assert_eq!(values.get::<i32>("val"), Some(&1));
  /// ```
  pub fn with<K: Into<String>, T: Any + Send + Sync>(mut self, key: K, value: T) -> Self {
    self.insert(key, value);
    self
  }

  /// Inserts or replaces `key`, returning the previous value if any.
  pub fn insert<K: Into<String>, T: Any + Send + Sync>(&mut self, key: K, value: T) -> Option<Value> {
    self.0.insert(key.into(), Value::new(value))
  }

  pub fn insert_value<K: Into<String>>(&mut self, key: K, value: Value) -> Option<Value> {
    self.0.insert(key.into(), value)
  }

  pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
    self.0.get(key).and_then(Value::downcast_ref::<T>)
  }

  pub fn get_value(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.0.shift_remove(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Copies every entry of `other` into `self`, overwriting existing keys.
  pub fn merge(&mut self, other: Values) {
    self.0.extend(other.0);
  }
}

impl fmt::Debug for Values {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.0.iter()).finish()
  }
}

impl IntoIterator for Values {
  type Item = (String, Value);
  type IntoIter = indexmap::map::IntoIter<String, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl FromIterator<(String, Value)> for Values {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
