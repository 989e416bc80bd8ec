//! Property spaces
//!
//! A [`PropertySpace`] is the collapsed view of all property layers for one
//! build: a tree of mappings addressed with dotted keys (`server.port`).

use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

/// Mapping from dotted property keys to values
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpace {
    root: Value,
}

impl Default for PropertySpace {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySpace {
    /// Create an empty space
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Wrap a value; anything but a mapping yields an empty space
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => Self { root: value },
            _ => Self::new(),
        }
    }

    /// Serialize any value into a space
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::from_value(serde_json::to_value(value)?))
    }

    /// Underlying tree
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Mutable underlying tree
    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Consume the space
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Whether the space holds no keys
    pub fn is_empty(&self) -> bool {
        self.root.as_object().is_none_or(Map::is_empty)
    }

    /// Look up a dotted key
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key.is_empty() {
            return Some(&self.root);
        }
        key.split('.')
            .try_fold(&self.root, |node, part| node.as_object()?.get(part))
    }

    /// Look up a dotted key and render scalars as text
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(render_scalar)
    }

    /// Whether a dotted key is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a dotted key, creating intermediate mappings
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        let mut node = &mut self.root;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let Value::Object(map) = node else {
                return;
            };
            if parts.peek().is_none() {
                map.insert(part.to_string(), value.into());
                return;
            }
            node = map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }

    /// Deep-merge `other` over this space; `other` wins on conflicts
    pub fn merge(&mut self, other: &PropertySpace) {
        merge_values(&mut self.root, &other.root);
    }

    /// Sub-space rooted at `key`; empty when the key is absent or not a mapping
    pub fn section(&self, key: &str) -> PropertySpace {
        self.get(key)
            .cloned()
            .map(Self::from_value)
            .unwrap_or_default()
    }

    /// Every leaf key in dotted form, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, String::new(), &mut keys);
        keys.sort();
        keys
    }

    /// Decode the section at `key` (or the whole space for an empty key) into
    /// `target`. Keys missing from the space keep the target's current values.
    ///
    /// Text from placeholder defaults and environment variables is coerced
    /// to the scalar type the target currently holds, so `"9090"` binds to a
    /// numeric field and `8080` to a text field.
    pub fn bind<T>(&self, key: &str, target: &mut T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(section) = self.get(key) else {
            return Ok(());
        };
        let shape = serde_json::to_value(&*target)?;
        let mut current = shape.clone();
        merge_values(&mut current, section);

        *target = match serde_json::from_value(current.clone()) {
            Ok(value) => value,
            Err(strict) => {
                coerce_to_shape(&mut current, &shape);
                serde_json::from_value(current).map_err(|_| strict)?
            }
        };
        Ok(())
    }

    /// Decode the section at `key` into a fresh value, starting from
    /// `T::default()` so missing keys keep their defaults
    pub fn extract<T>(&self, key: &str) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let mut value = T::default();
        self.bind(key, &mut value)?;
        Ok(value)
    }
}

/// Convert scalar leaves of `value` to the scalar kind found at the same
/// position in `shape`. Leaves that do not parse are left untouched.
fn coerce_to_shape(value: &mut Value, shape: &Value) {
    let coerced = match (&*value, shape) {
        (Value::String(text), Value::Number(like)) => parse_number(text.trim(), like).map(Value::Number),
        (Value::String(text), Value::Bool(_)) => text.trim().parse::<bool>().ok().map(Value::Bool),
        (Value::Number(_) | Value::Bool(_), Value::String(_)) => Some(Value::String(value.to_string())),
        _ => None,
    };
    if let Some(coerced) = coerced {
        *value = coerced;
        return;
    }

    match (value, shape) {
        (Value::Object(map), Value::Object(shape_map)) => {
            for (key, child) in map.iter_mut() {
                if let Some(child_shape) = shape_map.get(key) {
                    coerce_to_shape(child, child_shape);
                }
            }
        }
        (Value::Array(items), Value::Array(shape_items)) => {
            if let Some(item_shape) = shape_items.first() {
                for item in items {
                    coerce_to_shape(item, item_shape);
                }
            }
        }
        _ => {}
    }
}

fn parse_number(text: &str, like: &Number) -> Option<Number> {
    if like.is_f64() {
        text.parse::<f64>().ok().and_then(Number::from_f64)
    } else if let Ok(unsigned) = text.parse::<u64>() {
        Some(Number::from(unsigned))
    } else {
        text.parse::<i64>().ok().map(Number::from)
    }
}

/// Render a scalar as text; mappings and sequences yield `None`
pub fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

fn collect_keys(value: &Value, prefix: String, keys: &mut Vec<String>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_keys(child, path, keys);
            }
        }
        _ if !prefix.is_empty() => keys.push(prefix),
        _ => {}
    }
}
