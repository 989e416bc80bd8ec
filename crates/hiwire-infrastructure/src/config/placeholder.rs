//! Placeholder resolution
//!
//! String values may reference other properties:
//!
//! | Syntax | Resolves to |
//! |--------|-------------|
//! | `${a.b.c}` | key `a.b.c` of the space being built, then of the system space |
//! | `${system.a.b}` | key `a.b` of the system space |
//! | `${HOME}` | process environment variable, when no property matches |
//! | `${a.b:text}` | `text` when nothing above matches |
//!
//! An unresolvable placeholder without default becomes the empty string. A
//! value made of a single placeholder takes the referenced value verbatim,
//! so `${app.profiles.include}` yields a list.

use crate::constants::{PLACEHOLDER_MAX_DEPTH, PLACEHOLDER_PATTERN};
use hiwire_domain::constants::SYSTEM_PLACEHOLDER_PREFIX;
use hiwire_domain::value_objects::PropertySpace;
use hiwire_domain::value_objects::properties::render_scalar;
use regex::{Captures, Regex};
use serde_json::Value;
use std::env;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("Invalid placeholder regex"));

/// Resolves placeholders against a local and a system property space
pub struct PlaceholderResolver<'a> {
    local: &'a PropertySpace,
    system: &'a PropertySpace,
}

impl<'a> PlaceholderResolver<'a> {
    /// Resolver looking up `local` first, then `system`
    pub fn new(local: &'a PropertySpace, system: &'a PropertySpace) -> Self {
        Self { local, system }
    }

    /// Resolve one template
    pub fn resolve(&self, template: &str) -> Value {
        self.resolve_at(template, 0)
    }

    /// Resolve every string in `value`, recursing into mappings and sequences
    pub fn resolve_value(&self, value: &Value) -> Value {
        match value {
            Value::String(template) => self.resolve(template),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.resolve_value(v)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, v)| (key.clone(), self.resolve_value(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn resolve_at(&self, template: &str, depth: usize) -> Value {
        let pattern = &*PLACEHOLDER;
        if depth >= PLACEHOLDER_MAX_DEPTH || !template.contains("${") {
            return Value::String(template.to_string());
        }

        if let Some(captures) = pattern.captures(template) {
            let whole = captures.get(0).is_some_and(|m| m.as_str().len() == template.len());
            if whole {
                return self.expand(&captures, depth);
            }
        }

        let replaced = pattern.replace_all(template, |captures: &Captures<'_>| {
            let value = self.expand(captures, depth);
            render_scalar(&value).unwrap_or_else(|| value.to_string())
        });
        Value::String(replaced.into_owned())
    }

    fn expand(&self, captures: &Captures<'_>, depth: usize) -> Value {
        let key = captures.get(1).map_or("", |m| m.as_str().trim());
        let default = captures.get(2).map(|m| m.as_str());

        match self.lookup(key) {
            Some(Value::String(text)) => self.resolve_at(&text, depth + 1),
            Some(value) => self.resolve_value_at(&value, depth + 1),
            None => match env::var(key) {
                Ok(text) => Value::String(text),
                Err(_) => Value::String(default.unwrap_or_default().to_string()),
            },
        }
    }

    fn resolve_value_at(&self, value: &Value, depth: usize) -> Value {
        match value {
            Value::String(text) => self.resolve_at(text, depth),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_value_at(item, depth))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        if let Some(system_key) = key.strip_prefix(SYSTEM_PLACEHOLDER_PREFIX) {
            if let Some(value) = self.system.get(system_key) {
                return Some(value.clone());
            }
        }
        self.local
            .get(key)
            .or_else(|| self.system.get(key))
            .filter(|value| !value.is_null())
            .cloned()
    }
}

/// Resolve every placeholder of `space` in place
pub fn resolve_space(space: &mut PropertySpace, system: &PropertySpace) {
    let snapshot = space.clone();
    let resolved = PlaceholderResolver::new(&snapshot, system).resolve_value(snapshot.as_value());
    *space = PropertySpace::from_value(resolved);
}

/// Resolve every placeholder of a space against itself
pub fn resolve_self(space: &mut PropertySpace) {
    let snapshot = space.clone();
    resolve_space(space, &snapshot);
}
