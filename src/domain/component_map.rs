/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Per-cycle storage of the values extracted from probe text

use crate::domain::FieldKey;
use std::collections::HashMap;

/// Values extracted for each field key, in the order the probe printed them
///
/// A key with no entry means no probe line carried its marker. Both that case
/// and an empty list render as `"<marker> N/A"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMap {
    entries: HashMap<FieldKey, Vec<String>>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`
    pub fn push(&mut self, key: FieldKey, value: impl Into<String>) {
        self.entries.entry(key).or_default().push(value.into());
    }

    /// Stored values for `key`, or an empty slice
    pub fn get(&self, key: FieldKey) -> &[String] {
        self.entries.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Values joined by newlines, or the `"<marker> N/A"` sentinel
    pub fn joined(&self, key: FieldKey) -> String {
        match self.entries.get(&key) {
            Some(values) if !values.is_empty() => values.join("\n"),
            _ => not_available(key),
        }
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of keys that matched at least one line
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry ahead of a refresh
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The sentinel rendered for a field with no data
pub fn not_available(key: FieldKey) -> String {
    format!("{} N/A", key.marker())
}
