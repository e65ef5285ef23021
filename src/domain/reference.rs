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

//! Substring to identifier lookup tables
//!
//! The JSON document has a `map` section naming, for each field marker, the
//! table that resolves it:
//!
//! ```json
//! {
//!     "map": { "GPU:": "gpus", "CPU:": "cpus" },
//!     "gpus": { "nvidia": "nvidia", "amd": "amd", "unknown": "unknown_gpu" },
//!     "cpus": { "intel": "intel", "ryzen": "amd", "unknown": "unknown_cpu" }
//! }
//! ```
//!
//! Entry order inside a table is significant: the first substring found in a
//! value wins.

use crate::domain::{FieldKey, ReferenceError};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Key every table must carry
pub const UNKNOWN_KEY: &str = "unknown";

/// Ordered `(substring, identifier)` pairs for one field
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierTable {
    name: String,
    entries: Vec<(String, String)>,
    unknown: String,
}

impl IdentifierTable {
    /// Build a table, lowercasing substrings and requiring an `unknown` entry
    pub fn new<K, V>(
        name: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ReferenceError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();

        let unknown = entries
            .iter()
            .find(|(k, _)| k == UNKNOWN_KEY)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| ReferenceError::MissingUnknown(name.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            entries,
            unknown,
        })
    }

    fn from_json(name: &str, value: &Value) -> Result<Self, ReferenceError> {
        let object = value.as_object().ok_or_else(|| {
            ReferenceError::Invalid(format!("table '{name}' is not an object"))
        })?;

        let mut entries = Vec::with_capacity(object.len());
        for (substring, identifier) in object {
            let identifier = identifier.as_str().ok_or_else(|| {
                ReferenceError::Invalid(format!(
                    "identifier for '{substring}' in table '{name}' is not a string"
                ))
            })?;
            entries.push((substring.as_str(), identifier.to_string()));
        }

        Self::new(name, entries)
    }

    /// Table name as it appears in the reference document
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Fallback identifier for values nothing matches
    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    /// First entry whose substring occurs in `value` (already lowercased)
    pub fn first_match(&self, value: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(substring, _)| value.contains(substring.as_str()))
            .map(|(s, id)| (s.as_str(), id.as_str()))
    }

    /// Identifier stored under exactly `substring` (case-insensitive)
    pub fn get(&self, substring: &str) -> Option<&str> {
        let substring = substring.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == substring)
            .map(|(_, id)| id.as_str())
    }
}

/// Identifier tables for every field that resolves to an identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    tables: HashMap<FieldKey, IdentifierTable>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a reference document
    ///
    /// Fails on any table without `unknown`, on `map` entries naming missing
    /// tables, and when a field that needs identifiers is left unmapped.
    pub fn from_json_str(document: &str) -> Result<Self, ReferenceError> {
        let value: Value = serde_json::from_str(document)
            .map_err(|e| ReferenceError::Invalid(format!("JSON parse failed: {e}")))?;
        Self::from_json(&value)
    }

    pub fn from_json(document: &Value) -> Result<Self, ReferenceError> {
        let root: &Map<String, Value> = document
            .as_object()
            .ok_or_else(|| ReferenceError::Invalid("document is not an object".to_string()))?;
        let map = root
            .get("map")
            .and_then(Value::as_object)
            .ok_or(ReferenceError::MissingMap)?;

        let mut reference = Self::new();
        for (marker, table_name) in map {
            let Some(key) = FieldKey::from_marker(marker) else {
                debug!("Ignoring reference mapping for unrecognised field '{marker}'");
                continue;
            };
            let table_name = table_name.as_str().ok_or_else(|| {
                ReferenceError::Invalid(format!("map entry for '{marker}' is not a string"))
            })?;
            let table = root
                .get(table_name)
                .ok_or_else(|| ReferenceError::MissingTable {
                    field: marker.clone(),
                    table: table_name.to_string(),
                })?;

            reference.insert(key, IdentifierTable::from_json(table_name, table)?);
        }

        reference.validate()?;
        Ok(reference)
    }

    /// Register the table for `key`, replacing any previous one
    pub fn insert(&mut self, key: FieldKey, table: IdentifierTable) {
        self.tables.insert(key, table);
    }

    pub fn table(&self, key: FieldKey) -> Option<&IdentifierTable> {
        self.tables.get(&key)
    }

    /// Check that every identified field has a table
    pub fn validate(&self) -> Result<(), ReferenceError> {
        match FieldKey::IDENTIFIED
            .into_iter()
            .find(|key| !self.tables.contains_key(key))
        {
            Some(key) => Err(ReferenceError::UnmappedField(key.marker().to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A small but complete reference document shared by the domain tests
    pub(crate) const SAMPLE: &str = r#"{
        "map": {
            "OS:": "distros",
            "CPU:": "cpus",
            "GPU:": "gpus",
            "Host:": "hosts",
            "Motherboard:": "motherboards",
            "Shell:": "shells",
            "Terminal:": "terminals",
            "DE:": "desktops",
            "WM:": "wms"
        },
        "distros": {
            "archlinux": "arch",
            "ubuntu": "ubuntu",
            "fedora": "fedora",
            "windows10": "win10",
            "macos": "macos",
            "unknown": "unknown_os"
        },
        "cpus": {
            "intel core": "intel_core",
            "intel": "intel",
            "ryzen": "ryzen",
            "apple m1": "apple",
            "unknown": "unknown_cpu"
        },
        "gpus": {
            "nvidia": "nvidia",
            "amd": "amd",
            "radeon": "amd",
            "intel": "intel",
            "unknown": "unknown_gpu"
        },
        "hosts": {
            "macbookpro": "macbook_pro",
            "thinkpad": "thinkpad",
            "imac": "imac",
            "unknown": "unknown_host"
        },
        "motherboards": {
            "asus": "asus_board",
            "msi": "msi_board",
            "unknown": "unknown_board"
        },
        "shells": {
            "zsh": "zsh",
            "bash": "bash",
            "fish": "fish",
            "unknown": "unknown_shell"
        },
        "terminals": {
            "konsole": "konsole",
            "kitty": "kitty",
            "alacritty": "alacritty",
            "unknown": "unknown_terminal"
        },
        "desktops": {
            "plasma": "kde",
            "gnome": "gnome",
            "xfce": "xfce",
            "unknown": "unknown_desktop"
        },
        "wms": {
            "i3": "i3",
            "sway": "sway",
            "bspwm": "bspwm",
            "unknown": "unknown_wm"
        }
    }"#;

    pub(crate) fn sample() -> ReferenceTable {
        ReferenceTable::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_load_preserves_entry_order() {
        let reference = sample();
        let cpus = reference.table(FieldKey::Cpu).unwrap();
        let order: Vec<&str> = cpus.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, ["intel core", "intel", "ryzen", "apple m1", "unknown"]);
        assert_eq!(cpus.unknown(), "unknown_cpu");
        assert_eq!(cpus.name(), "cpus");
    }

    #[test]
    fn test_substrings_are_lowercased() {
        let table =
            IdentifierTable::new("gpus", [("NVIDIA", "nvidia"), ("unknown", "none")]).unwrap();
        assert_eq!(table.get("nvidia"), Some("nvidia"));
        assert_eq!(table.get("Nvidia"), Some("nvidia"));
        assert_eq!(table.first_match("nvidia geforce"), Some(("nvidia", "nvidia")));
    }

    #[test]
    fn test_table_without_unknown_fails_at_load() {
        let document = SAMPLE.replace(r#""unknown": "unknown_shell""#, r#""tcsh": "tcsh""#);
        assert_eq!(
            ReferenceTable::from_json_str(&document),
            Err(ReferenceError::MissingUnknown("shells".to_string()))
        );
    }

    #[test]
    fn test_map_entry_naming_missing_table() {
        let document = SAMPLE.replace(r#""WM:": "wms""#, r#""WM:": "window_managers""#);
        assert_eq!(
            ReferenceTable::from_json_str(&document),
            Err(ReferenceError::MissingTable {
                field: "WM:".to_string(),
                table: "window_managers".to_string()
            })
        );
    }

    #[test]
    fn test_unmapped_identified_field() {
        let document = SAMPLE.replace(r#""Terminal:": "terminals","#, "");
        assert_eq!(
            ReferenceTable::from_json_str(&document),
            Err(ReferenceError::UnmappedField("Terminal:".to_string()))
        );
    }

    #[test]
    fn test_unrecognised_markers_are_ignored() {
        let document = SAMPLE.replace(r#""map": {"#, r#""map": { "Uptime:": "gpus","#);
        assert!(ReferenceTable::from_json_str(&document).is_ok());
    }

    #[test]
    fn test_invalid_documents() {
        assert_eq!(
            ReferenceTable::from_json_str(r#"{"gpus": {}}"#),
            Err(ReferenceError::MissingMap)
        );
        assert!(matches!(
            ReferenceTable::from_json_str("not json"),
            Err(ReferenceError::Invalid(_))
        ));

        let document = SAMPLE.replace(r#""zsh": "zsh""#, r#""zsh": 5"#);
        assert!(matches!(
            ReferenceTable::from_json_str(&document),
            Err(ReferenceError::Invalid(msg)) if msg.contains("'zsh'")
        ));
    }
}
