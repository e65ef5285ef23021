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

//! Mapping of probed values onto reference identifiers
//!
//! Unmatched values never fail. They fall back to the table's `unknown`
//! identifier and log a warning naming the table so that a mapping can be
//! added for them.

use crate::domain::parsers::strip_digits;
use crate::domain::reference::{IdentifierTable, UNKNOWN_KEY};
use crate::domain::{FieldKey, ReferenceTable};
use log::warn;

/// Resolves field values against a [`ReferenceTable`]
#[derive(Debug, Clone, Copy)]
pub struct IdentifierResolver<'a> {
    reference: &'a ReferenceTable,
}

impl<'a> IdentifierResolver<'a> {
    pub fn new(reference: &'a ReferenceTable) -> Self {
        Self { reference }
    }

    /// Identifier of the first table substring contained in `value`
    ///
    /// Matching is case-insensitive and walks the table in its stored order,
    /// so when one substring contains another the earlier entry wins.
    pub fn resolve(&self, key: FieldKey, value: &str) -> String {
        let Some(table) = self.table(key) else {
            return UNKNOWN_KEY.to_string();
        };

        match table.first_match(&value.to_lowercase()) {
            Some((_, identifier)) => identifier.to_string(),
            None => unknown(table),
        }
    }

    /// Like [`resolve`](Self::resolve) but returns the matching substring
    /// itself rather than its identifier
    pub fn resolve_key(&self, key: FieldKey, value: &str) -> String {
        let Some(table) = self.table(key) else {
            return UNKNOWN_KEY.to_string();
        };

        match table.first_match(&value.to_lowercase()) {
            Some((substring, _)) => substring.to_string(),
            None => unknown(table),
        }
    }

    /// OS identifier from the first two words of the OS line, which drops
    /// trailing version and architecture text ("Arch Linux x86_64" is looked
    /// up as "archlinux")
    pub fn resolve_os(&self, value: &str) -> String {
        let normalized: String = value.split_whitespace().take(2).collect();
        self.resolve(FieldKey::Os, &normalized)
    }

    /// Host model identifier
    ///
    /// A host word equal to a table substring wins. Failing that, digits are
    /// stripped from the whole host string and its second word is looked up,
    /// which turns "Apple MacBookPro16" into "MacBookPro". That second step is
    /// a best-effort guess at `<vendor> <model><version>` strings and is run
    /// for every host, not only Apple ones.
    ///
    /// Both steps compare whole words for equality, not substring containment,
    /// so punctuation left after stripping defeats the lookup: the macOS model
    /// `MacBookPro16,1` becomes `MacBookPro,` and resolves to `unknown`. Plain
    /// substring matching of the host is available as [`resolve`](Self::resolve).
    pub fn resolve_host(&self, value: &str) -> String {
        let Some(table) = self.table(FieldKey::Host) else {
            return UNKNOWN_KEY.to_string();
        };

        if let Some(identifier) = value.split_whitespace().find_map(|word| table.get(word)) {
            return identifier.to_string();
        }

        let stripped = strip_digits(value);
        if let Some(identifier) = stripped
            .split_whitespace()
            .nth(1)
            .and_then(|model| table.get(model))
        {
            return identifier.to_string();
        }

        unknown(table)
    }

    /// One identifier per GPU, in detection order
    ///
    /// With no GPU detected the result is a single `unknown` identifier.
    pub fn resolve_gpus(&self, values: &[String]) -> Vec<String> {
        if values.is_empty() {
            return vec![self.resolve(FieldKey::Gpu, "")];
        }
        values
            .iter()
            .map(|gpu| self.resolve(FieldKey::Gpu, gpu))
            .collect()
    }

    /// Desktop identifier, preferring the desktop environment
    ///
    /// The window manager is only consulted when the desktop environment is
    /// missing or reported as `n/a`. Both are matched on their first word.
    pub fn resolve_desktop(&self, de: Option<&str>, wm: Option<&str>) -> String {
        let Some(de_table) = self.table(FieldKey::De) else {
            return UNKNOWN_KEY.to_string();
        };

        let de_name = de.and_then(first_word).map(str::to_lowercase);
        let wm_name = wm.and_then(first_word).map(str::to_lowercase);

        let identifier = match de_name.as_deref() {
            Some(name) if name != "n/a" => de_table.get(name),
            _ => wm_name
                .as_deref()
                .zip(self.table(FieldKey::Wm))
                .and_then(|(name, wm_table)| wm_table.get(name)),
        };

        match identifier {
            Some(identifier) => identifier.to_string(),
            None => {
                warn!("Unknown DE/WM, a reference mapping is needed to resolve this");
                de_table.unknown().to_string()
            }
        }
    }

    fn table(&self, key: FieldKey) -> Option<&'a IdentifierTable> {
        let table = self.reference.table(key);
        if table.is_none() {
            warn!("No reference table loaded for {key}");
        }
        table
    }
}

/// First whitespace-separated word of a value
pub fn first_word(value: &str) -> Option<&str> {
    value.split_whitespace().next()
}

fn unknown(table: &IdentifierTable) -> String {
    warn!(
        "Unknown {}, a reference mapping is needed to resolve this",
        table.name()
    );
    table.unknown().to_string()
}
