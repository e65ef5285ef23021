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

//! Memory line parsing functions

use super::common::{format_decimal, mib_to_gib, value_after_marker};
use crate::domain::{FieldKey, MemoryUnit, ParseError};

/// Parse the probe's memory line
///
/// Expected format: `Memory: 2048MiB / 8192MiB`
///
/// # Arguments
/// * `line` - Probe line carrying the `Memory:` marker
/// * `unit` - Rendering mode
///
/// # Returns
/// * `Ok(String)` - `"2.0 GiB / 8.0 GiB"` in GiB mode, the raw value otherwise
/// * `Err(ParseError)` - GiB mode and the line is not `<marker> <used> / <total>`
pub fn parse_memory_line(line: &str, unit: MemoryUnit) -> Result<String, ParseError> {
    match unit {
        MemoryUnit::Gib => {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 4 {
                return Err(malformed(
                    line,
                    format!("expected at least 4 tokens, found {}", tokens.len()),
                ));
            }

            let used = parse_mib(line, tokens[1])?;
            let total = parse_mib(line, tokens[3])?;

            Ok(format!(
                "{} GiB / {} GiB",
                format_decimal(mib_to_gib(used)),
                format_decimal(mib_to_gib(total))
            ))
        }
        MemoryUnit::Raw => Ok(value_after_marker(line, FieldKey::Memory.marker(), 1).to_string()),
    }
}

fn parse_mib(line: &str, token: &str) -> Result<f64, ParseError> {
    token
        .replace("MiB", "")
        .parse::<f64>()
        .map_err(|_| malformed(line, format!("'{token}' is not a MiB figure")))
}

fn malformed(line: &str, reason: String) -> ParseError {
    ParseError::MalformedField {
        field: FieldKey::Memory.marker().to_string(),
        line: line.to_string(),
        reason,
    }
}
