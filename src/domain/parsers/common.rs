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

//! Common parsing utilities and helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref DIGITS_RE: Regex = Regex::new(r"[0-9]").unwrap();
}

/// Extract the text following a marker
///
/// The value starts `offset` characters past the end of the first occurrence
/// of `marker`. Offsets running past the end of the line yield an empty
/// string, as does a line without the marker.
///
/// # Arguments
/// * `line` - Probe line (e.g., "CPU: Intel i7-8700K (12) @ 4.7GHz")
/// * `marker` - Field marker (e.g., "CPU:")
/// * `offset` - Separator characters between marker and value
pub fn value_after_marker<'a>(line: &'a str, marker: &str, offset: usize) -> &'a str {
    let Some(pos) = line.find(marker) else {
        return "";
    };
    let rest = &line[pos + marker.len()..];
    match rest.char_indices().nth(offset) {
        Some((index, _)) => &rest[index..],
        None => "",
    }
}

/// Remove every ASCII digit from a string
pub fn strip_digits(value: &str) -> String {
    DIGITS_RE.replace_all(value, "").into_owned()
}

/// Round to a fixed number of decimal places, exact halves to even
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Render a number with at least one decimal place ("2.0", "7.83")
pub fn format_decimal(value: f64) -> String {
    format!("{value:?}")
}

/// Convert a MiB figure to GiB rounded to two places
pub fn mib_to_gib(mib: f64) -> f64 {
    round_to(mib / 1024.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_after_marker() {
        assert_eq!(
            value_after_marker("CPU: Intel i7-8700K (12) @ 4.7GHz", "CPU:", 1),
            "Intel i7-8700K (12) @ 4.7GHz"
        );
        assert_eq!(
            value_after_marker("Disk (/): 20G / 50G (40%)", "Disk", 2),
            "/): 20G / 50G (40%)"
        );
        assert_eq!(value_after_marker("  OS: Fedora ", "OS:", 1), "Fedora ");
    }

    #[test]
    fn test_value_after_marker_short_lines() {
        assert_eq!(value_after_marker("OS:", "OS:", 1), "");
        assert_eq!(value_after_marker("OS: ", "OS:", 1), "");
        assert_eq!(value_after_marker("Disk:", "Disk", 2), "");
        assert_eq!(value_after_marker("Kernel: 6.1", "Shell:", 1), "");
    }

    #[test]
    fn test_value_after_marker_counts_characters() {
        assert_eq!(value_after_marker("Host:é Zenbook", "Host:", 1), " Zenbook");
    }

    #[test]
    fn test_strip_digits() {
        assert_eq!(strip_digits("Apple MacBookPro16"), "Apple MacBookPro");
        assert_eq!(strip_digits("X1 Carbon Gen 9"), "X Carbon Gen ");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(mib_to_gib(2048.0)), "2.0");
        assert_eq!(format_decimal(mib_to_gib(8192.0)), "8.0");
        assert_eq!(format_decimal(mib_to_gib(8017.0)), "7.83");
        assert_eq!(format_decimal(mib_to_gib(15923.0)), "15.55");
    }

    #[test]
    fn test_round_to_halves_go_to_even() {
        assert_eq!(round_to(2.125, 2), 2.12);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.625, 2), 0.62);
        assert_eq!(round_to(2.375, 2), 2.38);
        assert_eq!(round_to(3.3808, 2), 3.38);
    }
}
