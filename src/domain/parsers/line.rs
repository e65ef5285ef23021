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

//! Probe report parsing
//!
//! Every registered key is tested against every line on its own. A line that
//! happens to carry two markers (a GPU name containing "Disk", say) feeds
//! both keys.

use super::common::value_after_marker;
use super::memory::parse_memory_line;
use crate::domain::{ComponentMap, FieldKey, ParseError, ParserConfig};
use log::debug;

/// Extraction rule applied to a matching line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Value starts one character after the marker
    Default,
    /// Value starts two characters after the marker
    Disk,
    /// Optional MiB to GiB conversion
    Memory,
}

/// Registered keys and their rules, in evaluation order. One rule per key.
pub const FIELD_RULES: [(FieldKey, FieldRule); 17] = [
    (FieldKey::Cpu, FieldRule::Default),
    (FieldKey::Gpu, FieldRule::Default),
    (FieldKey::Disk, FieldRule::Disk),
    (FieldKey::Memory, FieldRule::Memory),
    (FieldKey::Os, FieldRule::Default),
    (FieldKey::Motherboard, FieldRule::Default),
    (FieldKey::Host, FieldRule::Default),
    (FieldKey::Resolution, FieldRule::Default),
    (FieldKey::Theme, FieldRule::Default),
    (FieldKey::Kernel, FieldRule::Default),
    (FieldKey::Packages, FieldRule::Default),
    (FieldKey::Shell, FieldRule::Default),
    (FieldKey::Terminal, FieldRule::Default),
    (FieldKey::Font, FieldRule::Default),
    (FieldKey::De, FieldRule::Default),
    (FieldKey::Wm, FieldRule::Default),
    (FieldKey::Battery, FieldRule::Default),
];

/// Turns probe text into a [`ComponentMap`]
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    config: ParserConfig,
}

impl LineParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete probe report into a fresh component map
    pub fn parse(&self, text: &str) -> Result<ComponentMap, ParseError> {
        let mut components = ComponentMap::new();

        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);

            for (key, rule) in FIELD_RULES {
                if line.contains(key.marker()) {
                    let value = self.apply(rule, key, line)?;
                    debug!("{key} -> '{value}'");
                    components.push(key, value);
                }
            }
        }

        Ok(components)
    }

    fn apply(&self, rule: FieldRule, key: FieldKey, line: &str) -> Result<String, ParseError> {
        match rule {
            FieldRule::Default => Ok(value_after_marker(line, key.marker(), 1).to_string()),
            FieldRule::Disk => Ok(value_after_marker(line, key.marker(), 2).to_string()),
            FieldRule::Memory => parse_memory_line(line, self.config.memory_unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemoryUnit;

    const REPORT: &str = "user@archbox
------------
OS: Arch Linux x86_64
Host: 20QV00CEUS ThinkPad X1 Extreme 2nd
Kernel: 6.6.8-arch1-1
Packages: 1203 (pacman)
Shell: zsh 5.9
Resolution: 1920x1080
DE: Plasma 5.27.10
WM: KWin
Theme: Breeze [GTK2/3]
Terminal: konsole
CPU: Intel i7-9750H (12) @ 4.500GHz
GPU: NVIDIA GeForce GTX 1650 Mobile / Max-Q
GPU: Intel CoffeeLake-H GT2 [UHD Graphics 630]
Memory: 3462MiB / 15923MiB
Disk (/): 120G / 465G (26%)
Disk (/home): 300G / 900G (33%)
Battery0: 87% [Discharging]
";

    fn gib_parser() -> LineParser {
        LineParser::new(ParserConfig {
            memory_unit: MemoryUnit::Gib,
            ..Default::default()
        })
    }

    #[test]
    fn test_parse_full_report() {
        let map = LineParser::default().parse(REPORT).unwrap();

        assert_eq!(map.joined(FieldKey::Os), "Arch Linux x86_64");
        assert_eq!(map.joined(FieldKey::Kernel), "6.6.8-arch1-1");
        assert_eq!(map.joined(FieldKey::Shell), "zsh 5.9");
        assert_eq!(map.joined(FieldKey::Memory), "3462MiB / 15923MiB");
        assert_eq!(map.get(FieldKey::Gpu).len(), 2);
        assert_eq!(map.joined(FieldKey::Motherboard), "Motherboard: N/A");
        // "Battery0:" does not contain "Battery:"
        assert!(!map.contains(FieldKey::Battery));
    }

    #[test]
    fn test_disk_lines_accumulate_in_order() {
        let map = LineParser::default().parse(REPORT).unwrap();
        assert_eq!(
            map.get(FieldKey::Disk),
            &[
                "/): 120G / 465G (26%)".to_string(),
                "/home): 300G / 900G (33%)".to_string()
            ]
        );
    }

    #[test]
    fn test_memory_gib_mode() {
        let map = gib_parser().parse("Memory: 2048MiB / 8192MiB").unwrap();
        assert_eq!(map.joined(FieldKey::Memory), "2.0 GiB / 8.0 GiB");
    }

    #[test]
    fn test_malformed_memory_is_an_error() {
        let result = gib_parser().parse("OS: Debian\nMemory: unknown\n");
        assert!(matches!(result, Err(ParseError::MalformedField { .. })));
    }

    #[test]
    fn test_one_line_feeds_several_keys() {
        let map = LineParser::default()
            .parse("GPU: Disk Accelerator Card")
            .unwrap();
        assert_eq!(map.joined(FieldKey::Gpu), "Disk Accelerator Card");
        assert_eq!(map.joined(FieldKey::Disk), "ccelerator Card");
    }

    #[test]
    fn test_crlf_and_trailing_spaces() {
        let map = LineParser::default()
            .parse("OS: Windows 10 Pro \r\nKernel: 10.0.19045\r\n")
            .unwrap();
        assert_eq!(map.joined(FieldKey::Os), "Windows 10 Pro ");
        assert_eq!(map.joined(FieldKey::Kernel), "10.0.19045");
    }

    #[test]
    fn test_each_parse_starts_empty() {
        let parser = LineParser::default();
        let first = parser
            .parse("OS: Ubuntu 22.04\nGPU: AMD Radeon RX 6800\nShell: bash 5.1")
            .unwrap();
        let second = parser.parse("OS: Fedora 39").unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 1);
        assert_eq!(second.joined(FieldKey::Gpu), "GPU: N/A");
    }

    #[test]
    fn test_empty_input() {
        let map = LineParser::default().parse("").unwrap();
        assert!(map.is_empty());
    }
}
