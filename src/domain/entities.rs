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

use serde::{Deserialize, Serialize};
use std::fmt;

/// One attribute of the probe report, identified by the marker text the
/// probe prints in front of its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKey {
    Cpu,
    Gpu,
    Disk,
    Memory,
    Os,
    Motherboard,
    Host,
    Resolution,
    Theme,
    Kernel,
    Packages,
    Shell,
    Terminal,
    Font,
    De,
    Wm,
    Battery,
}

impl FieldKey {
    /// Every key in registration order
    pub const ALL: [FieldKey; 17] = [
        FieldKey::Cpu,
        FieldKey::Gpu,
        FieldKey::Disk,
        FieldKey::Memory,
        FieldKey::Os,
        FieldKey::Motherboard,
        FieldKey::Host,
        FieldKey::Resolution,
        FieldKey::Theme,
        FieldKey::Kernel,
        FieldKey::Packages,
        FieldKey::Shell,
        FieldKey::Terminal,
        FieldKey::Font,
        FieldKey::De,
        FieldKey::Wm,
        FieldKey::Battery,
    ];

    /// Keys that resolve to identifiers and therefore need a reference table
    pub const IDENTIFIED: [FieldKey; 9] = [
        FieldKey::Cpu,
        FieldKey::Gpu,
        FieldKey::Os,
        FieldKey::Motherboard,
        FieldKey::Host,
        FieldKey::Shell,
        FieldKey::Terminal,
        FieldKey::De,
        FieldKey::Wm,
    ];

    /// Marker text as it appears in probe output (case-sensitive)
    pub fn marker(self) -> &'static str {
        match self {
            FieldKey::Cpu => "CPU:",
            FieldKey::Gpu => "GPU:",
            FieldKey::Disk => "Disk",
            FieldKey::Memory => "Memory:",
            FieldKey::Os => "OS:",
            FieldKey::Motherboard => "Motherboard:",
            FieldKey::Host => "Host:",
            FieldKey::Resolution => "Resolution:",
            FieldKey::Theme => "Theme:",
            FieldKey::Kernel => "Kernel:",
            FieldKey::Packages => "Packages:",
            FieldKey::Shell => "Shell:",
            FieldKey::Terminal => "Terminal:",
            FieldKey::Font => "Font:",
            FieldKey::De => "DE:",
            FieldKey::Wm => "WM:",
            FieldKey::Battery => "Battery:",
        }
    }

    /// Look a key up by its exact marker text
    pub fn from_marker(marker: &str) -> Option<FieldKey> {
        FieldKey::ALL.into_iter().find(|key| key.marker() == marker)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// How the memory line is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryUnit {
    /// Convert the probe's MiB figures to GiB
    Gib,
    /// Pass the probe text through unchanged
    #[default]
    Raw,
}

impl MemoryUnit {
    /// `"gb"` selects GiB conversion; every other value keeps the raw text
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("gb") => MemoryUnit::Gib,
            _ => MemoryUnit::Raw,
        }
    }
}

/// Settings consumed while parsing and presenting probe fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserConfig {
    /// Memory rendering mode
    pub memory_unit: MemoryUnit,
    /// Terminal name to report instead of the probed one
    pub terminal_override: Option<String>,
    /// Terminal font to report instead of the probed font
    pub terminal_font_override: Option<String>,
}

/// Operating system families the probe can run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form factor reported alongside the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChassisKind {
    Laptop,
    Desktop,
}

impl ChassisKind {
    /// Laptops are only reported as such off macOS, where the host model
    /// already says so
    pub fn classify(platform: Platform, has_battery: bool) -> Self {
        if has_battery && platform != Platform::MacOs {
            ChassisKind::Laptop
        } else {
            ChassisKind::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChassisKind::Laptop => "laptop",
            ChassisKind::Desktop => "desktop",
        }
    }
}

/// Every display string and identifier for one refresh cycle
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SystemIdentity {
    /// Operating system line and its identifier
    pub os: String,
    pub os_id: String,
    /// Kernel version
    pub kernel: String,
    /// Host model line and its identifiers
    pub host: String,
    pub host_id: String,
    pub host_app_id: String,
    /// Laptop or desktop
    pub chassis: ChassisKind,
    /// Motherboard line and matched reference key
    pub motherboard: String,
    pub motherboard_id: String,
    /// CPU models, newline separated
    pub cpu: String,
    pub cpu_id: String,
    /// GPU models, newline separated
    pub gpu: String,
    /// One identifier per detected GPU
    pub gpu_ids: Vec<String>,
    /// Memory usage
    pub memory: String,
    /// Disk usage, one line per disk
    pub disks: String,
    pub resolution: String,
    pub theme: String,
    pub packages: String,
    pub shell: String,
    pub shell_id: String,
    pub terminal: String,
    pub terminal_id: String,
    pub terminal_font: String,
    pub font: String,
    pub de: String,
    pub wm: String,
    /// Desktop environment identifier, falling back to the window manager
    pub desktop_id: String,
    pub battery: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_round_trip() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_marker(key.marker()), Some(key));
        }
        assert_eq!(FieldKey::from_marker("cpu:"), None);
        assert_eq!(FieldKey::Disk.to_string(), "Disk");
    }

    #[test]
    fn test_memory_unit_flag() {
        assert_eq!(MemoryUnit::from_flag(Some("gb")), MemoryUnit::Gib);
        assert_eq!(MemoryUnit::from_flag(Some("mb")), MemoryUnit::Raw);
        assert_eq!(MemoryUnit::from_flag(Some("GB")), MemoryUnit::Raw);
        assert_eq!(MemoryUnit::from_flag(None), MemoryUnit::Raw);
    }

    #[test]
    fn test_chassis_classification() {
        assert_eq!(
            ChassisKind::classify(Platform::Linux, true),
            ChassisKind::Laptop
        );
        assert_eq!(
            ChassisKind::classify(Platform::MacOs, true),
            ChassisKind::Desktop
        );
        assert_eq!(
            ChassisKind::classify(Platform::Windows, false),
            ChassisKind::Desktop
        );
    }
}
