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

//! Host environment of the running process

use crate::domain::{DomainError, Platform, SystemError};
use crate::ports::HostEnvironment;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

/// Linux power supply class directory
pub const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Platform family this binary was built for
pub fn detect_platform() -> Result<Platform, DomainError> {
    if cfg!(target_os = "linux") {
        Ok(Platform::Linux)
    } else if cfg!(target_os = "macos") {
        Ok(Platform::MacOs)
    } else if cfg!(target_os = "windows") {
        Ok(Platform::Windows)
    } else {
        Err(DomainError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}

/// Host environment backed by the local machine
pub struct LocalHostEnvironment {
    power_supply_dir: PathBuf,
}

impl LocalHostEnvironment {
    pub fn new() -> Self {
        Self::with_power_supply_dir(POWER_SUPPLY_DIR)
    }

    /// Look for batteries somewhere other than sysfs
    pub fn with_power_supply_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            power_supply_dir: dir.into(),
        }
    }
}

impl Default for LocalHostEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostEnvironment for LocalHostEnvironment {
    fn platform(&self) -> Result<Platform, DomainError> {
        detect_platform()
    }

    /// Only Linux exposes batteries this way; other platforms report none
    async fn has_battery(&self) -> Result<bool, SystemError> {
        if !matches!(self.platform(), Ok(Platform::Linux)) {
            return Ok(false);
        }

        let mut entries = match fs::read_dir(&self.power_supply_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(SystemError::IoError(format!(
                    "{}: {}",
                    self.power_supply_dir.display(),
                    e
                )))
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SystemError::IoError(e.to_string()))?
        {
            if entry.file_name().to_string_lossy().starts_with("BAT") {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_platform_on_supported_hosts() {
        if cfg!(any(target_os = "linux", target_os = "macos", target_os = "windows")) {
            assert!(detect_platform().is_ok());
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_battery_detection() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("AC")).unwrap();

        let host = LocalHostEnvironment::with_power_supply_dir(dir.path());
        assert!(!host.has_battery().await.unwrap());

        std::fs::create_dir(dir.path().join("BAT0")).unwrap();
        assert!(host.has_battery().await.unwrap());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_missing_power_supply_dir() {
        let dir = tempdir().unwrap();
        let host = LocalHostEnvironment::with_power_supply_dir(dir.path().join("absent"));
        assert!(!host.has_battery().await.unwrap());
    }
}
