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

use crate::domain::{DomainError, Platform, SystemError};
use async_trait::async_trait;

/// Secondary port - Facts about the machine the probe runs on
#[async_trait]
pub trait HostEnvironment: Send + Sync {
    /// Platform family of the running host
    ///
    /// # Returns
    /// * `Ok(Platform)` - Linux, macOS or Windows
    /// * `Err(DomainError)` - Any other platform
    fn platform(&self) -> Result<Platform, DomainError>;

    /// Whether the machine reports a battery
    ///
    /// # Returns
    /// * `Ok(bool)` - true if a battery is present
    /// * `Err(SystemError)` - Error inspecting power supplies
    async fn has_battery(&self) -> Result<bool, SystemError>;
}
