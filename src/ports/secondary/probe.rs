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

use crate::domain::ProbeError;
use async_trait::async_trait;

/// Secondary port - Source of probe report text
///
/// Implementations run the information probe or replay a saved report.
#[async_trait]
pub trait ProbeSource: Send + Sync {
    /// Capture one complete probe report
    ///
    /// # Returns
    /// * `Ok(String)` - Report text, one `Key: value` per line
    /// * `Err(ProbeError)` - The probe could not be run or read
    async fn capture(&self) -> Result<String, ProbeError>;
}
