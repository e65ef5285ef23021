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

use crate::domain::{Attributes, ReportError, SystemIdentity};
use async_trait::async_trait;

/// Primary port - Main interface offered by the identity domain
///
/// This is what external systems (CLI, presence clients, library consumers)
/// use to interact with the parsed and resolved probe report.
#[async_trait]
pub trait IdentityReportingService: Send + Sync {
    /// Re-run the probe and rebuild the component map
    ///
    /// The previous cycle is kept if the probe or the parse fails.
    ///
    /// # Returns
    /// * `Ok(())` - The component map now reflects the latest probe report
    /// * `Err(ReportError)` - Probe or parse failure
    async fn refresh(&mut self) -> Result<(), ReportError>;

    /// Named accessors over the current cycle
    fn attributes(&self) -> Attributes<'_>;

    /// Serializable view of the current cycle
    fn snapshot(&self) -> SystemIdentity {
        self.attributes().snapshot()
    }
}
