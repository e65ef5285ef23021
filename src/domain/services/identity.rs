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

use crate::domain::{
    Attributes, ChassisKind, ComponentMap, FieldKey, LineParser, ParserConfig, ReferenceTable,
    ReportError,
};
use crate::ports::{IdentityReportingService, ProbeSource};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Domain service that owns one cycle of probe data
///
/// Holds the single component map and reference table of the process. A
/// refresh needs `&mut self`, so readers can never observe a map that is
/// being rebuilt.
pub struct IdentityCollectionService {
    /// Probe report source
    probe: Arc<dyn ProbeSource>,
    /// Parser carrying the injected configuration
    parser: LineParser,
    /// Identifier tables, immutable after load
    reference: ReferenceTable,
    /// Values from the latest successful refresh
    components: ComponentMap,
    /// Laptop or desktop, fixed for the process
    chassis: ChassisKind,
}

impl IdentityCollectionService {
    /// Create a service with an empty component map
    ///
    /// # Arguments
    /// * `probe` - Source of probe reports
    /// * `reference` - Validated reference table
    /// * `config` - Parser configuration
    /// * `chassis` - Host form factor
    pub fn new(
        probe: Arc<dyn ProbeSource>,
        reference: ReferenceTable,
        config: ParserConfig,
        chassis: ChassisKind,
    ) -> Self {
        Self {
            probe,
            parser: LineParser::new(config),
            reference,
            components: ComponentMap::new(),
            chassis,
        }
    }

    /// Create a service and run the first refresh
    pub async fn start(
        probe: Arc<dyn ProbeSource>,
        reference: ReferenceTable,
        config: ParserConfig,
        chassis: ChassisKind,
    ) -> Result<Self, ReportError> {
        let mut service = Self::new(probe, reference, config, chassis);
        service.refresh().await?;
        Ok(service)
    }

    /// Values parsed by the latest refresh
    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }
}

#[async_trait]
impl IdentityReportingService for IdentityCollectionService {
    async fn refresh(&mut self) -> Result<(), ReportError> {
        let text = self.probe.capture().await?;
        let components = self.parser.parse(&text)?;

        info!(
            "Parsed probe report: {} of {} fields present",
            components.len(),
            FieldKey::ALL.len()
        );
        self.components = components;
        Ok(())
    }

    fn attributes(&self) -> Attributes<'_> {
        Attributes::new(
            &self.components,
            &self.reference,
            self.parser.config(),
            self.chassis,
        )
    }
}
