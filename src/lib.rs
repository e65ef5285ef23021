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

//! System Identity Library
//!
//! Parses neofetch-style system reports into labeled fields and resolves each
//! field to a short asset identifier using a JSON reference table, following
//! a Ports and Adapters (Hexagonal) architecture.
//!
//! # Architecture
//!
//! - **Domain**: line parser, component map, identifier resolver, attributes
//! - **Ports**: interfaces for probes, reference tables and the host
//! - **Adapters**: neofetch and file probes, JSON reference loader
//!
//! # Usage
//!
//! ```rust,no_run
//! use fetch_ident::{ContainerConfigBuilder, IdentityReportingService, ServiceContainer};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ContainerConfigBuilder::new().reference_path("ids.json").build();
//!     let service = ServiceContainer::new(config).create_identity_service().await?;
//!
//!     let attributes = service.attributes();
//!     println!("{} -> {}", attributes.os_info(), attributes.os_id());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;

pub use adapters::{
    FileProbe, FileReferenceSource, LocalHostEnvironment, NeofetchOptions, NeofetchProbe,
    ProcessCommandExecutor,
};
pub use container::{ContainerConfig, ContainerConfigBuilder, ServiceContainer};
pub use domain::{
    Attributes, ChassisKind, ComponentMap, DomainError, FieldKey, IdentifierResolver,
    IdentifierTable, IdentityCollectionService, LineParser, MemoryUnit, ParserConfig, Platform,
    ReferenceTable, ReportError, SystemIdentity,
};
pub use ports::{
    CommandExecutor, HostEnvironment, IdentityReportingService, ProbeSource, ReferenceSource,
};
