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

//! Dependency injection container for the identity service

use crate::adapters::{
    FileProbe, FileReferenceSource, LocalHostEnvironment, NeofetchOptions, NeofetchProbe,
    ProcessCommandExecutor,
};
use crate::domain::{
    ChassisKind, DomainError, IdentityCollectionService, ParserConfig, Platform, ReportError,
};
use crate::ports::{CommandExecutor, HostEnvironment, ProbeSource, ReferenceSource};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default reference table location, relative to the working directory
pub const DEFAULT_REFERENCE_PATH: &str = "ids.json";

/// Configuration for the dependency injection container
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Command execution timeout
    pub command_timeout: Duration,
    /// Command retry count
    pub retry_count: u32,
    /// Reference table file
    pub reference_path: PathBuf,
    /// Saved probe report to read instead of running neofetch
    pub probe_input: Option<PathBuf>,
    /// neofetch config handling
    pub neofetch: NeofetchOptions,
    /// Parser configuration
    pub parser: ParserConfig,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(30),
            retry_count: 2,
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            probe_input: None,
            neofetch: NeofetchOptions::default(),
            parser: ParserConfig::default(),
        }
    }
}

/// Dependency injection container
pub struct ServiceContainer {
    config: ContainerConfig,
    host: Arc<dyn HostEnvironment>,
}

impl ServiceContainer {
    /// Create a new service container with configuration
    pub fn new(config: ContainerConfig) -> Self {
        Self::with_host(config, Arc::new(LocalHostEnvironment::new()))
    }

    /// Create a service container with a specific host environment
    pub fn with_host(config: ContainerConfig, host: Arc<dyn HostEnvironment>) -> Self {
        Self { config, host }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Platform of the running host; unsupported platforms are fatal
    pub fn platform(&self) -> Result<Platform, DomainError> {
        self.host.platform()
    }

    /// Create the command executor
    pub fn create_command_executor(&self) -> Arc<dyn CommandExecutor> {
        Arc::new(ProcessCommandExecutor::new(
            self.config.command_timeout,
            self.config.retry_count,
        ))
    }

    /// Create the probe source: a saved report if configured, else neofetch
    pub fn create_probe_source(&self) -> Result<Arc<dyn ProbeSource>, DomainError> {
        let platform = self.platform()?;

        let probe: Arc<dyn ProbeSource> = match self.config.probe_input {
            Some(ref path) => Arc::new(FileProbe::new(path)),
            None => Arc::new(NeofetchProbe::new(
                self.create_command_executor(),
                platform,
                self.config.neofetch.clone(),
            )),
        };

        Ok(probe)
    }

    /// Create the reference table source
    pub fn create_reference_source(&self) -> Arc<dyn ReferenceSource> {
        Arc::new(FileReferenceSource::new(&self.config.reference_path))
    }

    /// Laptop or desktop, treating an unreadable power supply as desktop
    pub async fn detect_chassis(&self) -> Result<ChassisKind, DomainError> {
        let platform = self.platform()?;
        let has_battery = match self.host.has_battery().await {
            Ok(found) => found,
            Err(e) => {
                warn!("Battery detection failed, assuming desktop: {e}");
                false
            }
        };
        Ok(ChassisKind::classify(platform, has_battery))
    }

    /// Create the identity service and run its first refresh
    ///
    /// The reference table is loaded and validated before the probe runs.
    pub async fn create_identity_service(&self) -> Result<IdentityCollectionService, ReportError> {
        let platform = self.platform()?;
        info!("Running on {platform}");

        let reference = self
            .create_reference_source()
            .load()
            .await
            .map_err(DomainError::from)?;
        let probe = self.create_probe_source()?;
        let chassis = self.detect_chassis().await?;

        IdentityCollectionService::start(probe, reference, self.config.parser.clone(), chassis)
            .await
    }
}

/// Builder pattern for container configuration
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Set command timeout
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = timeout;
        self
    }

    /// Set retry count
    pub fn retry_count(mut self, count: u32) -> Self {
        self.config.retry_count = count;
        self
    }

    /// Set the reference table file
    pub fn reference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.reference_path = path.into();
        self
    }

    /// Read probe reports from a file instead of running neofetch
    pub fn probe_input(mut self, path: Option<PathBuf>) -> Self {
        self.config.probe_input = path;
        self
    }

    /// Set neofetch config handling
    pub fn neofetch(mut self, options: NeofetchOptions) -> Self {
        self.config.neofetch = options;
        self
    }

    /// Set parser configuration
    pub fn parser(mut self, parser: ParserConfig) -> Self {
        self.config.parser = parser;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ContainerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::tests::SAMPLE;
    use crate::domain::{MemoryUnit, SystemError};
    use crate::ports::IdentityReportingService;
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct FixedHost {
        platform: Result<Platform, DomainError>,
        battery: bool,
    }

    #[async_trait]
    impl HostEnvironment for FixedHost {
        fn platform(&self) -> Result<Platform, DomainError> {
            self.platform.clone()
        }

        async fn has_battery(&self) -> Result<bool, SystemError> {
            Ok(self.battery)
        }
    }

    fn host(platform: Result<Platform, DomainError>, battery: bool) -> Arc<dyn HostEnvironment> {
        Arc::new(FixedHost { platform, battery })
    }

    #[test]
    fn test_config_builder() {
        let config = ContainerConfigBuilder::new()
            .command_timeout(Duration::from_secs(60))
            .retry_count(3)
            .reference_path("/etc/fetch_ident/ids.json")
            .parser(ParserConfig {
                memory_unit: MemoryUnit::Gib,
                ..Default::default()
            })
            .build();

        assert_eq!(config.command_timeout, Duration::from_secs(60));
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.reference_path, PathBuf::from("/etc/fetch_ident/ids.json"));
        assert_eq!(config.parser.memory_unit, MemoryUnit::Gib);
        assert!(config.probe_input.is_none());
    }

    #[tokio::test]
    async fn test_chassis_detection() {
        let laptop = ServiceContainer::with_host(
            ContainerConfig::default(),
            host(Ok(Platform::Linux), true),
        );
        assert_eq!(laptop.detect_chassis().await.unwrap(), ChassisKind::Laptop);

        let mac = ServiceContainer::with_host(
            ContainerConfig::default(),
            host(Ok(Platform::MacOs), true),
        );
        assert_eq!(mac.detect_chassis().await.unwrap(), ChassisKind::Desktop);
    }

    #[tokio::test]
    async fn test_unsupported_platform_is_fatal() {
        let container = ServiceContainer::with_host(
            ContainerConfig::default(),
            host(Err(DomainError::UnsupportedPlatform("haiku".to_string())), false),
        );

        assert!(container.create_probe_source().is_err());
        let err = container.create_identity_service().await.err().unwrap();
        assert!(err.to_string().contains("Not a supported OS: haiku"));
    }

    #[tokio::test]
    async fn test_identity_service_from_files() {
        let dir = tempdir().unwrap();
        let reference = dir.path().join("ids.json");
        let report = dir.path().join("report.txt");
        std::fs::write(&reference, SAMPLE).unwrap();
        std::fs::write(&report, "OS: Arch Linux x86_64\nShell: zsh 5.9\n").unwrap();

        let config = ContainerConfigBuilder::new()
            .reference_path(&reference)
            .probe_input(Some(report))
            .build();
        let container = ServiceContainer::with_host(config, host(Ok(Platform::Linux), false));

        let service = container.create_identity_service().await.unwrap();
        assert_eq!(service.attributes().os_id(), "arch");
        assert_eq!(service.snapshot().chassis, ChassisKind::Desktop);
    }

    #[tokio::test]
    async fn test_bad_reference_fails_before_probe() {
        let dir = tempdir().unwrap();
        let config = ContainerConfigBuilder::new()
            .reference_path(dir.path().join("missing.json"))
            .probe_input(Some(dir.path().join("also_missing.txt")))
            .build();
        let container = ServiceContainer::with_host(config, host(Ok(Platform::Linux), false));

        let err = container.create_identity_service().await.err().unwrap();
        assert!(matches!(
            err,
            ReportError::Domain(DomainError::Reference(_))
        ));
    }
}
