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

//! Named accessors over one parsed probe report
//!
//! Nothing here is cached: every call reads the component map and reference
//! table it was built on.

use crate::domain::resolver::first_word;
use crate::domain::{
    ChassisKind, ComponentMap, FieldKey, IdentifierResolver, ParserConfig, ReferenceTable,
    SystemIdentity,
};

/// Read-only view over a component map and the tables that resolve it
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a> {
    components: &'a ComponentMap,
    resolver: IdentifierResolver<'a>,
    config: &'a ParserConfig,
    chassis: ChassisKind,
}

impl<'a> Attributes<'a> {
    pub fn new(
        components: &'a ComponentMap,
        reference: &'a ReferenceTable,
        config: &'a ParserConfig,
        chassis: ChassisKind,
    ) -> Self {
        Self {
            components,
            resolver: IdentifierResolver::new(reference),
            config,
            chassis,
        }
    }

    pub fn memory(&self) -> String {
        self.components.joined(FieldKey::Memory)
    }

    pub fn os_info(&self) -> String {
        self.components.joined(FieldKey::Os)
    }

    pub fn os_id(&self) -> String {
        self.resolver.resolve_os(&self.os_info())
    }

    pub fn motherboard(&self) -> String {
        self.components.joined(FieldKey::Motherboard)
    }

    /// Matched reference substring for the motherboard vendor
    pub fn motherboard_id(&self) -> String {
        self.resolver
            .resolve_key(FieldKey::Motherboard, &self.motherboard())
    }

    pub fn host(&self) -> String {
        self.components.joined(FieldKey::Host)
    }

    /// Host model identifier, see [`IdentifierResolver::resolve_host`]
    pub fn host_id(&self) -> String {
        self.resolver.resolve_host(&self.host())
    }

    /// Host identifier through plain substring matching
    pub fn host_app_id(&self) -> String {
        self.standard_id(FieldKey::Host)
    }

    pub fn cpu(&self) -> String {
        self.components.joined(FieldKey::Cpu)
    }

    /// Identifier of the first CPU
    pub fn cpu_id(&self) -> String {
        let first = self.first_value(FieldKey::Cpu).unwrap_or_default();
        self.resolver.resolve(FieldKey::Cpu, first)
    }

    pub fn gpu(&self) -> String {
        self.components.joined(FieldKey::Gpu)
    }

    pub fn gpu_ids(&self) -> Vec<String> {
        self.resolver
            .resolve_gpus(self.components.get(FieldKey::Gpu))
    }

    pub fn disks(&self) -> String {
        self.components.joined(FieldKey::Disk)
    }

    pub fn resolution(&self) -> String {
        self.components.joined(FieldKey::Resolution)
    }

    pub fn theme(&self) -> String {
        self.components.joined(FieldKey::Theme)
    }

    pub fn kernel(&self) -> String {
        self.components.joined(FieldKey::Kernel)
    }

    pub fn packages(&self) -> String {
        self.components.joined(FieldKey::Packages)
    }

    pub fn shell(&self) -> String {
        self.components.joined(FieldKey::Shell)
    }

    pub fn shell_id(&self) -> String {
        self.standard_id(FieldKey::Shell)
    }

    /// Probed terminal unless an override is configured
    pub fn terminal(&self) -> String {
        match &self.config.terminal_override {
            Some(terminal) => terminal.clone(),
            None => self.components.joined(FieldKey::Terminal),
        }
    }

    pub fn terminal_id(&self) -> String {
        self.resolver.resolve(FieldKey::Terminal, &self.terminal())
    }

    /// Configured terminal font, else the probed font
    pub fn terminal_font(&self) -> String {
        match &self.config.terminal_font_override {
            Some(font) => font.clone(),
            None => self.font(),
        }
    }

    pub fn wm(&self) -> String {
        self.components.joined(FieldKey::Wm)
    }

    /// First word of the window manager line
    pub fn wm_id(&self) -> String {
        first_word(&self.wm()).unwrap_or_default().to_string()
    }

    pub fn font(&self) -> String {
        self.components.joined(FieldKey::Font)
    }

    pub fn de(&self) -> String {
        self.components.joined(FieldKey::De)
    }

    /// First word of the desktop environment line
    pub fn de_id(&self) -> String {
        first_word(&self.de()).unwrap_or_default().to_string()
    }

    /// Desktop environment and window manager on separate lines
    pub fn de_wm(&self) -> String {
        format!("{}\n{}", self.de(), self.wm())
    }

    pub fn desktop_id(&self) -> String {
        self.resolver
            .resolve_desktop(self.first_value(FieldKey::De), self.first_value(FieldKey::Wm))
    }

    pub fn battery(&self) -> String {
        self.components.joined(FieldKey::Battery)
    }

    pub fn chassis(&self) -> ChassisKind {
        self.chassis
    }

    /// Everything above in one serializable value
    pub fn snapshot(&self) -> SystemIdentity {
        SystemIdentity {
            os: self.os_info(),
            os_id: self.os_id(),
            kernel: self.kernel(),
            host: self.host(),
            host_id: self.host_id(),
            host_app_id: self.host_app_id(),
            chassis: self.chassis(),
            motherboard: self.motherboard(),
            motherboard_id: self.motherboard_id(),
            cpu: self.cpu(),
            cpu_id: self.cpu_id(),
            gpu: self.gpu(),
            gpu_ids: self.gpu_ids(),
            memory: self.memory(),
            disks: self.disks(),
            resolution: self.resolution(),
            theme: self.theme(),
            packages: self.packages(),
            shell: self.shell(),
            shell_id: self.shell_id(),
            terminal: self.terminal(),
            terminal_id: self.terminal_id(),
            terminal_font: self.terminal_font(),
            font: self.font(),
            de: self.de(),
            wm: self.wm(),
            desktop_id: self.desktop_id(),
            battery: self.battery(),
        }
    }

    fn standard_id(&self, key: FieldKey) -> String {
        self.resolver.resolve(key, &self.components.joined(key))
    }

    fn first_value(&self, key: FieldKey) -> Option<&'a str> {
        self.components.get(key).first().map(String::as_str)
    }
}
