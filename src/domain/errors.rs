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

use thiserror::Error;

/// Errors raised while turning probe text into a component map
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    /// A structured field did not have the shape its rule expects
    #[error("Malformed {field} line '{line}': {reason}")]
    MalformedField {
        field: String,
        line: String,
        reason: String,
    },
}

/// Reference table configuration errors, raised at load time
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReferenceError {
    /// The document has no top-level `map` section
    #[error("Reference table has no 'map' section")]
    MissingMap,
    /// A `map` entry names a table that does not exist
    #[error("Field '{field}' points at missing table '{table}'")]
    MissingTable { field: String, table: String },
    /// A table lacks the mandatory `unknown` entry
    #[error("Table '{0}' has no 'unknown' identifier")]
    MissingUnknown(String),
    /// A field that needs identifiers is not mapped to any table
    #[error("Field '{0}' is not mapped to a reference table")]
    UnmappedField(String),
    /// The document shape is not what the loader expects
    #[error("Invalid reference table: {0}")]
    Invalid(String),
    /// The reference file could not be read
    #[error("Failed to read reference table: {0}")]
    Io(String),
}

/// Errors from capturing the probe output
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// The probe program is not installed or not on PATH
    #[error("{0} not found, please install it or check that it is in PATH")]
    NotInstalled(String),
    /// The probe ran but did not succeed
    #[error("Probe '{program}' failed: {stderr}")]
    Failed { program: String, stderr: String },
    /// A saved report could not be read
    #[error("Failed to read probe report: {0}")]
    Io(String),
    /// Command execution error
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// System-level errors for adapters (not exposed to domain)
#[derive(Debug, Clone, Error)]
pub enum SystemError {
    /// Command not found
    #[error("Command not found: {0}")]
    CommandNotFound(String),
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(String),
    /// Timeout
    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Command execution errors
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// System error occurred
    #[error(transparent)]
    System(#[from] SystemError),
    /// Command execution failed
    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),
}

/// Domain-level errors that don't expose infrastructure details
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// The host is not one of the supported platform families
    #[error("Not a supported OS: {0}")]
    UnsupportedPlatform(String),
    /// Probe text could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Reference table is unusable
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    /// Probe output could not be captured
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Errors specific to the identity reporting service
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    /// Domain operation failed
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Snapshot serialization failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

impl From<ParseError> for ReportError {
    fn from(err: ParseError) -> Self {
        ReportError::Domain(err.into())
    }
}

impl From<ProbeError> for ReportError {
    fn from(err: ProbeError) -> Self {
        ReportError::Domain(err.into())
    }
}

impl From<SystemError> for ProbeError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::CommandNotFound(cmd) => ProbeError::NotInstalled(cmd),
            other => ProbeError::Command(CommandError::System(other)),
        }
    }
}
