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

//! External program execution port

use crate::domain::CommandError;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// One invocation of an external program
#[derive(Debug, Clone, PartialEq)]
pub struct SystemCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Overrides the executor's default timeout
    pub timeout: Option<Duration>,
}

impl SystemCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Append arguments in order
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Display for SystemCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished program
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Secondary port - runs external programs for probe adapters
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a command to completion
    ///
    /// A non-zero exit is reported through [`CommandOutput::success`], not as
    /// an error. Errors mean the program could not be run at all or timed out.
    async fn execute(&self, command: &SystemCommand) -> Result<CommandOutput, CommandError>;
}
