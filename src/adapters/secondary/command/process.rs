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

//! Child process command execution adapter

use crate::domain::{CommandError, SystemError};
use crate::ports::{CommandExecutor, CommandOutput, SystemCommand};
use async_trait::async_trait;
use log::{debug, warn};
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Command executor that spawns child processes with timeouts and retries
pub struct ProcessCommandExecutor {
    /// Default timeout for commands
    default_timeout: Duration,
    /// Number of retry attempts for failed commands
    retry_count: u32,
}

impl ProcessCommandExecutor {
    /// Create a new command executor
    ///
    /// # Arguments
    /// * `default_timeout` - Default timeout for commands
    /// * `retry_count` - Number of retry attempts
    pub fn new(default_timeout: Duration, retry_count: u32) -> Self {
        Self {
            default_timeout,
            retry_count,
        }
    }

    /// Create a command executor with default settings
    pub fn with_defaults() -> Self {
        Self::new(Duration::from_secs(30), 2)
    }

    /// Execute a command with optional retry logic
    ///
    /// A missing program is not retried.
    async fn execute_with_retry(
        &self,
        command: &SystemCommand,
    ) -> Result<CommandOutput, CommandError> {
        let mut attempt = 0;

        loop {
            match self.execute_once(command).await {
                Ok(output) => return Ok(output),
                Err(e @ CommandError::System(SystemError::CommandNotFound(_))) => return Err(e),
                Err(e) if attempt >= self.retry_count => return Err(e),
                Err(e) => {
                    attempt += 1;
                    warn!("'{command}' failed on attempt {attempt}, retrying: {e}");
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                }
            }
        }
    }

    /// Execute a command once
    async fn execute_once(&self, command: &SystemCommand) -> Result<CommandOutput, CommandError> {
        let command_timeout = command.timeout.unwrap_or(self.default_timeout);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("Executing: {command}");

        match timeout(command_timeout, cmd.output()).await {
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                let success = output.status.success();
                let exit_code = output.status.code();

                if !success {
                    debug!("'{}' exited with {exit_code:?}: {stderr}", command.program);
                }

                Ok(CommandOutput {
                    stdout,
                    stderr,
                    exit_code,
                    success,
                })
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => Err(CommandError::System(
                SystemError::CommandNotFound(command.program.clone()),
            )),
            Ok(Err(e)) => Err(CommandError::ExecutionFailed(format!(
                "Failed to execute command '{}': {}",
                command.program, e
            ))),
            Err(_) => Err(CommandError::System(SystemError::Timeout(format!(
                "Command '{}' timed out after {:?}",
                command.program, command_timeout
            )))),
        }
    }
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(&self, command: &SystemCommand) -> Result<CommandOutput, CommandError> {
        self.execute_with_retry(command).await
    }
}
