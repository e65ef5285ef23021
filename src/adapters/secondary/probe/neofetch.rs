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

//! neofetch probe adapter

use crate::domain::{CommandError, Platform, ProbeError};
use crate::ports::{CommandExecutor, ProbeSource, SystemCommand};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const NEOFETCH: &str = "neofetch";

/// How neofetch should treat the user's own configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeofetchOptions {
    /// Run with `--config none`, for setups whose custom config breaks parsing
    pub disable_config: bool,
    /// Custom neofetch config file
    pub config_path: Option<String>,
}

/// Runs neofetch and returns its stdout
pub struct NeofetchProbe {
    command_executor: Arc<dyn CommandExecutor>,
    platform: Platform,
    options: NeofetchOptions,
}

impl NeofetchProbe {
    /// Create a new neofetch probe
    ///
    /// # Arguments
    /// * `command_executor` - Executor used to run neofetch
    /// * `platform` - Host platform, which selects the invocation
    /// * `options` - Config handling
    pub fn new(
        command_executor: Arc<dyn CommandExecutor>,
        platform: Platform,
        options: NeofetchOptions,
    ) -> Self {
        Self {
            command_executor,
            platform,
            options,
        }
    }

    /// Command line for this platform
    ///
    /// Windows builds of neofetch have no `--stdout` mode, so the logo is
    /// suppressed instead.
    pub fn command(&self) -> SystemCommand {
        match self.platform {
            Platform::Windows => SystemCommand::new(NEOFETCH).arg("--noart"),
            Platform::Linux | Platform::MacOs => {
                let cmd = SystemCommand::new(NEOFETCH).arg("--stdout");
                if self.options.disable_config {
                    cmd.arg("--config").arg("none")
                } else if let Some(ref path) = self.options.config_path {
                    cmd.arg("--config").arg(path)
                } else {
                    cmd
                }
            }
        }
    }
}

#[async_trait]
impl ProbeSource for NeofetchProbe {
    async fn capture(&self) -> Result<String, ProbeError> {
        let command = self.command();
        debug!("Capturing probe report with '{command}'");

        let output = self
            .command_executor
            .execute(&command)
            .await
            .map_err(|e| match e {
                CommandError::System(system) => ProbeError::from(system),
                other => ProbeError::Command(other),
            })?;

        if !output.success {
            return Err(ProbeError::Failed {
                program: command.to_string(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SystemError;
    use crate::ports::CommandOutput;
    use std::sync::Mutex;

    /// Records commands and answers with a canned result
    struct StubExecutor {
        result: Result<CommandOutput, CommandError>,
        seen: Mutex<Vec<SystemCommand>>,
    }

    impl StubExecutor {
        fn ok(stdout: &str) -> Arc<Self> {
            Self::with(Ok(CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: Some(0),
                success: true,
            }))
        }

        fn with(result: Result<CommandOutput, CommandError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CommandExecutor for StubExecutor {
        async fn execute(&self, command: &SystemCommand) -> Result<CommandOutput, CommandError> {
            self.seen.lock().unwrap().push(command.clone());
            self.result.clone()
        }
    }

    fn probe(platform: Platform, options: NeofetchOptions) -> NeofetchProbe {
        NeofetchProbe::new(StubExecutor::ok(""), platform, options)
    }

    #[test]
    fn test_command_per_platform() {
        let default = NeofetchOptions::default();

        assert_eq!(
            probe(Platform::Linux, default.clone()).command().args,
            ["--stdout"]
        );
        assert_eq!(
            probe(Platform::MacOs, default.clone()).command().args,
            ["--stdout"]
        );
        assert_eq!(
            probe(Platform::Windows, default).command().args,
            ["--noart"]
        );
    }

    #[test]
    fn test_command_config_handling() {
        let disabled = NeofetchOptions {
            disable_config: true,
            config_path: Some("/ignored".to_string()),
        };
        assert_eq!(
            probe(Platform::Linux, disabled).command().to_string(),
            "neofetch --stdout --config none"
        );

        let custom = NeofetchOptions {
            disable_config: false,
            config_path: Some("/home/me/.config/neofetch/plain.conf".to_string()),
        };
        assert_eq!(
            probe(Platform::Linux, custom).command().to_string(),
            "neofetch --stdout --config /home/me/.config/neofetch/plain.conf"
        );
    }

    #[tokio::test]
    async fn test_capture_returns_stdout() {
        let executor = StubExecutor::ok("OS: Arch Linux x86_64\n");
        let probe =
            NeofetchProbe::new(executor.clone(), Platform::Linux, NeofetchOptions::default());

        assert_eq!(probe.capture().await.unwrap(), "OS: Arch Linux x86_64\n");
        assert_eq!(executor.seen.lock().unwrap()[0].program, "neofetch");
    }

    #[tokio::test]
    async fn test_capture_missing_neofetch() {
        let executor = StubExecutor::with(Err(CommandError::System(
            SystemError::CommandNotFound("neofetch".to_string()),
        )));
        let probe = NeofetchProbe::new(executor, Platform::Linux, NeofetchOptions::default());

        let err = probe.capture().await.unwrap_err();
        assert!(matches!(err, ProbeError::NotInstalled(_)));
    }

    #[tokio::test]
    async fn test_capture_failed_exit() {
        let executor = StubExecutor::with(Ok(CommandOutput {
            stdout: String::new(),
            stderr: "neofetch: unknown option\n".to_string(),
            exit_code: Some(1),
            success: false,
        }));
        let probe = NeofetchProbe::new(executor, Platform::MacOs, NeofetchOptions::default());

        match probe.capture().await.unwrap_err() {
            ProbeError::Failed { program, stderr } => {
                assert_eq!(program, "neofetch --stdout");
                assert_eq!(stderr, "neofetch: unknown option");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
