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

//! Unix command execution adapter

use crate::domain::SystemError;
use crate::ports::{CommandExecutor, CommandOutput, SystemCommand};
use std::io;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

/// Unix-based command executor with retries for commands that fail to start
pub struct UnixCommandExecutor {
    /// Number of retry attempts for commands that could not be started
    retry_count: u32,
    /// Pause between attempts
    retry_delay: Duration,
}

impl UnixCommandExecutor {
    /// Create a new Unix command executor
    ///
    /// # Arguments
    /// * `retry_count` - Number of retry attempts
    /// * `retry_delay` - Pause before the first retry; later retries wait longer
    pub fn new(retry_count: u32, retry_delay: Duration) -> Self {
        Self {
            retry_count,
            retry_delay,
        }
    }

    /// Create a Unix command executor with default settings
    pub fn with_defaults() -> Self {
        Self::new(1, Duration::from_millis(100))
    }

    fn execute_once(&self, command: &SystemCommand) -> Result<CommandOutput, SystemError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);

        if let Some(ref env_vars) = command.env_vars {
            for (key, value) in env_vars {
                cmd.env(key, value);
            }
        }

        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null());

        log::debug!("Executing: {}", command.display());

        let output = cmd.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SystemError::NotFound(command.program.clone()),
            io::ErrorKind::PermissionDenied => {
                SystemError::PermissionDenied(command.program.clone())
            }
            _ => SystemError::IoError(format!(
                "Failed to execute command '{}': {}",
                command.program, e
            )),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let success = output.status.success();
        let exit_code = output.status.code();

        if !success {
            log::debug!(
                "Command '{}' exited with {exit_code:?}: {}",
                command.display(),
                stderr.trim()
            );
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
            success,
        })
    }
}

impl CommandExecutor for UnixCommandExecutor {
    fn execute(&self, command: &SystemCommand) -> Result<CommandOutput, SystemError> {
        let mut attempt = 0;
        loop {
            match self.execute_once(command) {
                Ok(output) => return Ok(output),
                // A missing program will not appear on retry
                Err(err @ SystemError::NotFound(_)) => return Err(err),
                Err(err) if attempt >= self.retry_count => return Err(err),
                Err(err) => {
                    attempt += 1;
                    log::debug!("Command failed on attempt {attempt}, retrying: {err}");
                    thread::sleep(self.retry_delay * attempt);
                }
            }
        }
    }

    fn is_command_available(&self, command_name: &str) -> bool {
        let which_cmd = SystemCommand::new("which").args(&[command_name]);

        match self.execute(&which_cmd) {
            Ok(output) => output.success && !output.stdout.trim().is_empty(),
            // If 'which' fails, assume the command is not available
            Err(_) => false,
        }
    }
}
