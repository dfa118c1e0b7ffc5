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

//! Android system property lookup through `getprop`

use crate::domain::parsers::parse_getprop_output;
use crate::domain::SystemError;
use crate::ports::{CommandExecutor, PropertyLookup, SystemCommand};
use std::sync::Arc;

/// Name of the property tool
pub const GETPROP: &str = "getprop";

/// Property lookup that shells out to `getprop <key>`
pub struct GetpropPropertyLookup {
    command_executor: Arc<dyn CommandExecutor>,
}

impl GetpropPropertyLookup {
    pub fn new(command_executor: Arc<dyn CommandExecutor>) -> Self {
        Self { command_executor }
    }

    /// Create the lookup only when `getprop` is installed
    pub fn detect(command_executor: Arc<dyn CommandExecutor>) -> Option<Self> {
        if command_executor.is_command_available(GETPROP) {
            Some(Self::new(command_executor))
        } else {
            log::debug!("{GETPROP} not found, property lookup disabled");
            None
        }
    }
}

impl PropertyLookup for GetpropPropertyLookup {
    fn get(&self, key: &str) -> Result<Option<String>, SystemError> {
        let command = SystemCommand::new(GETPROP).args(&[key]);
        let output = self.command_executor.execute(&command)?;

        if !output.success {
            return Err(SystemError::CommandFailed {
                command: command.display(),
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(parse_getprop_output(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CommandOutput;
    use std::sync::Mutex;

    struct ScriptedExecutor {
        output: CommandOutput,
        available: bool,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedExecutor {
        fn new(stdout: &str, exit_code: i32) -> Self {
            Self {
                output: CommandOutput {
                    stdout: stdout.to_string(),
                    stderr: if exit_code == 0 { String::new() } else { "denied".to_string() },
                    exit_code: Some(exit_code),
                    success: exit_code == 0,
                },
                available: true,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandExecutor for ScriptedExecutor {
        fn execute(&self, command: &SystemCommand) -> Result<CommandOutput, SystemError> {
            self.seen.lock().unwrap().push(command.display());
            Ok(self.output.clone())
        }

        fn is_command_available(&self, _command_name: &str) -> bool {
            self.available
        }
    }

    #[test]
    fn test_property_value() {
        let executor = Arc::new(ScriptedExecutor::new("ABC123\n", 0));
        let lookup = GetpropPropertyLookup::new(executor.clone());

        assert_eq!(lookup.get("ro.serialno").unwrap().as_deref(), Some("ABC123"));
        assert_eq!(executor.seen.lock().unwrap().as_slice(), ["getprop ro.serialno"]);
    }

    #[test]
    fn test_unset_property_is_none() {
        let lookup = GetpropPropertyLookup::new(Arc::new(ScriptedExecutor::new("\n", 0)));
        assert_eq!(lookup.get("ro.serialno").unwrap(), None);
    }

    #[test]
    fn test_failed_command_is_an_error() {
        let lookup = GetpropPropertyLookup::new(Arc::new(ScriptedExecutor::new("", 1)));
        let err = lookup.get("ro.serialno").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command 'getprop ro.serialno' failed with exit code 1: denied"
        );
    }

    #[test]
    fn test_detect_requires_getprop() {
        let mut executor = ScriptedExecutor::new("", 0);
        executor.available = false;
        assert!(GetpropPropertyLookup::detect(Arc::new(executor)).is_none());
        assert!(GetpropPropertyLookup::detect(Arc::new(ScriptedExecutor::new("", 0))).is_some());
    }
}
