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

use std::io;
use thiserror::Error;

/// System-level errors raised by adapters (files, services, commands)
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SystemError {
    /// Source file or service does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(String),
    /// Source returned data in an unexpected format
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Platform service is not available on this device
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// Command execution failed
    #[error("Command '{command}' failed{}: {stderr}", exit_suffix(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}"))
        .unwrap_or_default()
}

impl SystemError {
    /// Map an I/O error on `path` to the matching system error
    pub fn from_io(path: &str, err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SystemError::NotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => SystemError::PermissionDenied(path.to_string()),
            _ => SystemError::IoError(format!("{path}: {err}")),
        }
    }
}

/// Failure of a whole collector run
///
/// These never reach the caller of a collector; the collection service
/// records them as diagnostics and keeps an empty result instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CollectorError {
    /// Underlying source could not be read
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
    /// Source data was malformed beyond recovery
    #[error("Malformed data: {0}")]
    MalformedData(String),
    /// Access to a privileged source was refused
    #[error("Access denied: {0}")]
    AccessDenied(String),
}

impl From<SystemError> for CollectorError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::PermissionDenied(msg) => CollectorError::AccessDenied(msg),
            SystemError::ParseError(msg) => CollectorError::MalformedData(msg),
            other => CollectorError::SourceUnavailable(other.to_string()),
        }
    }
}

/// Errors from rendering an inventory to XML or JSON
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing the XML document failed
    #[error("XML rendering failed: {0}")]
    Xml(#[from] std::fmt::Error),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    /// Configuration file is not valid TOML for the expected schema
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] toml::de::Error),
    /// Unknown collector name in the configuration
    #[error("Unknown collector: {0}")]
    UnknownCollector(String),
}

/// Errors from writing a rendered inventory
#[derive(Debug, Error)]
pub enum PublishError {
    /// Rendering failed before anything was written
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Output could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}
