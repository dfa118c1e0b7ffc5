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

//! Per-run record of failures that were recovered locally

use std::fmt;

/// How much a recovered failure matters to the reader of the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// An attempt or field fell back to another source or a sentinel
    Degraded,
    /// A whole collector produced nothing
    CollectorFailed,
}

/// One recovered failure
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Collector that hit the failure
    pub collector: String,
    /// Source that failed (file path, service, property)
    pub source: String,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.collector, self.source, self.message)
    }
}

/// Diagnostics sink handed to a collector for one run
///
/// Every entry is also forwarded to the `log` facade with the collector
/// name as the target.
#[derive(Debug)]
pub struct Diagnostics {
    collector: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(collector: &str) -> Self {
        Self {
            collector: collector.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn collector(&self) -> &str {
        &self.collector
    }

    /// Record a source that failed and was skipped
    pub fn degraded(&mut self, source: &str, message: impl fmt::Display) {
        self.push(source, Severity::Degraded, message.to_string());
    }

    /// Record a collector that failed as a whole
    pub fn collector_failed(&mut self, message: impl fmt::Display) {
        let source = self.collector.clone();
        self.push(&source, Severity::CollectorFailed, message.to_string());
    }

    /// Note which source produced a value
    pub fn resolved(&self, field: &str, source: &str) {
        log::debug!(target: self.collector.as_str(), "{field} resolved from {source}");
    }

    fn push(&mut self, source: &str, severity: Severity, message: String) {
        match severity {
            Severity::Degraded => {
                log::warn!(target: self.collector.as_str(), "{source}: {message}")
            }
            Severity::CollectorFailed => {
                log::error!(target: self.collector.as_str(), "{message}")
            }
        }
        self.entries.push(Diagnostic {
            collector: self.collector.clone(),
            source: source.to_string(),
            severity,
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
