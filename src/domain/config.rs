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

//! Inventory configuration, loaded from TOML

use super::collectors::COLLECTOR_NAMES;
use super::errors::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON document
    #[default]
    Json,
    /// XML document
    Xml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err("Output format must be either 'json' or 'xml'".to_string()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Locations of the system files read by the collectors
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcePaths {
    /// procfs mount, used for kernel attributes under `sys/kernel`
    pub proc_dir: PathBuf,
    pub cpuinfo: PathBuf,
    pub meminfo: PathBuf,
    pub dmi_dir: PathBuf,
    pub cpufreq_dir: PathBuf,
    pub hwmon_dir: PathBuf,
    pub etc_dir: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self::rooted_at(Path::new("/"))
    }
}

impl SourcePaths {
    /// Standard layout below `root` (e.g. a fake filesystem tree)
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            proc_dir: root.join("proc"),
            cpuinfo: root.join("proc/cpuinfo"),
            meminfo: root.join("proc/meminfo"),
            dmi_dir: root.join("sys/devices/virtual/dmi/id"),
            cpufreq_dir: root.join("sys/devices/system/cpu"),
            hwmon_dir: root.join("sys/class/hwmon"),
            etc_dir: root.join("etc"),
        }
    }

    /// Path of one DMI attribute (e.g. "bios_date")
    pub fn dmi(&self, attribute: &str) -> PathBuf {
        self.dmi_dir.join(attribute)
    }
}

/// Configuration for an inventory run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryConfig {
    /// System file locations
    pub paths: SourcePaths,
    /// Collectors to run, in order
    pub collectors: Vec<String>,
    /// Location providers reported by the configured location service
    pub location_providers: Vec<String>,
    /// Allow the privileged `getprop` property lookup
    pub allow_property_lookup: bool,
    /// Device identifier override; defaults to the host name
    pub device_id: Option<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            paths: SourcePaths::default(),
            collectors: COLLECTOR_NAMES.iter().map(|s| s.to_string()).collect(),
            location_providers: Vec::new(),
            allow_property_lookup: true,
            device_id: None,
        }
    }
}

impl InventoryConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: InventoryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject collector names that are not registered
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .collectors
            .iter()
            .find(|name| !COLLECTOR_NAMES.contains(&name.as_str()))
        {
            Some(unknown) => Err(ConfigError::UnknownCollector(unknown.clone())),
            None => Ok(()),
        }
    }
}

/// Builder pattern for inventory configuration
pub struct InventoryConfigBuilder {
    config: InventoryConfig,
}

impl InventoryConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: InventoryConfig::default(),
        }
    }

    /// Read every system file below `root`
    pub fn root(mut self, root: &Path) -> Self {
        self.config.paths = SourcePaths::rooted_at(root);
        self
    }

    /// Set the collectors to run
    pub fn collectors(mut self, names: &[&str]) -> Self {
        self.config.collectors = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the statically configured location providers
    pub fn location_providers(mut self, names: &[&str]) -> Self {
        self.config.location_providers = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Allow or forbid the privileged property lookup
    pub fn allow_property_lookup(mut self, allow: bool) -> Self {
        self.config.allow_property_lookup = allow;
        self
    }

    /// Override the device identifier
    pub fn device_id(mut self, device_id: &str) -> Self {
        self.config.device_id = Some(device_id.to_string());
        self
    }

    /// Build the configuration
    pub fn build(self) -> InventoryConfig {
        self.config
    }
}

impl Default for InventoryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
