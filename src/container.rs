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

//! Dependency injection container for inventory services

use crate::adapters::{
    ConfiguredLocationService, FileInventoryPublisher, GetpropPropertyLookup, HwmonSensorService,
    LinuxBuildInfo, LocalFileSource, UnixCommandExecutor,
};
use crate::domain::{InventoryCollectionService, InventoryConfig, PlatformContext};
use crate::ports::{
    BuildInfoProvider, CommandExecutor, FileSource, InventoryPublisher, InventoryService,
    LocationService, PropertyLookup, SensorService,
};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the dependency injection container
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Command retry count
    pub retry_count: u32,
    /// Pause before retrying a command
    pub retry_delay: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            retry_count: 1,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// Dependency injection container
pub struct ServiceContainer {
    config: ContainerConfig,
    inventory: InventoryConfig,
}

impl ServiceContainer {
    /// Create a new service container
    ///
    /// # Arguments
    /// * `config` - Container settings
    /// * `inventory` - Inventory configuration (paths, collectors, providers)
    pub fn new(config: ContainerConfig, inventory: InventoryConfig) -> Self {
        Self { config, inventory }
    }

    /// Create a service container with default settings for `inventory`
    pub fn with_inventory_config(inventory: InventoryConfig) -> Self {
        Self::new(ContainerConfig::default(), inventory)
    }

    pub fn inventory_config(&self) -> &InventoryConfig {
        &self.inventory
    }

    /// Create the command executor
    pub fn create_command_executor(&self) -> Arc<dyn CommandExecutor> {
        Arc::new(UnixCommandExecutor::new(
            self.config.retry_count,
            self.config.retry_delay,
        ))
    }

    /// Create the file source
    pub fn create_file_source(&self) -> Arc<dyn FileSource> {
        Arc::new(LocalFileSource::new())
    }

    /// Create the build information provider
    pub fn create_build_info(&self, files: Arc<dyn FileSource>) -> Arc<dyn BuildInfoProvider> {
        Arc::new(LinuxBuildInfo::new(files, &self.inventory.paths))
    }

    /// Create the privileged property lookup
    ///
    /// Returns `None` when the lookup is disabled or `getprop` is missing.
    pub fn create_property_lookup(&self) -> Option<Arc<dyn PropertyLookup>> {
        if !self.inventory.allow_property_lookup {
            log::debug!("Property lookup disabled by configuration");
            return None;
        }
        GetpropPropertyLookup::detect(self.create_command_executor())
            .map(|lookup| Arc::new(lookup) as Arc<dyn PropertyLookup>)
    }

    /// Create the location service
    pub fn create_location_service(&self) -> Arc<dyn LocationService> {
        Arc::new(ConfiguredLocationService::new(
            self.inventory.location_providers.clone(),
        ))
    }

    /// Create the sensor registry
    pub fn create_sensor_service(&self, files: Arc<dyn FileSource>) -> Arc<dyn SensorService> {
        Arc::new(HwmonSensorService::new(files, &self.inventory.paths.hwmon_dir))
    }

    /// Assemble the platform context handed to the collectors
    pub fn create_platform_context(&self) -> PlatformContext {
        let files = self.create_file_source();
        PlatformContext {
            build: self.create_build_info(files.clone()),
            properties: self.create_property_lookup(),
            location: self.create_location_service(),
            sensors: self.create_sensor_service(files.clone()),
            paths: self.inventory.paths.clone(),
            files,
        }
    }

    /// Create the complete inventory service
    pub fn create_inventory_service(&self) -> Arc<dyn InventoryService> {
        Arc::new(InventoryCollectionService::new(
            self.create_platform_context(),
            &self.inventory,
        ))
    }

    /// Create the inventory publisher
    pub fn create_publisher(&self) -> Arc<dyn InventoryPublisher> {
        Arc::new(FileInventoryPublisher::new())
    }
}

/// Builder pattern for container configuration
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Set retry count
    pub fn retry_count(mut self, count: u32) -> Self {
        self.config.retry_count = count;
        self
    }

    /// Set retry delay
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ContainerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
