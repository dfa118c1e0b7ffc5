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

//! Device Inventory Library
//!
//! This library collects a structured inventory of a device (BIOS, CPUs,
//! memory, sensors, operating system, location providers) and renders it
//! to XML or JSON. It follows a Ports and Adapters (Hexagonal) architecture.
//!
//! # Architecture
//!
//! - **Domain**: Inventory model, collectors, fallback chains and renderers
//! - **Ports**: Interfaces to the platform (files, build info, properties,
//!   location and sensor registries) and to the output
//! - **Adapters**: Linux and Android implementations of the ports
//!
//! # Usage
//!
//! ```rust,no_run
//! use device_inventory::{render, InventoryConfig, InventoryService, RenderOptions};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = device_inventory::create_service(InventoryConfig::default());
//!     let inventory = service.collect_inventory();
//!
//!     for diagnostic in &inventory.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//!     println!("{}", render(&inventory, &RenderOptions::default())?);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;

pub use adapters::{
    ConfiguredLocationService, FileInventoryPublisher, GetpropPropertyLookup, HwmonSensorService,
    LinuxBuildInfo, LocalFileSource, UnixCommandExecutor,
};
pub use container::{ContainerConfig, ContainerConfigBuilder, ServiceContainer};
pub use domain::{
    render, Categories, Category, CategoryValue, CollectorError, ConfigError, Diagnostic,
    Inventory, InventoryConfig, InventoryConfigBuilder, InventorySection, OutputFormat,
    PublishError, RenderError, RenderOptions, Severity, SystemError, ValuePayload,
};
pub use ports::{InventoryPublisher, InventoryService};

use std::sync::Arc;

/// Create an inventory service wired to the local platform
///
/// # Arguments
/// * `config` - Inventory configuration (paths, collectors, providers)
///
/// # Returns
/// * Configured inventory service
pub fn create_service(config: InventoryConfig) -> Arc<dyn InventoryService> {
    ServiceContainer::with_inventory_config(config).create_inventory_service()
}

/// Create an inventory service with custom container configuration
///
/// # Arguments
/// * `container_config` - Container configuration for customizing behavior
/// * `config` - Inventory configuration
pub fn create_service_with_config(
    container_config: ContainerConfig,
    config: InventoryConfig,
) -> Arc<dyn InventoryService> {
    ServiceContainer::new(container_config, config).create_inventory_service()
}
