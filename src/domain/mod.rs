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

//! Domain layer: inventory model, collectors, rendering and services
//!
//! Nothing in this module touches the platform directly; every source is
//! reached through the secondary ports.

pub mod collectors;
pub mod config;
pub mod diagnostics;
pub mod entities;
pub mod errors;
pub mod fallback;
pub mod parsers;
pub mod render;
pub mod services;

pub use collectors::{collector_by_name, run_collector, Collector, PlatformContext, COLLECTOR_NAMES};
pub use config::{InventoryConfig, InventoryConfigBuilder, OutputFormat, SourcePaths};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use entities::{
    Categories, Category, CategoryValue, Inventory, InventorySection, ValuePayload,
    NOT_AVAILABLE, UNKNOWN,
};
pub use errors::{CollectorError, ConfigError, PublishError, RenderError, SystemError};
pub use fallback::{FallbackChain, Resolved};
pub use render::{render, RenderOptions};
pub use services::InventoryCollectionService;
