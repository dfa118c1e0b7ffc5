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

//! Collectors: one per hardware or software facet
//!
//! Every collector builds its records field by field. Field getters never
//! fail; a source that cannot be read is recorded in the run's
//! [`Diagnostics`] and the field falls back to a sentinel. A collector only
//! returns an error when it cannot produce any record at all, and the
//! caller then keeps an empty [`Categories`].

mod bios;
mod cpus;
mod hardware;
mod location_providers;
mod memory;
mod operating_system;
mod sensors;

#[cfg(test)]
pub(crate) mod testing;

pub use bios::Bios;
pub use cpus::Cpus;
pub use hardware::Hardware;
pub use location_providers::LocationProviders;
pub use memory::Memory;
pub use operating_system::OperatingSystem;
pub use sensors::Sensors;

use super::config::SourcePaths;
use super::diagnostics::{Diagnostic, Diagnostics};
use super::entities::{Categories, UNKNOWN};
use super::errors::{CollectorError, SystemError};
use super::parsers::parse_sysfs_value;
use crate::ports::{BuildInfoProvider, FileSource, LocationService, PropertyLookup, SensorService};
use std::path::Path;
use std::sync::Arc;

/// Names of every registered collector, in default run order
pub const COLLECTOR_NAMES: &[&str] = &[
    Hardware::NAME,
    Bios::NAME,
    OperatingSystem::NAME,
    Cpus::NAME,
    Memory::NAME,
    Sensors::NAME,
    LocationProviders::NAME,
];

/// Platform collaborators handed to every collector
#[derive(Clone)]
pub struct PlatformContext {
    /// Access to /proc, /sys and /etc files
    pub files: Arc<dyn FileSource>,
    /// Build information of the device
    pub build: Arc<dyn BuildInfoProvider>,
    /// Privileged property lookup, when the platform offers one
    pub properties: Option<Arc<dyn PropertyLookup>>,
    /// Location provider registry
    pub location: Arc<dyn LocationService>,
    /// Sensor registry
    pub sensors: Arc<dyn SensorService>,
    /// Where the system files live
    pub paths: SourcePaths,
}

/// A per-facet data-gathering unit
pub trait Collector: Send + Sync {
    /// Registry name (e.g. "bios")
    fn name(&self) -> &'static str;

    /// Build the records of this facet
    ///
    /// # Returns
    /// * `Ok(Categories)` - Records in emission order (possibly empty)
    /// * `Err(CollectorError)` - Nothing could be collected
    fn collect(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError>;
}

/// Look up a collector by registry name
pub fn collector_by_name(name: &str) -> Option<Box<dyn Collector>> {
    let collector: Box<dyn Collector> = match name {
        Bios::NAME => Box::new(Bios),
        Cpus::NAME => Box::new(Cpus),
        Hardware::NAME => Box::new(Hardware),
        LocationProviders::NAME => Box::new(LocationProviders),
        Memory::NAME => Box::new(Memory),
        OperatingSystem::NAME => Box::new(OperatingSystem),
        Sensors::NAME => Box::new(Sensors),
        _ => return None,
    };
    Some(collector)
}

/// Run a collector, turning a failed run into an empty result
///
/// Never fails: the returned records are always structurally valid and the
/// diagnostics describe everything that went wrong.
pub fn run_collector(
    collector: &dyn Collector,
    ctx: &PlatformContext,
) -> (Categories, Vec<Diagnostic>) {
    let mut diagnostics = Diagnostics::new(collector.name());
    let categories = match collector.collect(ctx, &mut diagnostics) {
        Ok(categories) => categories,
        Err(err) => {
            diagnostics.collector_failed(&err);
            Categories::new()
        }
    };
    (categories, diagnostics.into_entries())
}

/// Read a single-value attribute file
///
/// # Returns
/// * `Ok(Some(String))` - Normalised value
/// * `Ok(None)` - File is empty
/// * `Err(SystemError)` - File could not be read
pub(crate) fn read_attribute(
    files: &dyn FileSource,
    path: &Path,
) -> Result<Option<String>, SystemError> {
    Ok(parse_sysfs_value(&files.read_to_string(path)?))
}

/// Read an attribute file, or `sentinel` when it is missing or empty
pub(crate) fn attribute_or(
    ctx: &PlatformContext,
    path: &Path,
    sentinel: &str,
    diagnostics: &mut Diagnostics,
) -> String {
    match read_attribute(ctx.files.as_ref(), path) {
        Ok(Some(value)) => value,
        Ok(None) => sentinel.to_string(),
        Err(err) => {
            diagnostics.degraded(&path.display().to_string(), err);
            sentinel.to_string()
        }
    }
}

/// Unwrap a platform getter, or [`UNKNOWN`] when it failed
pub(crate) fn platform_value(
    source: &str,
    result: Result<String, SystemError>,
    diagnostics: &mut Diagnostics,
) -> String {
    match result {
        Ok(value) => value,
        Err(err) => {
            diagnostics.degraded(source, err);
            UNKNOWN.to_string()
        }
    }
}
