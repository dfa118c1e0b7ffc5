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

use crate::domain::SystemError;

/// Value the platform reports for build fields it does not know
pub const BUILD_UNKNOWN: &str = "unknown";

/// Secondary port - Platform build information
///
/// Abstracts the build-info accessor of the device (manufacturer, model,
/// serial, OS release). Implementations return [`BUILD_UNKNOWN`] for fields
/// the platform does not know rather than failing.
pub trait BuildInfoProvider: Send + Sync {
    /// Device manufacturer
    fn manufacturer(&self) -> Result<String, SystemError>;

    /// Device model
    fn model(&self) -> Result<String, SystemError>;

    /// Build tags (asset tag on PC-class hardware)
    fn tags(&self) -> Result<String, SystemError>;

    /// Hardware serial number, or [`BUILD_UNKNOWN`]
    fn serial(&self) -> Result<String, SystemError>;

    /// Operating system name
    fn os_name(&self) -> Result<String, SystemError>;

    /// Operating system version
    fn os_version(&self) -> Result<String, SystemError>;

    /// Kernel name (e.g. "Linux")
    fn kernel_name(&self) -> Result<String, SystemError>;

    /// Kernel release
    fn kernel_version(&self) -> Result<String, SystemError>;

    /// CPU architecture (e.g. "aarch64")
    fn architecture(&self) -> Result<String, SystemError>;

    /// Host name
    fn hostname(&self) -> Result<String, SystemError>;

    /// Name of the user running the collection
    fn user_name(&self) -> Result<String, SystemError>;
}

/// Secondary port - Privileged system property lookup
///
/// Optional capability. When the platform does not offer it, the attempts
/// that need it are left out of their fallback chains.
pub trait PropertyLookup: Send + Sync {
    /// Look up a system property
    ///
    /// # Returns
    /// * `Ok(Some(String))` - Property value
    /// * `Ok(None)` - Property not set
    /// * `Err(SystemError)` - Lookup refused or failed
    fn get(&self, key: &str) -> Result<Option<String>, SystemError>;
}

/// A location provider registered on the device
#[derive(Debug, Clone, PartialEq)]
pub struct LocationProvider {
    pub name: String,
}

/// Secondary port - Location service
pub trait LocationService: Send + Sync {
    /// Names of every registered provider
    fn all_providers(&self) -> Result<Vec<String>, SystemError>;

    /// Resolve a provider by name
    fn provider(&self, name: &str) -> Result<Option<LocationProvider>, SystemError>;
}

/// A hardware sensor known to the platform
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorDescriptor {
    pub name: String,
    pub vendor: String,
    pub kind: String,
    pub version: String,
}

/// Secondary port - Sensor registry
pub trait SensorService: Send + Sync {
    /// Every sensor the platform exposes
    fn sensors(&self) -> Result<Vec<SensorDescriptor>, SystemError>;
}
