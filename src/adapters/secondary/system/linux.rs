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

//! Linux build information provider

use crate::domain::parsers::parse_sysfs_value;
use crate::domain::{SourcePaths, SystemError};
use crate::ports::{BuildInfoProvider, FileSource, BUILD_UNKNOWN};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sysinfo::System;

/// Build information of a Linux host
///
/// Vendor, model, serial and asset tag come from DMI attributes; release
/// details come from `sysinfo`.
pub struct LinuxBuildInfo {
    files: Arc<dyn FileSource>,
    dmi_dir: PathBuf,
    ostype: PathBuf,
}

impl LinuxBuildInfo {
    /// Create a new Linux build information provider
    ///
    /// # Arguments
    /// * `files` - File source used for DMI and kernel attributes
    /// * `paths` - System file locations
    pub fn new(files: Arc<dyn FileSource>, paths: &SourcePaths) -> Self {
        Self {
            files,
            dmi_dir: paths.dmi_dir.clone(),
            ostype: paths.proc_dir.join("sys/kernel/ostype"),
        }
    }

    fn attribute(&self, path: &Path) -> Result<String, SystemError> {
        parse_sysfs_value(&self.files.read_to_string(path)?)
            .ok_or_else(|| SystemError::ParseError(format!("{} is empty", path.display())))
    }

    fn dmi(&self, attribute: &str) -> Result<String, SystemError> {
        self.attribute(&self.dmi_dir.join(attribute))
    }
}

fn from_sysinfo(field: &str, value: Option<String>) -> Result<String, SystemError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SystemError::Unavailable(format!("sysinfo {field}")))
}

impl BuildInfoProvider for LinuxBuildInfo {
    fn manufacturer(&self) -> Result<String, SystemError> {
        self.dmi("sys_vendor")
    }

    fn model(&self) -> Result<String, SystemError> {
        self.dmi("product_name")
    }

    fn tags(&self) -> Result<String, SystemError> {
        self.dmi("chassis_asset_tag")
    }

    fn serial(&self) -> Result<String, SystemError> {
        // product_serial is root-only; an unreadable serial is simply unknown
        match self.dmi("product_serial") {
            Ok(serial) => Ok(serial),
            Err(err) => {
                log::debug!("Build serial unavailable: {err}");
                Ok(BUILD_UNKNOWN.to_string())
            }
        }
    }

    fn os_name(&self) -> Result<String, SystemError> {
        from_sysinfo("name", System::name())
    }

    fn os_version(&self) -> Result<String, SystemError> {
        from_sysinfo("os_version", System::os_version())
    }

    fn kernel_name(&self) -> Result<String, SystemError> {
        self.attribute(&self.ostype)
    }

    fn kernel_version(&self) -> Result<String, SystemError> {
        from_sysinfo("kernel_version", System::kernel_version())
    }

    fn architecture(&self) -> Result<String, SystemError> {
        Ok(std::env::consts::ARCH.to_string())
    }

    fn hostname(&self) -> Result<String, SystemError> {
        from_sysinfo("host_name", System::host_name())
    }

    fn user_name(&self) -> Result<String, SystemError> {
        std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .ok()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| SystemError::Unavailable("USER".to_string()))
    }
}
