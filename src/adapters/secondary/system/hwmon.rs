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

//! Sensor registry backed by the hwmon sysfs class

use crate::domain::parsers::parse_sysfs_value;
use crate::domain::SystemError;
use crate::ports::{FileSource, SensorDescriptor, SensorService};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Sensor type reported for hwmon chips
pub const HWMON_KIND: &str = "hwmon";

/// Lists the chips under `/sys/class/hwmon`
pub struct HwmonSensorService {
    files: Arc<dyn FileSource>,
    hwmon_dir: PathBuf,
}

impl HwmonSensorService {
    pub fn new(files: Arc<dyn FileSource>, hwmon_dir: &Path) -> Self {
        Self {
            files,
            hwmon_dir: hwmon_dir.to_path_buf(),
        }
    }

    /// Optional attribute of a chip; unreadable attributes are empty
    fn attribute(&self, chip: &Path, relative: &str) -> String {
        let path = chip.join(relative);
        match self.files.read_to_string(&path) {
            Ok(raw) => parse_sysfs_value(&raw).unwrap_or_default(),
            Err(err) => {
                log::trace!("{}: {err}", path.display());
                String::new()
            }
        }
    }

    fn describe(&self, chip: &Path) -> SensorDescriptor {
        let mut name = self.attribute(chip, "name");
        if name.is_empty() {
            name = chip
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
        }
        SensorDescriptor {
            name,
            vendor: self.attribute(chip, "device/vendor"),
            kind: HWMON_KIND.to_string(),
            version: self.attribute(chip, "device/revision"),
        }
    }
}

impl SensorService for HwmonSensorService {
    fn sensors(&self) -> Result<Vec<SensorDescriptor>, SystemError> {
        let chips = self.files.list_dir(&self.hwmon_dir)?;
        Ok(chips.iter().map(|chip| self.describe(chip)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalFileSource;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lists_chips_in_order() {
        let dir = tempdir().unwrap();
        let hwmon0 = dir.path().join("hwmon0");
        let hwmon1 = dir.path().join("hwmon1");
        fs::create_dir_all(hwmon0.join("device")).unwrap();
        fs::create_dir_all(&hwmon1).unwrap();
        fs::write(hwmon0.join("name"), "coretemp\n").unwrap();
        fs::write(hwmon0.join("device/vendor"), "0x8086\n").unwrap();
        fs::write(hwmon0.join("device/revision"), "0x02\n").unwrap();

        let service = HwmonSensorService::new(Arc::new(LocalFileSource::new()), dir.path());
        let sensors = service.sensors().unwrap();

        assert_eq!(sensors.len(), 2);
        assert_eq!(
            sensors[0],
            SensorDescriptor {
                name: "coretemp".to_string(),
                vendor: "0x8086".to_string(),
                kind: HWMON_KIND.to_string(),
                version: "0x02".to_string(),
            }
        );
        assert_eq!(sensors[1].name, "hwmon1");
        assert_eq!(sensors[1].vendor, "");
    }

    #[test]
    fn test_missing_class_directory_fails() {
        let dir = tempdir().unwrap();
        let service = HwmonSensorService::new(
            Arc::new(LocalFileSource::new()),
            &dir.path().join("absent"),
        );
        assert!(matches!(service.sensors(), Err(SystemError::NotFound(_))));
    }
}
