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

//! In-memory platform doubles for collector tests

use super::PlatformContext;
use crate::domain::{SourcePaths, SystemError};
use crate::ports::{
    BuildInfoProvider, FileSource, LocationProvider, LocationService, PropertyLookup,
    SensorDescriptor, SensorService, BUILD_UNKNOWN,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Fake filesystem keyed by absolute path
#[derive(Default)]
pub struct MockFiles {
    files: HashMap<PathBuf, String>,
    links: HashMap<PathBuf, PathBuf>,
    denied: Vec<PathBuf>,
}

impl MockFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn link(mut self, path: &str, target: &str) -> Self {
        self.links.insert(PathBuf::from(path), PathBuf::from(target));
        self
    }

    pub fn denied(mut self, path: &str) -> Self {
        self.denied.push(PathBuf::from(path));
        self
    }

    fn check(&self, path: &Path) -> Result<(), SystemError> {
        if self.denied.iter().any(|p| p == path) {
            return Err(SystemError::PermissionDenied(path.display().to_string()));
        }
        Ok(())
    }
}

impl FileSource for MockFiles {
    fn read_to_string(&self, path: &Path) -> Result<String, SystemError> {
        self.check(path)?;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SystemError::NotFound(path.display().to_string()))
    }

    fn find_line(
        &self,
        path: &Path,
        predicate: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Option<String>, SystemError> {
        Ok(self.read_to_string(path)?.lines().find_map(predicate))
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf, SystemError> {
        self.check(path)?;
        self.links
            .get(path)
            .cloned()
            .ok_or_else(|| SystemError::NotFound(path.display().to_string()))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, SystemError> {
        self.check(path)?;
        let mut entries: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        entries.sort();
        Ok(entries)
    }
}

/// Build info with every field settable; unset fields fail
#[derive(Default, Clone)]
pub struct MockBuild {
    pub values: HashMap<&'static str, String>,
}

impl MockBuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// A typical handset with an unknown build serial
    pub fn handset() -> Self {
        Self::new()
            .with("manufacturer", "samsung")
            .with("model", "SM-G960F")
            .with("tags", "release-keys")
            .with("serial", BUILD_UNKNOWN)
            .with("os_name", "Android")
            .with("os_version", "10")
            .with("kernel_name", "Linux")
            .with("kernel_version", "4.9.118")
            .with("architecture", "aarch64")
            .with("hostname", "localhost")
            .with("user_name", "u0_a123")
    }

    pub fn with(mut self, field: &'static str, value: &str) -> Self {
        self.values.insert(field, value.to_string());
        self
    }

    fn get(&self, field: &str) -> Result<String, SystemError> {
        self.values
            .get(field)
            .cloned()
            .ok_or_else(|| SystemError::Unavailable(format!("build.{field}")))
    }
}

impl BuildInfoProvider for MockBuild {
    fn manufacturer(&self) -> Result<String, SystemError> {
        self.get("manufacturer")
    }
    fn model(&self) -> Result<String, SystemError> {
        self.get("model")
    }
    fn tags(&self) -> Result<String, SystemError> {
        self.get("tags")
    }
    fn serial(&self) -> Result<String, SystemError> {
        self.get("serial")
    }
    fn os_name(&self) -> Result<String, SystemError> {
        self.get("os_name")
    }
    fn os_version(&self) -> Result<String, SystemError> {
        self.get("os_version")
    }
    fn kernel_name(&self) -> Result<String, SystemError> {
        self.get("kernel_name")
    }
    fn kernel_version(&self) -> Result<String, SystemError> {
        self.get("kernel_version")
    }
    fn architecture(&self) -> Result<String, SystemError> {
        self.get("architecture")
    }
    fn hostname(&self) -> Result<String, SystemError> {
        self.get("hostname")
    }
    fn user_name(&self) -> Result<String, SystemError> {
        self.get("user_name")
    }
}

/// Property lookup backed by a map; `failing` makes every lookup fail
#[derive(Default)]
pub struct MockProperties {
    values: HashMap<String, String>,
    failing: bool,
}

impl MockProperties {
    pub fn with(key: &str, value: &str) -> Self {
        let mut props = Self::default();
        props.values.insert(key.to_string(), value.to_string());
        props
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

impl PropertyLookup for MockProperties {
    fn get(&self, key: &str) -> Result<Option<String>, SystemError> {
        if self.failing {
            return Err(SystemError::PermissionDenied(key.to_string()));
        }
        Ok(self.values.get(key).cloned())
    }
}

/// Location service with a fixed provider list
#[derive(Default)]
pub struct MockLocation {
    providers: Vec<String>,
    unresolvable: Vec<String>,
    failing: bool,
}

impl MockLocation {
    pub fn with_providers(names: &[&str]) -> Self {
        Self {
            providers: names.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn unresolvable(mut self, name: &str) -> Self {
        self.unresolvable.push(name.to_string());
        self
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

impl LocationService for MockLocation {
    fn all_providers(&self) -> Result<Vec<String>, SystemError> {
        if self.failing {
            return Err(SystemError::Unavailable("location".to_string()));
        }
        Ok(self.providers.clone())
    }

    fn provider(&self, name: &str) -> Result<Option<LocationProvider>, SystemError> {
        if self.unresolvable.iter().any(|n| n == name) {
            return Ok(None);
        }
        Ok(Some(LocationProvider {
            name: name.to_string(),
        }))
    }
}

/// Sensor registry with a fixed sensor list
#[derive(Default)]
pub struct MockSensors {
    sensors: Vec<SensorDescriptor>,
    failing: bool,
}

impl MockSensors {
    pub fn with(sensors: Vec<SensorDescriptor>) -> Self {
        Self {
            sensors,
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

impl SensorService for MockSensors {
    fn sensors(&self) -> Result<Vec<SensorDescriptor>, SystemError> {
        if self.failing {
            return Err(SystemError::Unavailable("sensors".to_string()));
        }
        Ok(self.sensors.clone())
    }
}

/// Builder for a [`PlatformContext`] made of doubles
pub struct TestContext {
    files: MockFiles,
    build: MockBuild,
    properties: Option<MockProperties>,
    location: MockLocation,
    sensors: MockSensors,
    paths: SourcePaths,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            files: MockFiles::new(),
            build: MockBuild::handset(),
            properties: None,
            location: MockLocation::default(),
            sensors: MockSensors::default(),
            paths: SourcePaths::default(),
        }
    }

    pub fn files(mut self, files: MockFiles) -> Self {
        self.files = files;
        self
    }

    pub fn build_info(mut self, build: MockBuild) -> Self {
        self.build = build;
        self
    }

    pub fn properties(mut self, properties: MockProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn location(mut self, location: MockLocation) -> Self {
        self.location = location;
        self
    }

    pub fn sensors(mut self, sensors: MockSensors) -> Self {
        self.sensors = sensors;
        self
    }

    pub fn build(self) -> PlatformContext {
        PlatformContext {
            files: Arc::new(self.files),
            build: Arc::new(self.build),
            properties: self
                .properties
                .map(|p| Arc::new(p) as Arc<dyn PropertyLookup>),
            location: Arc::new(self.location),
            sensors: Arc::new(self.sensors),
            paths: self.paths,
        }
    }
}
