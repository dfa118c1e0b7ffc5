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

use crate::domain::collectors::{collector_by_name, run_collector, Collector, PlatformContext};
use crate::domain::{Diagnostic, Inventory, InventoryConfig, InventorySection, UNKNOWN};
use crate::ports::InventoryService;

/// Domain service that implements inventory collection
///
/// This service runs the enabled collectors against a platform context and
/// aggregates their records into a complete inventory. Collector failures
/// never escape: they end up as empty sections plus diagnostics.
pub struct InventoryCollectionService {
    /// Platform collaborators shared by every collector
    context: PlatformContext,
    /// Enabled collectors, in run order
    collectors: Vec<Box<dyn Collector>>,
    /// Device identifier override
    device_id: Option<String>,
}

impl InventoryCollectionService {
    /// Create a new inventory collection service
    ///
    /// # Arguments
    /// * `context` - Platform collaborators handed to every collector
    /// * `config` - Enabled collectors and device id override
    pub fn new(context: PlatformContext, config: &InventoryConfig) -> Self {
        let collectors = config
            .collectors
            .iter()
            .filter_map(|name| {
                let collector = collector_by_name(name);
                if collector.is_none() {
                    log::warn!("Skipping unknown collector '{name}'");
                }
                collector
            })
            .collect();

        Self {
            context,
            collectors,
            device_id: config.device_id.clone(),
        }
    }

    fn run(&self, collector: &dyn Collector) -> (InventorySection, Vec<Diagnostic>) {
        log::debug!("Running collector {}", collector.name());
        let (categories, diagnostics) = run_collector(collector, &self.context);
        log::debug!(
            "Collector {} produced {} record(s), {} diagnostic(s)",
            collector.name(),
            categories.len(),
            diagnostics.len()
        );
        let section = InventorySection {
            collector: collector.name().to_string(),
            categories,
        };
        (section, diagnostics)
    }

    /// Resolve the device identifier: override, then host name, then `Unknown`
    fn resolve_device_id(&self) -> String {
        if let Some(id) = self.device_id.as_deref().filter(|id| !id.trim().is_empty()) {
            return id.to_string();
        }
        match self.context.build.hostname() {
            Ok(hostname) if !hostname.trim().is_empty() => hostname,
            Ok(_) => UNKNOWN.to_string(),
            Err(err) => {
                log::warn!("Device id falls back to {UNKNOWN}: {err}");
                UNKNOWN.to_string()
            }
        }
    }
}

impl InventoryService for InventoryCollectionService {
    fn collect_inventory(&self) -> Inventory {
        let mut sections = Vec::with_capacity(self.collectors.len());
        let mut diagnostics = Vec::new();

        for collector in &self.collectors {
            let (section, entries) = self.run(collector.as_ref());
            sections.push(section);
            diagnostics.extend(entries);
        }

        let inventory = Inventory {
            device_id: self.resolve_device_id(),
            sections,
            diagnostics,
        };
        log::info!(
            "Collected {} record(s) from {} collector(s) with {} diagnostic(s)",
            inventory.categories().count(),
            inventory.sections.len(),
            inventory.diagnostics.len()
        );
        inventory
    }

    fn collect_section(&self, collector: &str) -> Option<(InventorySection, Vec<Diagnostic>)> {
        let collector = collector_by_name(collector)?;
        Some(self.run(collector.as_ref()))
    }

    fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collectors::testing::{
        MockBuild, MockFiles, MockLocation, MockSensors, TestContext,
    };
    use crate::domain::{InventoryConfigBuilder, Severity, COLLECTOR_NAMES};

    fn cpuinfo() -> &'static str {
        "processor\t: 0\nmodel name\t: ARMv8 Processor\nFeatures\t: fp asimd\nSerial\t\t: 0000000000000000\n"
    }

    #[test]
    fn test_collects_every_enabled_collector_in_order() {
        let ctx = TestContext::new()
            .files(MockFiles::new().file("/proc/cpuinfo", cpuinfo()))
            .location(MockLocation::with_providers(&["gps", "network"]))
            .build();
        let service = InventoryCollectionService::new(ctx, &InventoryConfig::default());

        assert_eq!(service.collector_names(), COLLECTOR_NAMES.to_vec());

        let inventory = service.collect_inventory();
        let names: Vec<&str> = inventory.sections.iter().map(|s| s.collector.as_str()).collect();
        assert_eq!(names, COLLECTOR_NAMES.to_vec());
        assert_eq!(inventory.section("location_providers").unwrap().len(), 2);
        assert_eq!(inventory.section("cpus").unwrap().len(), 1);
        assert_eq!(inventory.device_id, "localhost");
    }

    #[test]
    fn test_failing_services_leave_empty_sections() {
        let ctx = TestContext::new()
            .location(MockLocation::failing())
            .sensors(MockSensors::failing())
            .build();
        let config = InventoryConfigBuilder::new()
            .collectors(&["sensors", "location_providers"])
            .build();
        let inventory = InventoryCollectionService::new(ctx, &config).collect_inventory();

        assert_eq!(inventory.sections.len(), 2);
        assert!(inventory.sections.iter().all(|s| s.categories.is_empty()));
        let failed: Vec<&str> = inventory
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::CollectorFailed)
            .map(|d| d.collector.as_str())
            .collect();
        assert_eq!(failed, vec!["sensors", "location_providers"]);
    }

    #[test]
    fn test_device_id_resolution() {
        let config = InventoryConfigBuilder::new()
            .collectors(&[])
            .device_id("lab-phone-7")
            .build();
        let service = InventoryCollectionService::new(TestContext::new().build(), &config);
        assert_eq!(service.collect_inventory().device_id, "lab-phone-7");

        let config = InventoryConfigBuilder::new().collectors(&[]).build();
        let ctx = TestContext::new().build_info(MockBuild::new()).build();
        let service = InventoryCollectionService::new(ctx, &config);
        assert_eq!(service.collect_inventory().device_id, UNKNOWN);
    }

    #[test]
    fn test_collect_single_section() {
        let ctx = TestContext::new()
            .location(MockLocation::with_providers(&["passive"]))
            .build();
        let service = InventoryCollectionService::new(ctx, &InventoryConfig::default());

        let (section, diagnostics) = service.collect_section("location_providers").unwrap();
        assert_eq!(section.categories.len(), 1);
        assert!(diagnostics.is_empty());
        assert!(service.collect_section("modem").is_none());
    }

    #[test]
    fn test_collect_single_section_keeps_diagnostics() {
        let ctx = TestContext::new().sensors(MockSensors::failing()).build();
        let service = InventoryCollectionService::new(ctx, &InventoryConfig::default());

        let (section, diagnostics) = service.collect_section("sensors").unwrap();
        assert!(section.categories.is_empty());
        assert!(diagnostics.iter().all(|d| d.collector == "sensors"));
        assert!(diagnostics
            .iter()
            .any(|d| d.severity == Severity::CollectorFailed));
    }
}
