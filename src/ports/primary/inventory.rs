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

use crate::domain::{Diagnostic, Inventory, InventorySection};

/// Primary port - Main interface offered by the inventory domain
///
/// This is what external systems (CLI, library consumers) use to collect
/// device inventories. Collection never fails: unavailable sources show up
/// as sentinel values and diagnostics.
pub trait InventoryService: Send + Sync {
    /// Run every enabled collector and assemble the inventory
    fn collect_inventory(&self) -> Inventory;

    /// Run a single collector by name
    ///
    /// # Returns
    /// * `Some((InventorySection, Vec<Diagnostic>))` - Records of the
    ///   collector (possibly empty) and the diagnostics of the run
    /// * `None` - No collector with that name is registered
    fn collect_section(&self, collector: &str) -> Option<(InventorySection, Vec<Diagnostic>)>;

    /// Names of the enabled collectors, in run order
    fn collector_names(&self) -> Vec<&'static str>;
}
