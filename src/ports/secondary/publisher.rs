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

use crate::domain::{Inventory, PublishError, RenderOptions};
use async_trait::async_trait;
use std::path::Path;

/// Secondary port - Inventory output abstraction
///
/// This interface abstracts where rendered inventories are written,
/// allowing for different implementations (files, stdout, in-memory for tests).
#[async_trait]
pub trait InventoryPublisher: Send + Sync {
    /// Render and write an inventory to `path`
    ///
    /// # Returns
    /// * `Ok(())` - Inventory written
    /// * `Err(PublishError)` - Rendering or writing failed
    async fn publish(
        &self,
        inventory: &Inventory,
        options: &RenderOptions,
        path: &Path,
    ) -> Result<(), PublishError>;

    /// Check whether an output file already exists
    async fn exists(&self, path: &Path) -> Result<bool, PublishError>;
}
