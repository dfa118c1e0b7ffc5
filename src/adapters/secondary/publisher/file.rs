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

//! File-based publisher for saving rendered inventories to local files

use crate::domain::{render, Inventory, OutputFormat, PublishError, RenderOptions};
use crate::ports::InventoryPublisher;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Publisher writing rendered inventories to the local filesystem
pub struct FileInventoryPublisher;

impl FileInventoryPublisher {
    /// Create a new file inventory publisher
    pub fn new() -> Self {
        Self
    }

    /// Save an inventory as both JSON and XML
    ///
    /// # Arguments
    /// * `inventory` - The inventory to save
    /// * `options` - Render options; the format field is ignored
    /// * `base_path` - Base path without extension (e.g., "/path/to/inventory")
    ///
    /// # Returns
    /// * `Ok((json_path, xml_path))` - Paths to the saved files
    /// * `Err(PublishError)` - Error occurred during save
    pub async fn publish_both_formats(
        &self,
        inventory: &Inventory,
        options: &RenderOptions,
        base_path: &Path,
    ) -> Result<(PathBuf, PathBuf), PublishError> {
        let json_path = base_path.with_extension("json");
        let xml_path = base_path.with_extension("xml");

        let json_options = RenderOptions {
            format: OutputFormat::Json,
            ..options.clone()
        };
        let xml_options = RenderOptions {
            format: OutputFormat::Xml,
            ..options.clone()
        };

        let (json_res, xml_res) = tokio::join!(
            self.publish(inventory, &json_options, &json_path),
            self.publish(inventory, &xml_options, &xml_path),
        );
        json_res?;
        xml_res?;

        Ok((json_path, xml_path))
    }
}

impl Default for FileInventoryPublisher {
    fn default() -> Self {
        Self::new()
    }
}

fn write_error(path: &Path, source: std::io::Error) -> PublishError {
    PublishError::Write {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl InventoryPublisher for FileInventoryPublisher {
    async fn publish(
        &self,
        inventory: &Inventory,
        options: &RenderOptions,
        path: &Path,
    ) -> Result<(), PublishError> {
        let rendered = render(inventory, options)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(parent, e))?;
        }

        fs::write(path, rendered)
            .await
            .map_err(|e| write_error(path, e))?;

        log::info!("Inventory written to {} as {}", path.display(), options.format);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> Result<bool, PublishError> {
        fs::try_exists(path).await.map_err(|e| write_error(path, e))
    }
}
