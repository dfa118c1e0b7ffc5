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

//! Rendering of inventories to XML and JSON documents
//!
//! Renderers walk `Inventory → Categories → Category → CategoryValue` in
//! order and use the export metadata carried by each value.

pub mod json;
pub mod xml;

pub use json::{render_json, to_json_value};
pub use xml::render_xml;

use super::config::OutputFormat;
use super::entities::Inventory;
use super::errors::RenderError;

/// Value of the query element in rendered documents
pub const INVENTORY_QUERY: &str = "INVENTORY";

/// Options applied when an inventory is rendered for output
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Output format
    pub format: OutputFormat,
    /// Keep private values in JSON output
    pub include_private: bool,
    /// Indent the output
    pub pretty: bool,
}

/// Render an inventory in the requested format
pub fn render(inventory: &Inventory, options: &RenderOptions) -> Result<String, RenderError> {
    match options.format {
        OutputFormat::Json => render_json(inventory, options.include_private, options.pretty),
        OutputFormat::Xml => render_xml(inventory, options.pretty),
    }
}
