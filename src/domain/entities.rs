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

//! Inventory data model: field values, records and per-collector record lists

use super::diagnostics::Diagnostic;
use super::parsers::strip_angle_brackets;
use indexmap::IndexMap;

/// Placeholder for a source that produced nothing
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for a value no source could resolve
pub const UNKNOWN: &str = "Unknown";

/// Payload carried by a [`CategoryValue`]
#[derive(Debug, Clone, PartialEq)]
pub enum ValuePayload {
    /// Single sanitized string
    Scalar(String),
    /// Ordered sanitized strings
    List(Vec<String>),
    /// A whole record embedded as one field
    Nested(Category),
}

/// One field of an inventory record plus its export metadata
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    payload: ValuePayload,
    xml_name: String,
    json_name: String,
    is_private: bool,
    has_cdata: bool,
}

impl CategoryValue {
    /// Create a scalar value
    pub fn new(value: impl AsRef<str>, xml_name: &str, json_name: &str) -> Self {
        Self::with_payload(
            ValuePayload::Scalar(strip_angle_brackets(value.as_ref())),
            xml_name,
            json_name,
        )
    }

    /// Create a scalar value from possibly absent parts
    ///
    /// Absent parts become empty strings.
    pub fn from_parts(value: Option<&str>, xml_name: Option<&str>, json_name: Option<&str>) -> Self {
        Self::new(
            value.unwrap_or_default(),
            xml_name.unwrap_or_default(),
            json_name.unwrap_or_default(),
        )
    }

    /// Create a list value; every element is sanitized
    pub fn list<I, S>(values: I, xml_name: &str, json_name: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values
            .into_iter()
            .map(|v| strip_angle_brackets(v.as_ref()))
            .collect();
        Self::with_payload(ValuePayload::List(values), xml_name, json_name)
    }

    /// Create a list value from possibly absent parts
    pub fn list_from_parts(
        values: Option<Vec<String>>,
        xml_name: Option<&str>,
        json_name: Option<&str>,
    ) -> Self {
        Self::list(
            values.unwrap_or_default(),
            xml_name.unwrap_or_default(),
            json_name.unwrap_or_default(),
        )
    }

    /// Embed a record inside another record
    ///
    /// The export names are taken from the embedded record.
    pub fn nested(category: Category) -> Self {
        let xml_name = category.type_name().to_string();
        let json_name = category.json_name().to_string();
        Self {
            payload: ValuePayload::Nested(category),
            xml_name,
            json_name,
            is_private: false,
            has_cdata: false,
        }
    }

    fn with_payload(payload: ValuePayload, xml_name: &str, json_name: &str) -> Self {
        Self {
            payload,
            xml_name: xml_name.to_string(),
            json_name: json_name.to_string(),
            is_private: false,
            has_cdata: false,
        }
    }

    /// Mark the value as private (redacted from JSON output)
    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Mark the value for CDATA wrapping in XML output
    pub fn cdata(mut self) -> Self {
        self.has_cdata = true;
        self
    }

    pub fn payload(&self) -> &ValuePayload {
        &self.payload
    }

    /// Scalar content, or `""` for list and nested values
    pub fn value(&self) -> &str {
        match &self.payload {
            ValuePayload::Scalar(value) => value,
            _ => "",
        }
    }

    /// List content, or an empty slice for scalar and nested values
    pub fn values(&self) -> &[String] {
        match &self.payload {
            ValuePayload::List(values) => values,
            _ => &[],
        }
    }

    /// Embedded record, if any
    pub fn category(&self) -> Option<&Category> {
        match &self.payload {
            ValuePayload::Nested(category) => Some(category),
            _ => None,
        }
    }

    pub fn xml_name(&self) -> &str {
        &self.xml_name
    }

    pub fn json_name(&self) -> &str {
        &self.json_name
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn has_cdata(&self) -> bool {
        self.has_cdata
    }
}

/// One named inventory record (e.g. all BIOS fields)
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    type_name: String,
    json_name: String,
    fields: IndexMap<String, CategoryValue>,
}

impl Category {
    /// Create an empty record
    ///
    /// # Arguments
    /// * `type_name` - Record type, also the XML element (e.g. "BIOS")
    /// * `json_name` - JSON collection name (e.g. "bios")
    pub fn new(type_name: &str, json_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            json_name: json_name.to_string(),
            fields: IndexMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn json_name(&self) -> &str {
        &self.json_name
    }

    /// Set a field; a repeated key replaces the value in its original position
    pub fn put(&mut self, key: &str, value: CategoryValue) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&CategoryValue> {
        self.fields.get(key)
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered records produced by one collector run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categories {
    entries: Vec<Category>,
}

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping emission order
    pub fn add(&mut self, category: Category) {
        self.entries.push(category);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Categories {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<Vec<Category>> for Categories {
    fn from(entries: Vec<Category>) -> Self {
        Self { entries }
    }
}

/// Result of a single collector run
#[derive(Debug, Clone)]
pub struct InventorySection {
    /// Collector that produced the records
    pub collector: String,
    /// Records in emission order (possibly empty)
    pub categories: Categories,
}

/// Complete inventory of one device (root aggregate)
#[derive(Debug, Clone)]
pub struct Inventory {
    /// Device identifier reported alongside the content
    pub device_id: String,
    /// One section per collector, in run order
    pub sections: Vec<InventorySection>,
    /// Failures recovered while collecting
    pub diagnostics: Vec<Diagnostic>,
}

impl Inventory {
    /// All records across sections, in order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sections.iter().flat_map(|s| s.categories.iter())
    }

    /// Records produced by the named collector
    pub fn section(&self, collector: &str) -> Option<&Categories> {
        self.sections
            .iter()
            .find(|s| s.collector == collector)
            .map(|s| &s.categories)
    }
}
