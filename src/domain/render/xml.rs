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

//! XML rendering
//!
//! Text is written as stored: values are sanitized of `<` and `>` when
//! they are built, and no further escaping is applied.

use super::INVENTORY_QUERY;
use crate::domain::entities::{Category, CategoryValue, Inventory, ValuePayload};
use crate::domain::errors::RenderError;
use crate::domain::parsers::strip_angle_brackets;
use std::fmt::Write;

struct XmlWriter {
    out: String,
    pretty: bool,
    depth: usize,
}

impl XmlWriter {
    fn new(pretty: bool) -> Self {
        Self {
            out: String::new(),
            pretty,
            depth: 0,
        }
    }

    fn indent(&mut self) -> Result<(), std::fmt::Error> {
        if self.pretty {
            write!(self.out, "{:width$}", "", width = self.depth * 2)?;
        }
        Ok(())
    }

    fn newline(&mut self) -> Result<(), std::fmt::Error> {
        if self.pretty {
            self.out.write_char('\n')?;
        }
        Ok(())
    }

    fn open(&mut self, tag: &str) -> Result<(), std::fmt::Error> {
        self.indent()?;
        write!(self.out, "<{tag}>")?;
        self.newline()?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, tag: &str) -> Result<(), std::fmt::Error> {
        self.depth = self.depth.saturating_sub(1);
        self.indent()?;
        write!(self.out, "</{tag}>")?;
        self.newline()
    }

    fn text_element(&mut self, tag: &str, text: &str, cdata: bool) -> Result<(), std::fmt::Error> {
        self.indent()?;
        if cdata {
            write!(self.out, "<{tag}><![CDATA[{text}]]></{tag}>")?;
        } else {
            write!(self.out, "<{tag}>{text}</{tag}>")?;
        }
        self.newline()
    }

    fn category(&mut self, category: &Category) -> Result<(), std::fmt::Error> {
        self.open(category.type_name())?;
        for (key, value) in category.iter() {
            self.value(key, value)?;
        }
        self.close(category.type_name())
    }

    fn value(&mut self, key: &str, value: &CategoryValue) -> Result<(), std::fmt::Error> {
        let tag = if value.xml_name().is_empty() {
            key
        } else {
            value.xml_name()
        };
        match value.payload() {
            ValuePayload::Scalar(text) => self.text_element(tag, text, value.has_cdata()),
            ValuePayload::List(items) => {
                for item in items {
                    self.text_element(tag, item, value.has_cdata())?;
                }
                Ok(())
            }
            ValuePayload::Nested(inner) => self.category(inner),
        }
    }
}

/// Render an inventory as an XML document
///
/// Private values are kept; CDATA-flagged values are wrapped in CDATA
/// sections and list values repeat their element once per item.
pub fn render_xml(inventory: &Inventory, pretty: bool) -> Result<String, RenderError> {
    let mut writer = XmlWriter::new(pretty);

    writer.out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>");
    writer.newline()?;
    writer.open("REQUEST")?;
    writer.text_element("QUERY", INVENTORY_QUERY, false)?;
    writer.text_element("DEVICEID", &strip_angle_brackets(&inventory.device_id), false)?;
    writer.open("CONTENT")?;
    for category in inventory.categories() {
        writer.category(category)?;
    }
    writer.close("CONTENT")?;
    writer.close("REQUEST")?;

    Ok(writer.out)
}
