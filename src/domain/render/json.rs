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

//! JSON rendering

use super::INVENTORY_QUERY;
use crate::domain::entities::{Category, Inventory, ValuePayload};
use crate::domain::errors::RenderError;
use serde_json::{json, Map, Value};

/// Convert one record to a JSON object keyed by json names
///
/// Private values are left out unless `include_private` is set.
pub fn category_to_json(category: &Category, include_private: bool) -> Value {
    let mut object = Map::new();
    for (key, value) in category.iter() {
        if value.is_private() && !include_private {
            continue;
        }
        let name = if value.json_name().is_empty() {
            key
        } else {
            value.json_name()
        };
        let rendered = match value.payload() {
            ValuePayload::Scalar(s) => Value::String(s.clone()),
            ValuePayload::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            ValuePayload::Nested(inner) => category_to_json(inner, include_private),
        };
        object.insert(name.to_string(), rendered);
    }
    Value::Object(object)
}

/// Build the JSON document of an inventory
///
/// Records are grouped under their json collection name; groups appear in
/// the order their first record was emitted.
pub fn to_json_value(inventory: &Inventory, include_private: bool) -> Value {
    let mut content = Map::new();
    for category in inventory.categories() {
        let entry = content
            .entry(category.json_name().to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(records) = entry {
            records.push(category_to_json(category, include_private));
        }
    }

    json!({
        "request": {
            "deviceId": inventory.device_id,
            "query": INVENTORY_QUERY,
            "content": Value::Object(content),
        }
    })
}

/// Render an inventory as a JSON document
pub fn render_json(
    inventory: &Inventory,
    include_private: bool,
    pretty: bool,
) -> Result<String, RenderError> {
    let value = to_json_value(inventory, include_private);
    let rendered = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_document_layout() {
        let value = to_json_value(&fixtures::inventory(), false);
        let request = &value["request"];
        assert_eq!(request["deviceId"], "pixel-2026-10-16");
        assert_eq!(request["query"], "INVENTORY");

        let content = &request["content"];
        assert_eq!(content["bios"][0]["biosReleaseDate"], "03/14/2019");
        assert_eq!(content["cpus"][0]["flags"], json!(["fp", "asimd"]));
        assert_eq!(content["operatingSystem"][0]["timezone"]["name"], "UTC");
    }

    #[test]
    fn test_private_values_redacted() {
        let value = to_json_value(&fixtures::inventory(), false);
        let hardware = &value["request"]["content"]["hardware"][0];
        assert_eq!(hardware["name"], "pixel");
        assert!(hardware.get("userid").is_none());

        let value = to_json_value(&fixtures::inventory(), true);
        assert_eq!(value["request"]["content"]["hardware"][0]["userid"], "u0_a1 & co");
    }

    #[test]
    fn test_group_and_field_order_follow_emission() {
        let rendered = render_json(&fixtures::inventory(), false, false).unwrap();
        let hardware = rendered.find("\"hardware\"").unwrap();
        let bios = rendered.find("\"bios\"").unwrap();
        let cpus = rendered.find("\"cpus\"").unwrap();
        assert!(hardware < bios && bios < cpus);

        let date = rendered.find("biosReleaseDate").unwrap();
        let serial = rendered.find("motherBoardSerialNumber").unwrap();
        assert!(date < serial);
    }

    #[test]
    fn test_empty_sections_add_no_group() {
        let value = to_json_value(&fixtures::inventory(), false);
        assert!(value["request"]["content"].get("locationProviders").is_none());
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let rendered = render_json(&fixtures::inventory(), false, true).unwrap();
        assert!(rendered.contains("\n  \"request\""));
    }
}
