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

//! Rendering and publishing a collected inventory to files

use assert_fs::prelude::*;
use assert_fs::TempDir;
use device_inventory::{
    create_service, FileInventoryPublisher, Inventory, InventoryConfigBuilder,
    InventoryPublisher, InventoryService, OutputFormat, RenderOptions,
};
use predicates::prelude::*;

fn collect(root: &TempDir) -> Inventory {
    root.child("proc/meminfo")
        .write_str("MemTotal:        4194304 kB\nSwapTotal:             0 kB\n")
        .unwrap();
    root.child("sys/devices/virtual/dmi/id/product_uuid")
        .write_str("0b1c2d3e-aaaa-bbbb-cccc-1234567890ab\n")
        .unwrap();

    let config = InventoryConfigBuilder::new()
        .root(root.path())
        .collectors(&["hardware", "memory", "location_providers"])
        .location_providers(&["gps"])
        .allow_property_lookup(false)
        .device_id("bench-42")
        .build();
    create_service(config).collect_inventory()
}

#[tokio::test]
async fn test_publish_json_redacts_private_values() {
    let root = TempDir::new().unwrap();
    let inventory = collect(&root);
    let output = root.child("out/inventory.json");

    FileInventoryPublisher::new()
        .publish(&inventory, &RenderOptions::default(), output.path())
        .await
        .unwrap();

    output.assert(predicate::str::starts_with(
        r#"{"request":{"deviceId":"bench-42","query":"INVENTORY","content":{"hardware":"#,
    ));
    output.assert(predicate::str::contains(r#""memories":[{"description":"Memory","capacity":"4096","swap":"0"}]"#));
    output.assert(predicate::str::contains(r#""locationProviders":[{"name":"gps"}]"#));
    output.assert(predicate::str::contains("0b1c2d3e").not());
}

#[tokio::test]
async fn test_publish_json_with_private_values() {
    let root = TempDir::new().unwrap();
    let inventory = collect(&root);
    let output = root.child("inventory.json");

    let options = RenderOptions {
        include_private: true,
        pretty: true,
        ..RenderOptions::default()
    };
    FileInventoryPublisher::new()
        .publish(&inventory, &options, output.path())
        .await
        .unwrap();

    output.assert(predicate::str::contains(
        r#""uuid": "0b1c2d3e-aaaa-bbbb-cccc-1234567890ab""#,
    ));
}

#[tokio::test]
async fn test_publish_xml() {
    let root = TempDir::new().unwrap();
    let inventory = collect(&root);
    let output = root.child("inventory.xml");

    let options = RenderOptions {
        format: OutputFormat::Xml,
        ..RenderOptions::default()
    };
    FileInventoryPublisher::new()
        .publish(&inventory, &options, output.path())
        .await
        .unwrap();

    output.assert(predicate::str::starts_with(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?><REQUEST><QUERY>INVENTORY</QUERY><DEVICEID>bench-42</DEVICEID><CONTENT><HARDWARE>",
    ));
    output.assert(predicate::str::contains(
        "<UUID>0b1c2d3e-aaaa-bbbb-cccc-1234567890ab</UUID>",
    ));
    output.assert(predicate::str::contains(
        "<MEMORIES><DESCRIPTION>Memory</DESCRIPTION><CAPACITY>4096</CAPACITY><SWAP>0</SWAP></MEMORIES>",
    ));
    output.assert(predicate::str::contains(
        "<LOCATION_PROVIDERS><NAME>gps</NAME></LOCATION_PROVIDERS></CONTENT></REQUEST>",
    ));
    output.assert(predicate::str::is_match("<USERID><!\\[CDATA\\[.*\\]\\]></USERID>").unwrap());
}
