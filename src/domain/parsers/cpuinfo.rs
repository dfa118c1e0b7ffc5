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

//! /proc/cpuinfo parsing functions

use super::common::{clean_value, parse_key_value};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Serial reported by boards that do not expose a real one
pub const CPUINFO_SERIAL_PLACEHOLDER: &str = "0000000000000000";

lazy_static! {
    static ref CPU_MHZ_RE: Regex = Regex::new(r"^(\d+)(?:\.\d+)?$").unwrap();
}

/// One `processor` block of /proc/cpuinfo
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessorEntry {
    /// Value of the `processor` key
    pub index: u32,
    /// Model name (`model name`, `Processor` or `Hardware`)
    pub model: Option<String>,
    /// Vendor (`vendor_id`, or decoded `CPU implementer`)
    pub vendor: Option<String>,
    /// Current clock in MHz (`cpu MHz`)
    pub mhz: Option<u32>,
    /// Feature flags (`flags` or `Features`)
    pub flags: Vec<String>,
}

/// Extract the serial number from /proc/cpuinfo content
///
/// The last line starting with `Serial` wins. Lines without a `:` are
/// skipped as malformed.
///
/// # Returns
/// * `Some(String)` - Trimmed value of the last `Serial` line
/// * `None` - No usable `Serial` line
pub fn parse_cpuinfo_serial(content: &str) -> Option<String> {
    let mut serial = None;
    for line in content.lines() {
        if line.starts_with("Serial") {
            log::debug!("cpuinfo serial line: {line}");
            if let Some((_, value)) = line.split_once(':') {
                serial = Some(value.trim().to_string());
            }
        }
    }
    serial
}

/// Parse every processor entry of /proc/cpuinfo
///
/// The file is read line by line and every `processor` key starts a new
/// entry. Consecutive `processor` lines with nothing between them form a
/// group that shares the keys that follow (older arm64 kernels). Keys found
/// outside any entry (e.g. `Processor` or `Hardware` on ARM boards) are
/// shared fallbacks for every entry.
///
/// # Returns
/// * `Ok(Vec<ProcessorEntry>)` - Processors in file order
/// * `Err(String)` - Content has no processor entry
pub fn parse_cpuinfo_processors(content: &str) -> Result<Vec<ProcessorEntry>, String> {
    let mut blocks: Vec<HashMap<String, String>> = Vec::new();
    let mut global: HashMap<String, String> = HashMap::new();
    // Entries receiving the keys of the current block
    let mut group: Vec<usize> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            group.clear();
            continue;
        }
        let Ok((key, value)) = parse_key_value(line, ':') else {
            continue;
        };

        if key == "processor" {
            let extends_group = group
                .last()
                .is_some_and(|&last| blocks[last].len() == 1);
            if !extends_group {
                group.clear();
            }
            let mut fields = HashMap::new();
            fields.insert(key, value);
            blocks.push(fields);
            group.push(blocks.len() - 1);
        } else if group.is_empty() {
            global.entry(key).or_insert(value);
        } else {
            for &entry in &group {
                blocks[entry]
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
    }

    if blocks.is_empty() {
        return Err("No processor entries found in cpuinfo".to_string());
    }

    let lookup = |fields: &HashMap<String, String>, keys: &[&str]| -> Option<String> {
        keys.iter()
            .find_map(|key| fields.get(*key).or_else(|| global.get(*key)))
            .map(|v| clean_value(v))
            .filter(|v| !v.is_empty())
    };

    let processors = blocks
        .iter()
        .enumerate()
        .map(|(position, fields)| {
            let index = fields
                .get("processor")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(position as u32);

            let vendor = lookup(fields, &["vendor_id"]).or_else(|| {
                lookup(fields, &["CPU implementer"]).map(|code| implementer_name(&code))
            });

            let mhz = fields
                .get("cpu MHz")
                .and_then(|v| CPU_MHZ_RE.captures(v.trim()))
                .and_then(|c| c[1].parse::<u32>().ok());

            let flags = lookup(fields, &["flags", "Features"])
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();

            ProcessorEntry {
                index,
                model: lookup(fields, &["model name", "Processor", "Hardware"]),
                vendor,
                mhz,
                flags,
            }
        })
        .collect();

    Ok(processors)
}

/// Map an ARM `CPU implementer` code to a vendor name
pub fn implementer_name(code: &str) -> String {
    let normalized = code.trim().to_lowercase();
    let name = match normalized.as_str() {
        "0x41" => "ARM",
        "0x42" => "Broadcom",
        "0x43" => "Cavium",
        "0x48" => "HiSilicon",
        "0x4e" => "NVIDIA",
        "0x51" => "Qualcomm",
        "0x53" => "Samsung",
        "0x61" => "Apple",
        "0x69" => "Intel",
        _ => return code.trim().to_string(),
    };
    name.to_string()
}
