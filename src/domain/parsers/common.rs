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

//! Common parsing utilities and helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ANGLE_BRACKETS_RE: Regex = Regex::new(r"[<>]").unwrap();
}

/// Remove every `<` and `>` from a string
///
/// Applied to all text stored in an inventory record. Ampersands and quotes
/// are left untouched.
pub fn strip_angle_brackets(value: &str) -> String {
    if value.contains(['<', '>']) {
        ANGLE_BRACKETS_RE.replace_all(value, "").into_owned()
    } else {
        value.to_string()
    }
}

/// Parse a key-value pair from system output
///
/// # Arguments
/// * `line` - Line to parse (e.g., "model name : Cortex-A53")
/// * `separator` - Separator character (usually ':')
///
/// # Returns
/// * `Ok((String, String))` - Key-value pair
/// * `Err(String)` - Parse error
pub fn parse_key_value(line: &str, separator: char) -> Result<(String, String), String> {
    if let Some(pos) = line.find(separator) {
        let key = line[..pos].trim().to_string();
        let value = line[pos + 1..].trim().to_string();
        Ok((key, value))
    } else {
        Err(format!("No separator '{separator}' found in line: {line}"))
    }
}

/// Clean and normalize a string value
pub fn clean_value(value: &str) -> String {
    value
        .trim()
        .replace("  ", " ") // Replace multiple spaces with single space
        .replace("\t", " ") // Replace tabs with spaces
        .to_string()
}

/// Normalise the content of a sysfs/procfs attribute file
///
/// Returns `None` when the attribute is empty once trailing newlines and
/// NUL padding are removed.
pub fn parse_sysfs_value(raw: &str) -> Option<String> {
    let value = clean_value(raw.trim_end_matches('\0'));
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Convert KiB (as reported by /proc/meminfo) to whole MiB
pub fn kib_to_mib(kib: u64) -> u64 {
    kib / 1024
}
