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

//! /proc/meminfo parsing functions

use super::common::parse_key_value;

/// Totals read from /proc/meminfo
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemInfo {
    /// `MemTotal` in KiB
    pub total_kib: Option<u64>,
    /// `SwapTotal` in KiB
    pub swap_total_kib: Option<u64>,
}

/// Parse the value of one /proc/meminfo key in KiB
///
/// # Arguments
/// * `content` - Raw /proc/meminfo content
/// * `key` - Key to search for (e.g., "MemTotal")
pub fn meminfo_value_kib(content: &str, key: &str) -> Option<u64> {
    content
        .lines()
        .filter_map(|line| parse_key_value(line, ':').ok())
        .find(|(k, _)| k == key)
        .and_then(|(_, value)| value.split_whitespace().next()?.parse::<u64>().ok())
}

/// Parse the totals used by the inventory
pub fn parse_meminfo(content: &str) -> MemInfo {
    MemInfo {
        total_kib: meminfo_value_kib(content, "MemTotal"),
        swap_total_kib: meminfo_value_kib(content, "SwapTotal"),
    }
}
