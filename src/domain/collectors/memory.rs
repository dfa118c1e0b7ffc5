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

//! Memory record from /proc/meminfo

use super::{Collector, PlatformContext};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::entities::{Categories, Category, CategoryValue, NOT_AVAILABLE};
use crate::domain::errors::CollectorError;
use crate::domain::parsers::{kib_to_mib, parse_meminfo};

/// Collects the memory record: total RAM and swap in MiB
pub struct Memory;

impl Memory {
    pub const NAME: &'static str = "memory";
}

fn mib_or_na(kib: Option<u64>) -> String {
    kib.map(|kib| kib_to_mib(kib).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl Collector for Memory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn collect(
        &self,
        ctx: &PlatformContext,
        _diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError> {
        let content = ctx.files.read_to_string(&ctx.paths.meminfo)?;
        let info = parse_meminfo(&content);

        let mut c = Category::new("MEMORIES", "memories");
        c.put(
            "DESCRIPTION",
            CategoryValue::new("Memory", "DESCRIPTION", "description"),
        );
        c.put(
            "CAPACITY",
            CategoryValue::new(mib_or_na(info.total_kib), "CAPACITY", "capacity"),
        );
        c.put(
            "SWAP",
            CategoryValue::new(mib_or_na(info.swap_total_kib), "SWAP", "swap"),
        );

        Ok(Categories::from(vec![c]))
    }
}

#[cfg(test)]
mod tests {
    use super::super::run_collector;
    use super::super::testing::{MockFiles, TestContext};
    use super::*;

    #[test]
    fn test_memory_record() {
        let ctx = TestContext::new()
            .files(MockFiles::new().file(
                "/proc/meminfo",
                "MemTotal:        3903488 kB\nMemFree:          120400 kB\n",
            ))
            .build();

        let (categories, _) = run_collector(&Memory, &ctx);
        let memory = &categories.as_slice()[0];
        assert_eq!(memory.type_name(), "MEMORIES");
        assert_eq!(memory.get("DESCRIPTION").unwrap().value(), "Memory");
        assert_eq!(memory.get("CAPACITY").unwrap().value(), "3812");
        assert_eq!(memory.get("SWAP").unwrap().value(), "N/A");
    }

    #[test]
    fn test_unreadable_meminfo_yields_empty_result() {
        let ctx = TestContext::new()
            .files(MockFiles::new().denied("/proc/meminfo"))
            .build();
        let (categories, diagnostics) = run_collector(&Memory, &ctx);
        assert!(categories.is_empty());
        assert!(diagnostics[0].message.contains("Access denied"));
    }
}
