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

//! Hardware summary record

use super::{attribute_or, platform_value, Collector, PlatformContext};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::entities::{Categories, Category, CategoryValue, NOT_AVAILABLE};
use crate::domain::errors::CollectorError;
use crate::domain::parsers::{kib_to_mib, meminfo_value_kib};

/// Collects the hardware summary: host name, UUID, memory, architecture and
/// the user running the inventory
pub struct Hardware;

impl Hardware {
    pub const NAME: &'static str = "hardware";

    /// Total memory in MiB, or "N/A"
    pub fn memory(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        match ctx.files.read_to_string(&ctx.paths.meminfo) {
            Ok(content) => meminfo_value_kib(&content, "MemTotal")
                .map(|kib| kib_to_mib(kib).to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            Err(err) => {
                diagnostics.degraded(&ctx.paths.meminfo.display().to_string(), err);
                NOT_AVAILABLE.to_string()
            }
        }
    }
}

impl Collector for Hardware {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn collect(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError> {
        let mut c = Category::new("HARDWARE", "hardware");

        c.put(
            "NAME",
            CategoryValue::new(
                platform_value("build.hostname", ctx.build.hostname(), diagnostics),
                "NAME",
                "name",
            ),
        );
        c.put(
            "UUID",
            CategoryValue::new(
                attribute_or(ctx, &ctx.paths.dmi("product_uuid"), NOT_AVAILABLE, diagnostics),
                "UUID",
                "uuid",
            )
            .private(),
        );
        c.put(
            "MEMORY",
            CategoryValue::new(self.memory(ctx, diagnostics), "MEMORY", "memory"),
        );
        c.put(
            "ARCHNAME",
            CategoryValue::new(
                platform_value("build.architecture", ctx.build.architecture(), diagnostics),
                "ARCHNAME",
                "archname",
            ),
        );
        c.put(
            "USERID",
            CategoryValue::new(
                platform_value("build.user_name", ctx.build.user_name(), diagnostics),
                "USERID",
                "userid",
            )
            .private()
            .cdata(),
        );

        Ok(Categories::from(vec![c]))
    }
}
