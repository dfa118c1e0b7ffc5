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

//! Operating system record with an embedded timezone record

use super::{platform_value, Collector, PlatformContext};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::entities::{Categories, Category, CategoryValue, UNKNOWN};
use crate::domain::errors::CollectorError;
use crate::domain::fallback::FallbackChain;
use crate::domain::parsers::{parse_timezone_file, timezone_from_localtime_target};

/// Collects the operating system record
pub struct OperatingSystem;

impl OperatingSystem {
    pub const NAME: &'static str = "operating_system";

    /// Timezone name: /etc/timezone, then the /etc/localtime link target,
    /// then `TZ`, else "Unknown"
    pub fn timezone(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        self.timezone_with_env(ctx, diagnostics, || std::env::var("TZ").ok())
    }

    fn timezone_with_env(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
        tz_env: impl FnOnce() -> Option<String>,
    ) -> String {
        let timezone_file = ctx.paths.etc_dir.join("timezone");
        let localtime = ctx.paths.etc_dir.join("localtime");
        let timezone_source = timezone_file.display().to_string();
        let localtime_source = localtime.display().to_string();

        FallbackChain::new("TIMEZONE", UNKNOWN)
            .attempt(&timezone_source, || {
                ctx.files.find_line(&timezone_file, &parse_timezone_file)
            })
            .attempt(&localtime_source, || {
                let target = ctx.files.read_link(&localtime)?;
                Ok(timezone_from_localtime_target(&target.to_string_lossy()))
            })
            .attempt("TZ", || Ok(tz_env().filter(|tz| !tz.trim().is_empty())))
            .resolve(diagnostics)
            .value
    }
}

impl Collector for OperatingSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn collect(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError> {
        let build = &ctx.build;
        let mut c = Category::new("OPERATINGSYSTEM", "operatingSystem");

        let fields = [
            ("NAME", "name", "build.os_name", build.os_name()),
            ("VERSION", "version", "build.os_version", build.os_version()),
            ("KERNEL_NAME", "kernelName", "build.kernel_name", build.kernel_name()),
            ("KERNEL_VERSION", "kernelVersion", "build.kernel_version", build.kernel_version()),
            ("ARCH", "arch", "build.architecture", build.architecture()),
            ("FQDN", "fqdn", "build.hostname", build.hostname()),
        ];
        for (key, json_name, source, result) in fields {
            c.put(
                key,
                CategoryValue::new(platform_value(source, result, diagnostics), key, json_name),
            );
        }

        let mut timezone = Category::new("TIMEZONE", "timezone");
        timezone.put(
            "NAME",
            CategoryValue::new(self.timezone(ctx, diagnostics), "NAME", "name"),
        );
        c.put("TIMEZONE", CategoryValue::nested(timezone));

        Ok(Categories::from(vec![c]))
    }
}
