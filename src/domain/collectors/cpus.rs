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

//! Processor records from /proc/cpuinfo

use super::{read_attribute, Collector, PlatformContext};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::entities::{Categories, Category, CategoryValue, NOT_AVAILABLE, UNKNOWN};
use crate::domain::errors::{CollectorError, SystemError};
use crate::domain::fallback::FallbackChain;
use crate::domain::parsers::{parse_cpuinfo_processors, ProcessorEntry};

/// Collects one record per logical processor
pub struct Cpus;

impl Cpus {
    pub const NAME: &'static str = "cpus";

    /// Platform architecture, falling back to the architecture this crate was
    /// built for
    pub fn architecture(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        FallbackChain::new("ARCH", UNKNOWN)
            .attempt("build.architecture", || ctx.build.architecture().map(Some))
            .attempt("target", || Ok(Some(std::env::consts::ARCH.to_string())))
            .resolve(diagnostics)
            .value
    }

    /// Clock speed in MHz: `cpu MHz`, else the cpufreq maximum, else "N/A"
    pub fn speed(
        &self,
        ctx: &PlatformContext,
        processor: &ProcessorEntry,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let max_freq = ctx
            .paths
            .cpufreq_dir
            .join(format!("cpu{}", processor.index))
            .join("cpufreq/cpuinfo_max_freq");
        let max_freq_source = max_freq.display().to_string();

        FallbackChain::new("SPEED", NOT_AVAILABLE)
            .attempt("cpu MHz", || Ok(processor.mhz.map(|mhz| mhz.to_string())))
            .attempt(&max_freq_source, || {
                let khz = read_attribute(ctx.files.as_ref(), &max_freq)?;
                khz.map(|khz| {
                    khz.parse::<u64>()
                        .map(|khz| (khz / 1000).to_string())
                        .map_err(|_| SystemError::ParseError(format!("cpufreq value '{khz}'")))
                })
                .transpose()
            })
            .resolve(diagnostics)
            .value
    }
}

impl Collector for Cpus {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn collect(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError> {
        let content = ctx.files.read_to_string(&ctx.paths.cpuinfo)?;
        let processors = parse_cpuinfo_processors(&content).map_err(CollectorError::MalformedData)?;
        let arch = self.architecture(ctx, diagnostics);

        let mut categories = Categories::new();
        for processor in &processors {
            let mut c = Category::new("CPUS", "cpus");

            c.put(
                "NAME",
                CategoryValue::new(processor.model.as_deref().unwrap_or(UNKNOWN), "NAME", "name"),
            );
            c.put("ARCH", CategoryValue::new(&arch, "ARCH", "arch"));
            c.put(
                "CORE",
                CategoryValue::new(processor.index.to_string(), "CORE", "core"),
            );
            c.put(
                "SPEED",
                CategoryValue::new(self.speed(ctx, processor, diagnostics), "SPEED", "speed"),
            );
            c.put(
                "MANUFACTURER",
                CategoryValue::new(
                    processor.vendor.as_deref().unwrap_or(UNKNOWN),
                    "MANUFACTURER",
                    "manufacturer",
                ),
            );
            c.put("FLAGS", CategoryValue::list(&processor.flags, "FLAGS", "flags"));

            categories.add(c);
        }

        Ok(categories)
    }
}
