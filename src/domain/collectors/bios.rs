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

//! BIOS / motherboard record

use super::{attribute_or, platform_value, Collector, PlatformContext};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::entities::{Categories, Category, CategoryValue, NOT_AVAILABLE, UNKNOWN};
use crate::domain::errors::{CollectorError, SystemError};
use crate::domain::fallback::FallbackChain;
use crate::domain::parsers::{parse_cpuinfo_serial, CPUINFO_SERIAL_PLACEHOLDER};
use crate::ports::{PropertyLookup, BUILD_UNKNOWN};

/// System property holding the hardware serial
const SERIAL_PROPERTY: &str = "ro.serialno";

/// Collects the BIOS record: firmware date and version, board vendor,
/// model and serial numbers
pub struct Bios;

impl Bios {
    pub const NAME: &'static str = "bios";

    /// Firmware release date, or "N/A"
    pub fn bios_date(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        attribute_or(ctx, &ctx.paths.dmi("bios_date"), NOT_AVAILABLE, diagnostics)
    }

    /// Firmware version, or "N/A"
    pub fn bios_version(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        attribute_or(ctx, &ctx.paths.dmi("bios_version"), NOT_AVAILABLE, diagnostics)
    }

    /// Board serial, or "N/A"
    pub fn motherboard_serial(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        attribute_or(ctx, &ctx.paths.dmi("board_serial"), NOT_AVAILABLE, diagnostics)
    }

    pub fn manufacturer(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        platform_value("build.manufacturer", ctx.build.manufacturer(), diagnostics)
    }

    pub fn model(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        platform_value("build.model", ctx.build.model(), diagnostics)
    }

    pub fn build_tags(&self, ctx: &PlatformContext, diagnostics: &mut Diagnostics) -> String {
        platform_value("build.tags", ctx.build.tags(), diagnostics)
    }

    /// Resolve the system serial number
    ///
    /// Sources in order: build serial (unless "unknown"), the `Serial` line
    /// of /proc/cpuinfo (unless the all-zero placeholder), the `ro.serialno`
    /// property when a property lookup is available. Falls back to "Unknown".
    pub fn system_serial_number(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let cpuinfo = ctx.paths.cpuinfo.display().to_string();

        FallbackChain::new("SSN", UNKNOWN)
            .attempt_with(
                "build.serial",
                || ctx.build.serial().map(Some),
                |serial| serial != BUILD_UNKNOWN,
            )
            .attempt_with(
                &cpuinfo,
                || self.serial_from_cpuinfo(ctx),
                |serial| !serial.is_empty() && serial != CPUINFO_SERIAL_PLACEHOLDER,
            )
            .attempt_if_some(ctx.properties.as_deref(), SERIAL_PROPERTY, |props| {
                serial_from_property(props)
            })
            .resolve(diagnostics)
            .value
    }

    fn serial_from_cpuinfo(&self, ctx: &PlatformContext) -> Result<Option<String>, SystemError> {
        let content = ctx.files.read_to_string(&ctx.paths.cpuinfo)?;
        Ok(parse_cpuinfo_serial(&content))
    }
}

fn serial_from_property(props: &dyn PropertyLookup) -> Result<Option<String>, SystemError> {
    props.get(SERIAL_PROPERTY)
}

impl Collector for Bios {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn collect(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError> {
        let mut c = Category::new("BIOS", "bios");
        // Board and firmware vendor come from the same build field
        let manufacturer = self.manufacturer(ctx, diagnostics);

        c.put(
            "BDATE",
            CategoryValue::new(self.bios_date(ctx, diagnostics), "BDATE", "biosReleaseDate"),
        );
        c.put(
            "BMANUFACTURER",
            CategoryValue::new(
                manufacturer.clone(),
                "BMANUFACTURER",
                "biosManufacturer",
            ),
        );
        c.put(
            "BVERSION",
            CategoryValue::new(self.bios_version(ctx, diagnostics), "BVERSION", "biosVersion"),
        );
        c.put(
            "MMANUFACTURER",
            CategoryValue::new(manufacturer, "MMANUFACTURER", "motherBoardManufacturer"),
        );
        c.put(
            "SMODEL",
            CategoryValue::new(self.model(ctx, diagnostics), "SMODEL", "motherBoardModel"),
        );
        c.put(
            "SSN",
            CategoryValue::new(
                self.system_serial_number(ctx, diagnostics),
                "SSN",
                "motherBoardSerialNumber",
            ),
        );
        c.put(
            "ASSETTAG",
            CategoryValue::new(self.build_tags(ctx, diagnostics), "ASSETTAG", "assettag"),
        );
        c.put(
            "MSN",
            CategoryValue::new(self.motherboard_serial(ctx, diagnostics), "MSN", "msn"),
        );

        Ok(Categories::from(vec![c]))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{MockBuild, MockFiles, MockProperties, TestContext};
    use super::*;

    fn serial(ctx: &PlatformContext) -> (String, Diagnostics) {
        let mut diagnostics = Diagnostics::new(Bios::NAME);
        let serial = Bios.system_serial_number(ctx, &mut diagnostics);
        (serial, diagnostics)
    }

    #[test]
    fn test_serial_falls_through_to_property_lookup() {
        let ctx = TestContext::new()
            .build_info(MockBuild::handset().with("serial", "unknown"))
            .files(MockFiles::new().file("/proc/cpuinfo", "processor : 0\nSerial : 0000000000000000\n"))
            .properties(MockProperties::with("ro.serialno", "ABC123"))
            .build();

        assert_eq!(serial(&ctx).0, "ABC123");
    }

    #[test]
    fn test_build_serial_short_circuits() {
        let ctx = TestContext::new()
            .build_info(MockBuild::handset().with("serial", "XYZ"))
            .files(MockFiles::new().file("/proc/cpuinfo", "Serial : 00000000deadbeef\n"))
            .properties(MockProperties::with("ro.serialno", "ABC123"))
            .build();

        assert_eq!(serial(&ctx).0, "XYZ");
    }

    #[test]
    fn test_blank_build_serial_is_kept() {
        let ctx = TestContext::new()
            .build_info(MockBuild::handset().with("serial", ""))
            .files(MockFiles::new().file("/proc/cpuinfo", "Serial : 00000000deadbeef\n"))
            .build();

        let (value, diagnostics) = serial(&ctx);
        assert_eq!(value, "");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_cpuinfo_serial_used_when_build_serial_unknown() {
        let ctx = TestContext::new()
            .files(MockFiles::new().file("/proc/cpuinfo", "Hardware : BCM2835\nSerial\t\t: 00000000f1e2d3c4\n"))
            .properties(MockProperties::with("ro.serialno", "ABC123"))
            .build();

        assert_eq!(serial(&ctx).0, "00000000f1e2d3c4");
    }

    #[test]
    fn test_serial_unknown_without_property_lookup() {
        let ctx = TestContext::new()
            .files(MockFiles::new().file("/proc/cpuinfo", "Serial : 0000000000000000\n"))
            .build();

        let (value, diagnostics) = serial(&ctx);
        assert_eq!(value, "Unknown");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_serial_survives_every_source_failing() {
        let ctx = TestContext::new()
            .build_info(MockBuild::new())
            .files(MockFiles::new().denied("/proc/cpuinfo"))
            .properties(MockProperties::failing())
            .build();

        let (value, diagnostics) = serial(&ctx);
        assert_eq!(value, "Unknown");
        let sources: Vec<&str> = diagnostics.entries().iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["build.serial", "/proc/cpuinfo", "ro.serialno"]);
    }

    #[test]
    fn test_collect_bios_record() {
        let ctx = TestContext::new()
            .files(
                MockFiles::new()
                    .file("/sys/devices/virtual/dmi/id/bios_date", "03/14/2019\n")
                    .file("/sys/devices/virtual/dmi/id/bios_version", "G960FXXU2CSB9\n"),
            )
            .build();

        let mut diagnostics = Diagnostics::new(Bios::NAME);
        let categories = Bios.collect(&ctx, &mut diagnostics).unwrap();
        assert_eq!(categories.len(), 1);

        let bios = &categories.as_slice()[0];
        assert_eq!(bios.type_name(), "BIOS");
        assert_eq!(bios.json_name(), "bios");

        let keys: Vec<&str> = bios.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["BDATE", "BMANUFACTURER", "BVERSION", "MMANUFACTURER", "SMODEL", "SSN", "ASSETTAG", "MSN"]
        );

        assert_eq!(bios.get("BDATE").unwrap().value(), "03/14/2019");
        assert_eq!(bios.get("BDATE").unwrap().json_name(), "biosReleaseDate");
        assert_eq!(bios.get("BVERSION").unwrap().value(), "G960FXXU2CSB9");
        assert_eq!(bios.get("BMANUFACTURER").unwrap().value(), "samsung");
        assert_eq!(bios.get("MMANUFACTURER").unwrap().value(), "samsung");
        assert_eq!(bios.get("SMODEL").unwrap().value(), "SM-G960F");
        assert_eq!(bios.get("ASSETTAG").unwrap().value(), "release-keys");
        assert_eq!(bios.get("MSN").unwrap().value(), "N/A");
        assert_eq!(bios.get("SSN").unwrap().value(), "Unknown");
    }

    #[test]
    fn test_missing_build_info_reports_unknown() {
        let ctx = TestContext::new().build_info(MockBuild::new()).build();
        let mut diagnostics = Diagnostics::new(Bios::NAME);
        let categories = Bios.collect(&ctx, &mut diagnostics).unwrap();

        let bios = &categories.as_slice()[0];
        assert_eq!(bios.get("BMANUFACTURER").unwrap().value(), "Unknown");
        assert_eq!(bios.get("SMODEL").unwrap().value(), "Unknown");
        assert_eq!(bios.get("BDATE").unwrap().value(), "N/A");
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn test_missing_manufacturer_is_reported_once() {
        let ctx = TestContext::new().build_info(MockBuild::new()).build();
        let mut diagnostics = Diagnostics::new(Bios::NAME);
        let categories = Bios.collect(&ctx, &mut diagnostics).unwrap();

        let bios = &categories.as_slice()[0];
        assert_eq!(bios.get("MMANUFACTURER").unwrap().value(), "Unknown");
        let count = diagnostics
            .entries()
            .iter()
            .filter(|d| d.source == "build.manufacturer")
            .count();
        assert_eq!(count, 1);
    }
}
