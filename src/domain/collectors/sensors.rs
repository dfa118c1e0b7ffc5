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

//! Sensor records

use super::{Collector, PlatformContext};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::entities::{Categories, Category, CategoryValue, UNKNOWN};
use crate::domain::errors::CollectorError;

/// Collects one record per hardware sensor
pub struct Sensors;

impl Sensors {
    pub const NAME: &'static str = "sensors";
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN
    } else {
        value
    }
}

impl Collector for Sensors {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn collect(
        &self,
        ctx: &PlatformContext,
        _diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError> {
        let mut categories = Categories::new();

        for sensor in ctx.sensors.sensors()? {
            let mut c = Category::new("SENSORS", "sensors");
            c.put("NAME", CategoryValue::new(or_unknown(&sensor.name), "NAME", "name"));
            c.put(
                "MANUFACTURER",
                CategoryValue::new(or_unknown(&sensor.vendor), "MANUFACTURER", "manufacturer"),
            );
            c.put("TYPE", CategoryValue::new(or_unknown(&sensor.kind), "TYPE", "type"));
            c.put(
                "VERSION",
                CategoryValue::new(or_unknown(&sensor.version), "VERSION", "version"),
            );
            categories.add(c);
        }

        Ok(categories)
    }
}
