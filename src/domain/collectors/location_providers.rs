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

//! Location provider records

use super::{Collector, PlatformContext};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::entities::{Categories, Category, CategoryValue};
use crate::domain::errors::CollectorError;
use crate::ports::LocationProvider;

/// Collects one record per registered location provider
pub struct LocationProviders;

impl LocationProviders {
    pub const NAME: &'static str = "location_providers";

    pub fn provider_name(&self, provider: &LocationProvider) -> String {
        provider.name.clone()
    }
}

impl Collector for LocationProviders {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn collect(
        &self,
        ctx: &PlatformContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<Categories, CollectorError> {
        let mut categories = Categories::new();

        for name in ctx.location.all_providers()? {
            let Some(provider) = ctx.location.provider(&name)? else {
                diagnostics.degraded(&format!("location.{name}"), "provider not resolvable");
                continue;
            };

            let mut c = Category::new("LOCATION_PROVIDERS", "locationProviders");
            c.put(
                "NAME",
                CategoryValue::new(self.provider_name(&provider), "NAME", "name"),
            );
            categories.add(c);
        }

        Ok(categories)
    }
}
