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

//! Location service listing providers named in the configuration

use crate::domain::SystemError;
use crate::ports::{LocationProvider, LocationService};

/// Location service with a fixed, configured provider list
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocationService {
    providers: Vec<String>,
}

impl ConfiguredLocationService {
    pub fn new(providers: Vec<String>) -> Self {
        Self { providers }
    }
}

impl LocationService for ConfiguredLocationService {
    fn all_providers(&self) -> Result<Vec<String>, SystemError> {
        Ok(self.providers.clone())
    }

    fn provider(&self, name: &str) -> Result<Option<LocationProvider>, SystemError> {
        Ok(self
            .providers
            .iter()
            .find(|p| p.as_str() == name)
            .map(|p| LocationProvider { name: p.clone() }))
    }
}
