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

//! Ordered fallback chains over data sources
//!
//! A chain tries its attempts in order. An attempt answers with a value, with
//! nothing, or with an error; errors are recorded as diagnostics and treated
//! as "nothing". The first value that passes the attempt's acceptance check
//! wins. When every attempt comes up empty the chain yields its sentinel.

use super::diagnostics::Diagnostics;
use super::errors::SystemError;

type AttemptFn<'a> = Box<dyn FnOnce() -> Result<Option<String>, SystemError> + 'a>;
type AcceptFn<'a> = Box<dyn Fn(&str) -> bool + 'a>;

struct Attempt<'a> {
    source: String,
    run: AttemptFn<'a>,
    accept: AcceptFn<'a>,
}

/// Value produced by a fallback chain
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: String,
    /// Source that produced the value, `None` when the sentinel was used
    pub source: Option<String>,
}

impl Resolved {
    pub fn is_sentinel(&self) -> bool {
        self.source.is_none()
    }
}

/// Builder for an ordered list of data-source attempts
pub struct FallbackChain<'a> {
    field: String,
    sentinel: String,
    attempts: Vec<Attempt<'a>>,
}

impl<'a> FallbackChain<'a> {
    /// Start a chain for `field` that falls back to `sentinel`
    pub fn new(field: &str, sentinel: &str) -> Self {
        Self {
            field: field.to_string(),
            sentinel: sentinel.to_string(),
            attempts: Vec::new(),
        }
    }

    /// Add an attempt that accepts any non-blank value
    pub fn attempt<F>(self, source: &str, run: F) -> Self
    where
        F: FnOnce() -> Result<Option<String>, SystemError> + 'a,
    {
        self.attempt_with(source, run, |value| !value.trim().is_empty())
    }

    /// Add an attempt with its own acceptance check
    pub fn attempt_with<F, A>(mut self, source: &str, run: F, accept: A) -> Self
    where
        F: FnOnce() -> Result<Option<String>, SystemError> + 'a,
        A: Fn(&str) -> bool + 'a,
    {
        self.attempts.push(Attempt {
            source: source.to_string(),
            run: Box::new(run),
            accept: Box::new(accept),
        });
        self
    }

    /// Add an attempt only when the capability it needs is present
    pub fn attempt_if_some<T, F>(self, capability: Option<T>, source: &str, run: F) -> Self
    where
        T: 'a,
        F: FnOnce(T) -> Result<Option<String>, SystemError> + 'a,
    {
        match capability {
            Some(capability) => self.attempt(source, move || run(capability)),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Run the attempts in order, stopping at the first accepted value
    pub fn resolve(self, diagnostics: &mut Diagnostics) -> Resolved {
        for attempt in self.attempts {
            match (attempt.run)() {
                Ok(Some(value)) if (attempt.accept)(&value) => {
                    diagnostics.resolved(&self.field, &attempt.source);
                    return Resolved {
                        value,
                        source: Some(attempt.source),
                    };
                }
                Ok(Some(value)) => {
                    log::debug!(
                        target: diagnostics.collector(),
                        "{}: rejected {:?} from {}",
                        self.field,
                        value,
                        attempt.source
                    );
                }
                Ok(None) => {}
                Err(err) => diagnostics.degraded(&attempt.source, err),
            }
        }

        Resolved {
            value: self.sentinel,
            source: None,
        }
    }
}
