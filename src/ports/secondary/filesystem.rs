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

use crate::domain::SystemError;
use std::path::{Path, PathBuf};

/// Secondary port - Read access to small system files
///
/// Abstracts the pseudo-files under /proc and /sys so collectors can run
/// against a fake tree in tests.
pub trait FileSource: Send + Sync {
    /// Read a whole file as text
    fn read_to_string(&self, path: &Path) -> Result<String, SystemError>;

    /// Read lines until `predicate` returns a value
    ///
    /// Stops reading as soon as a line matches; the handle is released on
    /// every path.
    fn find_line(
        &self,
        path: &Path,
        predicate: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Option<String>, SystemError>;

    /// Resolve a symbolic link
    fn read_link(&self, path: &Path) -> Result<PathBuf, SystemError>;

    /// List the entries of a directory, sorted by name
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, SystemError>;
}
