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

//! Local filesystem adapter

use crate::domain::SystemError;
use crate::ports::FileSource;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File source reading the real filesystem
#[derive(Debug, Default, Clone)]
pub struct LocalFileSource;

impl LocalFileSource {
    /// Create a new local file source
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> SystemError {
    SystemError::from_io(&path.display().to_string(), err)
}

impl FileSource for LocalFileSource {
    fn read_to_string(&self, path: &Path) -> Result<String, SystemError> {
        let bytes = fs::read(path).map_err(|e| io_error(path, &e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn find_line(
        &self,
        path: &Path,
        predicate: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Option<String>, SystemError> {
        let file = File::open(path).map_err(|e| io_error(path, &e))?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| io_error(path, &e))?;
            if read == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&buf);
            if let Some(found) = predicate(line.trim_end_matches(['\n', '\r'])) {
                return Ok(Some(found));
            }
        }
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf, SystemError> {
        fs::read_link(path).map_err(|e| io_error(path, &e))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, SystemError> {
        let mut entries = fs::read_dir(path)
            .map_err(|e| io_error(path, &e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| io_error(path, &e))?;
        entries.sort();
        Ok(entries)
    }
}
