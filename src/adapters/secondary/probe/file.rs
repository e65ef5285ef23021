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

//! Saved probe report adapter

use crate::domain::ProbeError;
use crate::ports::ProbeSource;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Reads a previously captured probe report from disk on every capture
pub struct FileProbe {
    path: PathBuf,
}

impl FileProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProbeSource for FileProbe {
    async fn capture(&self) -> Result<String, ProbeError> {
        fs::read_to_string(&self.path)
            .await
            .map_err(|e| ProbeError::Io(format!("{}: {}", self.path.display(), e)))
    }
}
