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

//! File-based reference table loading

use crate::domain::{ReferenceError, ReferenceTable};
use crate::ports::ReferenceSource;
use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Loads the reference table from a local JSON file
pub struct FileReferenceSource {
    path: PathBuf,
}

impl FileReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReferenceSource for FileReferenceSource {
    async fn load(&self) -> Result<ReferenceTable, ReferenceError> {
        let document = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ReferenceError::Io(format!("{}: {}", self.path.display(), e)))?;

        let reference = ReferenceTable::from_json_str(&document)?;
        info!("Loaded reference table from {}", self.path.display());
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::tests::SAMPLE;
    use crate::domain::FieldKey;
    use assert_fs::prelude::*;

    #[tokio::test]
    async fn test_load_reference_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("ids.json");
        file.write_str(SAMPLE).unwrap();

        let source = FileReferenceSource::new(file.path());
        let reference = source.load().await.unwrap();

        let gpus = reference.table(FieldKey::Gpu).unwrap();
        assert_eq!(gpus.unknown(), "unknown_gpu");
        assert_eq!(gpus.entries()[0].0, "nvidia");
    }

    #[tokio::test]
    async fn test_invalid_reference_fails_at_load() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("ids.json");
        file.write_str(&SAMPLE.replace(r#""unknown": "unknown_gpu""#, r#""matrox": "matrox""#))
            .unwrap();

        let err = FileReferenceSource::new(file.path()).load().await.unwrap_err();
        assert_eq!(err, ReferenceError::MissingUnknown("gpus".to_string()));
    }

    #[tokio::test]
    async fn test_missing_reference_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = FileReferenceSource::new(temp.path().join("nope.json"));

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, ReferenceError::Io(msg) if msg.contains("nope.json")));
    }
}
