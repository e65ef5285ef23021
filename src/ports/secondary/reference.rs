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

use crate::domain::{ReferenceError, ReferenceTable};
use async_trait::async_trait;

/// Secondary port - Reference table provider
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Load and validate the reference table
    ///
    /// # Returns
    /// * `Ok(ReferenceTable)` - Table with an `unknown` identifier per field
    /// * `Err(ReferenceError)` - Missing, unreadable or inconsistent table
    async fn load(&self) -> Result<ReferenceTable, ReferenceError>;
}
