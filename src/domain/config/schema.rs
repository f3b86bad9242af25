// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::shared::error::{Result, ShipError};
use serde_json::Value;
use std::path::Path;

/// Compiled JSON schema for the values document.
pub struct ValuesSchema {
    validator: jsonschema::Validator,
}

impl ValuesSchema {
    /// Loads a schema written in YAML (or JSON, which is valid YAML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let document = std::fs::read_to_string(path)
            .map_err(|e| ShipError::config_read(&label, format!("config values schema: {}", e)))?;
        let schema: Value = serde_yaml::from_str(&document)
            .map_err(|e| ShipError::config_parse(&label, e))?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| ShipError::config_parse(&label, format!("invalid schema: {}", e)))?;
        Ok(Self { validator })
    }

    /// Checks `document`, reporting every violation at once.
    pub fn validate(&self, document: &Value) -> Result<()> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(document)
            .map(|error| error.to_string())
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ShipError::validation(violations.join("; ")))
        }
    }
}
