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

use crate::domain::cluster::validator::ValuesValidator;
use crate::domain::config::schema::ValuesSchema;
use crate::domain::config::values::Values;
use crate::shared::error::{Result, ShipError};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

impl Values {
    /// Reads, schema-checks and validates the values document.
    ///
    /// Nothing is returned unless every check passes.
    pub fn load(values_path: impl AsRef<Path>, schema_path: impl AsRef<Path>) -> Result<Self> {
        let values_path = values_path.as_ref();
        let label = values_path.display().to_string();

        let content = std::fs::read_to_string(values_path)
            .map_err(|e| ShipError::config_read(&label, format!("config values: {}", e)))?;
        let document: Value =
            serde_yaml::from_str(&content).map_err(|e| ShipError::config_parse(&label, e))?;
        debug!(path = %label, "parsed values document");

        ValuesSchema::load(schema_path)?.validate(&document)?;

        let values: Values = serde_json::from_value(document)
            .map_err(|e| ShipError::validation(format!("{}: {}", label, e)))?;

        ValuesValidator::new(&values).validate()?;
        info!(
            path = %label,
            cluster = %values.cluster_config.fully_qualified_name,
            "loaded values"
        );

        Ok(values)
    }
}
