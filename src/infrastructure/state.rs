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

//! Terraform state file reader

use crate::shared::error::{Result, ShipError};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Resource ids from a terraform state file, keyed `<type>.<name>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerraformState {
    path: String,
    ids: HashMap<String, String>,
}

/// Pre-0.12 layout: `modules[].resources{"<type>.<name>": {primary: {id}}}`.
#[derive(Debug, Deserialize)]
struct LegacyState {
    modules: Vec<LegacyModule>,
}

#[derive(Debug, Deserialize)]
struct LegacyModule {
    #[serde(default)]
    resources: BTreeMap<String, LegacyResource>,
}

#[derive(Debug, Deserialize)]
struct LegacyResource {
    primary: Option<LegacyPrimary>,
}

#[derive(Debug, Deserialize)]
struct LegacyPrimary {
    id: String,
}

/// Current layout: `resources[{mode, type, name, instances[{attributes: {id}}]}]`.
#[derive(Debug, Deserialize)]
struct CurrentState {
    resources: Vec<CurrentResource>,
}

#[derive(Debug, Deserialize)]
struct CurrentResource {
    #[serde(default)]
    mode: Option<String>,
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    instances: Vec<CurrentInstance>,
}

#[derive(Debug, Deserialize)]
struct CurrentInstance {
    attributes: CurrentAttributes,
}

#[derive(Debug, Deserialize)]
struct CurrentAttributes {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StateDocument {
    Legacy(LegacyState),
    Current(CurrentState),
}

impl TerraformState {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ShipError::StateFile {
            path: label.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&label, &content)
    }

    /// Parses state text; `path` is only used in error messages.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let document: StateDocument =
            serde_json::from_str(content).map_err(|e| ShipError::StateFile {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let mut ids = HashMap::new();
        match document {
            StateDocument::Legacy(state) => {
                for module in state.modules {
                    for (key, resource) in module.resources {
                        if let Some(primary) = resource.primary {
                            ids.entry(key).or_insert(primary.id);
                        }
                    }
                }
            }
            StateDocument::Current(state) => {
                for resource in state.resources {
                    let Some(id) = resource
                        .instances
                        .into_iter()
                        .find_map(|instance| instance.attributes.id)
                    else {
                        continue;
                    };
                    let key = match resource.mode.as_deref() {
                        Some("data") => {
                            format!("data.{}.{}", resource.resource_type, resource.name)
                        }
                        _ => format!("{}.{}", resource.resource_type, resource.name),
                    };
                    ids.entry(key).or_insert(id);
                }
            }
        }
        debug!(path, resources = ids.len(), "read infrastructure state");

        Ok(Self {
            path: path.to_string(),
            ids,
        })
    }

    /// Id of `<resource_type>.<name>`, or `StateLookup` when absent.
    pub fn resource_id(&self, resource_type: &str, name: &str) -> Result<&str> {
        let key = format!("{}.{}", resource_type, name);
        self.ids
            .get(&key)
            .map(String::as_str)
            .ok_or_else(|| ShipError::state_lookup(key, &self.path))
    }
}
