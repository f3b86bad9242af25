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

use crate::infrastructure::constants::{CLUSTER_TARGET, SERVER_VERSION_FIELD};
use crate::infrastructure::tools::{Tool, Toolbox};
use crate::shared::error::{Result, ShipError};
use crate::shared::poll::{poll_until_available, PollPolicy};
use serde_json::Value;

pub struct Kubectl<'a> {
    toolbox: &'a Toolbox,
}

impl<'a> Kubectl<'a> {
    pub fn new(toolbox: &'a Toolbox) -> Self {
        Self { toolbox }
    }

    /// `kubectl apply -f <manifest>`; the manifest may be a path or a URL.
    pub async fn apply(&self, manifest: &str) -> Result<()> {
        self.toolbox
            .invoke(Tool::Kubectl, &["apply", "-f", manifest])
            .await
    }

    /// Succeeds once the API server reports its version.
    pub async fn probe_server(&self) -> Result<()> {
        let output = self
            .toolbox
            .capture(Tool::Kubectl, &["version", "--output", "json"])
            .await?;
        let version: Value = serde_json::from_str(&output.stdout).map_err(not_ready)?;

        if version.get(SERVER_VERSION_FIELD).is_some() {
            Ok(())
        } else {
            Err(not_ready(format!("no {} in response", SERVER_VERSION_FIELD)))
        }
    }

    pub async fn wait_until_available(&self, policy: PollPolicy) -> Result<()> {
        poll_until_available(CLUSTER_TARGET, policy, move || self.probe_server()).await
    }
}

fn not_ready(reason: impl std::fmt::Display) -> ShipError {
    ShipError::NotReady {
        target: CLUSTER_TARGET.to_string(),
        reason: reason.to_string(),
    }
}
