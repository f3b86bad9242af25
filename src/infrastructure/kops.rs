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

use crate::infrastructure::constants::SSH_KEY_SECRET_NAME;
use crate::infrastructure::tools::{Tool, Toolbox};
use crate::shared::error::Result;
use std::path::Path;

/// Cluster lifecycle operations against one kops state store.
///
/// Every call blocks until kops exits. Nothing is retried.
pub struct Kops<'a> {
    toolbox: &'a Toolbox,
    state_store: &'a str,
}

impl<'a> Kops<'a> {
    pub fn new(toolbox: &'a Toolbox, state_store: &'a str) -> Self {
        Self {
            toolbox,
            state_store,
        }
    }

    pub async fn add_cluster(&self, kops_config: &Path) -> Result<()> {
        let config = kops_config.display().to_string();
        self.run(&["create", "-f", &config], false).await
    }

    pub async fn add_ssh_key(&self, cluster: &str, public_key: &str) -> Result<()> {
        self.run(
            &[
                "create",
                "secret",
                "--name",
                cluster,
                "sshpublickey",
                SSH_KEY_SECRET_NAME,
                "-i",
                public_key,
            ],
            false,
        )
        .await
    }

    pub async fn update_cluster(&self, cluster: &str) -> Result<()> {
        self.run(&["update", "cluster", "--name", cluster], true).await
    }

    pub async fn replace_cluster(&self, kops_config: &Path) -> Result<()> {
        let config = kops_config.display().to_string();
        self.run(&["replace", "cluster", "-f", &config], false).await
    }

    pub async fn rolling_update(&self, cluster: &str) -> Result<()> {
        self.run(&["rolling-update", "cluster", "--name", cluster], true).await
    }

    pub async fn destroy_cluster(&self, cluster: &str) -> Result<()> {
        self.run(&["delete", "cluster", cluster], true).await
    }

    async fn run(&self, args: &[&str], yes: bool) -> Result<()> {
        let mut full: Vec<&str> = args.to_vec();
        full.extend(["--state", self.state_store]);
        if yes {
            full.push("--yes");
        }
        self.toolbox.invoke(Tool::Kops, &full).await
    }
}
