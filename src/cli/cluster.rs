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

//! Cluster lifecycle commands

use crate::cli::display::TableRenderer;
use crate::domain::cluster::{ClusterDescriptor, CreateOptions};
use crate::infrastructure::constants::DEFAULT_WAIT_TIMEOUT_MINUTES;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct CreateCommand {
    /// Minutes to wait for the Kubernetes server after creating the cluster
    #[arg(long, default_value_t = DEFAULT_WAIT_TIMEOUT_MINUTES, value_name = "MINUTES")]
    pub cluster_wait_timeout: u64,

    /// Minutes to wait for Helm tiller after installing it
    #[arg(long, default_value_t = DEFAULT_WAIT_TIMEOUT_MINUTES, value_name = "MINUTES")]
    pub tiller_wait_timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateCommand {
    /// Skip confirmation prompts, including the rolling update
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DestroyCommand {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl CreateCommand {
    pub fn options(&self) -> CreateOptions {
        CreateOptions::from_minutes(self.cluster_wait_timeout, self.tiller_wait_timeout)
    }

    pub async fn execute(&self, mut descriptor: ClusterDescriptor) -> anyhow::Result<()> {
        let report = descriptor
            .create_cluster(&self.options())
            .await
            .context("Create cluster failed")?;

        println!("\n✓ Cluster {} created successfully!\n", report.cluster);
        println!("{}", TableRenderer::new().render_releases(&report.releases));
        Ok(())
    }
}

impl UpdateCommand {
    pub async fn execute(&self, mut descriptor: ClusterDescriptor) -> anyhow::Result<()> {
        descriptor
            .update_cluster(self.yes)
            .await
            .context("Update cluster failed")?;

        println!(
            "\n✓ Cluster {} updated successfully!",
            descriptor.values().cluster_config.fully_qualified_name
        );
        Ok(())
    }
}

impl DestroyCommand {
    pub async fn execute(&self, descriptor: ClusterDescriptor) -> anyhow::Result<()> {
        descriptor
            .destroy_cluster(self.yes)
            .await
            .context("Destroy cluster failed")?;

        println!(
            "\n✓ Cluster {} destroyed successfully!",
            descriptor.values().cluster_config.fully_qualified_name
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_create_options_in_minutes() {
        let cmd = CreateCommand {
            cluster_wait_timeout: 10,
            tiller_wait_timeout: 1,
        };
        let options = cmd.options();
        assert_eq!(options.cluster_wait_timeout, Duration::from_secs(600));
        assert_eq!(options.tiller_wait_timeout, Duration::from_secs(60));
    }
}
