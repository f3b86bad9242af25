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

// CLI command definitions

use super::cluster::{CreateCommand, DestroyCommand, UpdateCommand};
use crate::domain::cluster::ClusterDescriptor;
use crate::infrastructure::constants::{DEFAULT_SCHEMA_PATH, DEFAULT_VALUES_PATH};
use crate::infrastructure::tools::ProcessToolRunner;
use crate::shared::prompt::StdinConfirm;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "ship",
    version,
    about = "Provision Kubernetes clusters on AWS",
    long_about = "Creates, updates and destroys a Kubernetes cluster on AWS by driving terraform, kops, helm and kubectl from a single values file"
)]
pub struct CliArgs {
    /// Values file describing the cluster
    #[arg(long, global = true, default_value = DEFAULT_VALUES_PATH, value_name = "PATH")]
    pub values: PathBuf,

    /// JSON schema the values file is checked against
    #[arg(long, global = true, default_value = DEFAULT_SCHEMA_PATH, value_name = "PATH")]
    pub schema: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create the network, the cluster and its charts
    Create(CreateCommand),

    /// Apply changes to the network and cluster spec
    Update(UpdateCommand),

    /// Delete the cluster, then its network
    Destroy(DestroyCommand),
}

impl CliArgs {
    /// Loads the values and probes every tool, ready to run a command.
    pub async fn prepare(&self) -> anyhow::Result<ClusterDescriptor> {
        ClusterDescriptor::prepare(
            &self.values,
            &self.schema,
            Arc::new(ProcessToolRunner),
            Box::new(StdinConfirm),
        )
        .await
        .with_context(|| format!("Failed to prepare {}", self.values.display()))
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let descriptor = self.prepare().await?;
        match self.command {
            Commands::Create(cmd) => cmd.execute(descriptor).await,
            Commands::Update(cmd) => cmd.execute(descriptor).await,
            Commands::Destroy(cmd) => cmd.execute(descriptor).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["ship", "create"]);
        assert_eq!(args.values, PathBuf::from("values.yaml"));
        assert_eq!(args.schema, PathBuf::from("values.schema"));
        match args.command {
            Commands::Create(cmd) => {
                assert_eq!(cmd.cluster_wait_timeout, 5);
                assert_eq!(cmd.tiller_wait_timeout, 5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "ship",
            "destroy",
            "--yes",
            "--values",
            "prod.yaml",
        ]);
        assert_eq!(args.values, PathBuf::from("prod.yaml"));
        assert!(matches!(args.command, Commands::Destroy(DestroyCommand { yes: true })));
    }

    #[test]
    fn test_create_timeouts() {
        let args = CliArgs::parse_from([
            "ship",
            "create",
            "--cluster-wait-timeout",
            "15",
            "--tiller-wait-timeout",
            "2",
        ]);
        match args.command {
            Commands::Create(cmd) => {
                assert_eq!(cmd.cluster_wait_timeout, 15);
                assert_eq!(cmd.tiller_wait_timeout, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_update_defaults_to_prompting() {
        let args = CliArgs::parse_from(["ship", "update"]);
        assert!(matches!(args.command, Commands::Update(UpdateCommand { yes: false })));
    }
}
