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
use crate::domain::config::Values;
use crate::infrastructure::constants::{
    CHART_SERVER_POLL_INTERVAL, CLUSTER_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT_MINUTES,
    TILLER_SERVICE_ACCOUNT,
};
use crate::infrastructure::helm::{Helm, ReleaseOutcome};
use crate::infrastructure::kops::Kops;
use crate::infrastructure::kubectl::Kubectl;
use crate::infrastructure::state::TerraformState;
use crate::infrastructure::template::TemplateRenderer;
use crate::infrastructure::terraform::Terraform;
use crate::infrastructure::tools::{ToolPaths, ToolRunner, Toolbox};
use crate::shared::error::Result;
use crate::shared::poll::PollPolicy;
use crate::shared::prompt::Confirm;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Intervals between availability probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub cluster_interval: Duration,
    pub chart_server_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            cluster_interval: CLUSTER_POLL_INTERVAL,
            chart_server_interval: CHART_SERVER_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOptions {
    pub cluster_wait_timeout: Duration,
    pub tiller_wait_timeout: Duration,
}

impl CreateOptions {
    pub fn from_minutes(cluster_wait: u64, tiller_wait: u64) -> Self {
        Self {
            cluster_wait_timeout: Duration::from_secs(cluster_wait.saturating_mul(60)),
            tiller_wait_timeout: Duration::from_secs(tiller_wait.saturating_mul(60)),
        }
    }
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_WAIT_TIMEOUT_MINUTES, DEFAULT_WAIT_TIMEOUT_MINUTES)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateReport {
    pub cluster: String,
    pub releases: Vec<ReleaseOutcome>,
}

/// Runs the create, update and destroy flows for the cluster described by
/// one values document.
///
/// Every step is awaited before the next one starts and the first failure
/// ends the flow. Nothing is rolled back.
pub struct ClusterDescriptor {
    values: Values,
    toolbox: Toolbox,
    renderer: TemplateRenderer,
    confirm: Box<dyn Confirm>,
    polling: PollSettings,
}

impl ClusterDescriptor {
    pub fn new(values: Values, toolbox: Toolbox, confirm: Box<dyn Confirm>) -> Self {
        Self {
            values,
            toolbox,
            renderer: TemplateRenderer::new(),
            confirm,
            polling: PollSettings::default(),
        }
    }

    /// Loads and validates the values, then probes every tool.
    ///
    /// No tool is invoked if the values are invalid, and no mutating command
    /// can run before every probe succeeded.
    pub async fn prepare(
        values_path: impl AsRef<Path>,
        schema_path: impl AsRef<Path>,
        runner: Arc<dyn ToolRunner>,
        confirm: Box<dyn Confirm>,
    ) -> Result<Self> {
        let values = Values::load(values_path, schema_path)?;
        let toolbox = Toolbox::new(ToolPaths::from_paths(&values.paths), runner);
        toolbox.probe_all().await?;
        Ok(Self::new(values, toolbox, confirm))
    }

    pub fn with_poll_settings(mut self, polling: PollSettings) -> Self {
        self.polling = polling;
        self
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    fn cluster_name(&self) -> &str {
        &self.values.cluster_config.fully_qualified_name
    }

    fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.values.paths.output_dir)
    }

    fn kops(&self) -> Kops<'_> {
        Kops::new(&self.toolbox, &self.values.cluster_config.config_base_url)
    }

    pub async fn create_cluster(&mut self, options: &CreateOptions) -> Result<CreateReport> {
        let tiller_permissions = ValuesValidator::new(&self.values)
            .validate_create()?
            .to_string();
        let cluster = self.cluster_name().to_string();
        info!(cluster = %cluster, "creating cluster");

        self.provision_network().await?;
        let kops_config = self.render_kops_config()?;

        let kops = self.kops();
        kops.add_cluster(&kops_config).await?;
        println!("✓ Cluster {} defined", cluster);
        kops.add_ssh_key(&cluster, &self.values.paths.ssh_public_key_path)
            .await?;
        println!("✓ SSH public key added");
        kops.update_cluster(&cluster).await?;
        println!("✓ Cluster resources created");

        println!("\nWaiting for the Kubernetes server to come up...");
        let kubectl = Kubectl::new(&self.toolbox);
        kubectl
            .wait_until_available(PollPolicy::new(
                self.polling.cluster_interval,
                options.cluster_wait_timeout,
            ))
            .await?;
        println!("✓ Kubernetes server is available");

        kubectl.apply(&tiller_permissions).await?;
        println!("✓ Tiller permissions applied");

        let helm = Helm::new(&self.toolbox);
        helm.init(TILLER_SERVICE_ACCOUNT).await?;
        println!("\nWaiting for Helm tiller to come up...");
        helm.wait_until_available(PollPolicy::new(
            self.polling.chart_server_interval,
            options.tiller_wait_timeout,
        ))
        .await?;
        println!("✓ Helm tiller is available");

        let releases = helm
            .install_all(&self.values.chart_repos, &self.values.charts)
            .await?;
        println!("✓ Charts installed");
        info!(cluster = %cluster, releases = releases.len(), "cluster created");

        Ok(CreateReport { cluster, releases })
    }

    /// Re-applies the network and cluster spec. Safe to run repeatedly.
    pub async fn update_cluster(&mut self, assume_yes: bool) -> Result<()> {
        let cluster = self.cluster_name().to_string();
        if !assume_yes {
            self.confirm
                .confirm_or_abort(&format!("Are you sure you want to update {}?", cluster))?;
        }
        info!(cluster = %cluster, "updating cluster");

        self.provision_network().await?;
        let kops_config = self.render_kops_config()?;

        let kops = self.kops();
        kops.replace_cluster(&kops_config).await?;
        println!("✓ Cluster spec replaced");
        kops.update_cluster(&cluster).await?;
        println!("✓ Cluster resources updated");

        if assume_yes || self.confirm.confirm("Should I initiate a rolling update?")? {
            kops.rolling_update(&cluster).await?;
            println!("✓ Rolling update finished");
        } else {
            info!(cluster = %cluster, "rolling update skipped");
        }

        Ok(())
    }

    /// Deletes the cluster, then the network it ran in.
    pub async fn destroy_cluster(&self, assume_yes: bool) -> Result<()> {
        let cluster = self.cluster_name();
        if !assume_yes {
            self.confirm
                .confirm_or_abort(&format!("Are you sure you want to destroy {}?", cluster))?;
        }
        info!(cluster = %cluster, "destroying cluster");

        self.kops().destroy_cluster(cluster).await?;
        println!("✓ Cluster {} deleted", cluster);

        Terraform::new(&self.toolbox)
            .destroy(&self.output_dir(), &self.values.paths.state_path())
            .await?;
        println!("✓ Infrastructure destroyed");

        Ok(())
    }

    /// Renders `networking.tf` and applies it.
    async fn provision_network(&self) -> Result<()> {
        let paths = &self.values.paths;
        self.renderer.render_to_file(
            Path::new(&paths.terraform_template_path),
            &self.values.cluster_config,
            &paths.networking_path(),
        )?;

        Terraform::new(&self.toolbox)
            .apply(&self.output_dir(), &paths.state_path())
            .await?;
        println!("✓ Infrastructure applied");
        Ok(())
    }

    /// Enriches the cluster config from the fresh state and renders `kops.config`.
    fn render_kops_config(&mut self) -> Result<PathBuf> {
        let state = TerraformState::load(self.values.paths.state_path())?;
        self.values.cluster_config.enrich_from_state(&state)?;

        let output = self.values.paths.kops_config_path();
        self.renderer.render_to_file(
            Path::new(&self.values.paths.kops_template_path),
            &self.values.cluster_config,
            &output,
        )?;
        Ok(output)
    }
}
