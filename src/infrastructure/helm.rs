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

use crate::domain::config::{Chart, ChartRepo};
use crate::infrastructure::constants::CHART_SERVER_TARGET;
use crate::infrastructure::tools::{Tool, Toolbox};
use crate::shared::error::Result;
use crate::shared::poll::{poll_until_available, PollPolicy};
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStatus {
    Installed,
    /// Already present in the cluster, left untouched
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub release: String,
    pub chart: String,
    pub namespace: String,
    pub status: ReleaseStatus,
}

impl ReleaseOutcome {
    fn new(chart: &Chart, status: ReleaseStatus) -> Self {
        Self {
            release: chart.release.clone(),
            chart: chart.name.clone(),
            namespace: chart.namespace.clone(),
            status,
        }
    }
}

/// Helm (v2) client with its tiller server.
pub struct Helm<'a> {
    toolbox: &'a Toolbox,
}

impl<'a> Helm<'a> {
    pub fn new(toolbox: &'a Toolbox) -> Self {
        Self { toolbox }
    }

    /// Installs tiller into the cluster under `service_account`.
    pub async fn init(&self, service_account: &str) -> Result<()> {
        self.toolbox
            .invoke(Tool::Helm, &["init", "--service-account", service_account])
            .await
    }

    pub async fn add_repo(&self, repo: &ChartRepo) -> Result<()> {
        self.toolbox
            .invoke(Tool::Helm, &["repo", "add", &repo.name, &repo.url])
            .await
    }

    pub async fn install_chart(&self, chart: &Chart) -> Result<()> {
        let mut args = vec![
            "install",
            "--name",
            chart.release.as_str(),
            chart.name.as_str(),
            "--namespace",
            chart.namespace.as_str(),
        ];
        if let Some(overrides) = &chart.overrides {
            args.extend(["--set", overrides.as_str()]);
        }
        if let Some(values_file) = &chart.values_file {
            args.extend(["-f", values_file.as_str()]);
        }
        self.toolbox.invoke(Tool::Helm, &args).await
    }

    /// Release names currently known to tiller.
    pub async fn releases(&self) -> Result<HashSet<String>> {
        let output = self.toolbox.capture(Tool::Helm, &["list", "-q"]).await?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Adds every repo, then installs every chart in declaration order.
    ///
    /// Releases already present are skipped. The first failure stops the run
    /// and nothing installed before it is rolled back.
    pub async fn install_all(
        &self,
        repos: &[ChartRepo],
        charts: &[Chart],
    ) -> Result<Vec<ReleaseOutcome>> {
        for repo in repos {
            self.add_repo(repo).await?;
        }

        if charts.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self.releases().await?;
        let mut outcomes = Vec::with_capacity(charts.len());
        for chart in charts {
            if existing.contains(&chart.release) {
                info!(release = %chart.release, "release already installed, skipping");
                outcomes.push(ReleaseOutcome::new(chart, ReleaseStatus::Skipped));
                continue;
            }
            self.install_chart(chart).await?;
            outcomes.push(ReleaseOutcome::new(chart, ReleaseStatus::Installed));
        }
        Ok(outcomes)
    }

    /// Succeeds once tiller answers `helm version --server`.
    pub async fn probe_server(&self) -> Result<()> {
        self.toolbox
            .capture(Tool::Helm, &["version", "--server"])
            .await
            .map(|_| ())
    }

    pub async fn wait_until_available(&self, policy: PollPolicy) -> Result<()> {
        poll_until_available(CHART_SERVER_TARGET, policy, move || self.probe_server()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::tools::{ToolOutput, ToolPaths};
    use crate::shared::error::ShipError;
    use crate::test_support::ScriptedRunner;
    use std::sync::Arc;
    use std::time::Duration;

    fn toolbox(runner: &ScriptedRunner) -> Toolbox {
        Toolbox::new(ToolPaths::default(), Arc::new(runner.clone()))
    }

    fn chart(name: &str, release: &str) -> Chart {
        Chart {
            name: name.to_string(),
            release: release.to_string(),
            namespace: "infra".to_string(),
            overrides: None,
            values_file: None,
        }
    }

    #[tokio::test]
    async fn test_install_chart_arguments() {
        let runner = ScriptedRunner::new();
        let toolbox = toolbox(&runner);
        let mut kong = chart("sprinthive/kong", "kong");
        kong.overrides = Some("a=1,b.c=two".to_string());
        kong.values_file = Some("kong-values.yaml".to_string());

        Helm::new(&toolbox).install_chart(&kong).await.unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["helm install --name kong sprinthive/kong --namespace infra --set a=1,b.c=two -f kong-values.yaml"]
        );
    }

    #[tokio::test]
    async fn test_install_all_order_and_skip() {
        let runner = ScriptedRunner::new();
        runner.respond(
            Tool::Helm,
            &["list", "-q"],
            ToolOutput::exit(0).with_stdout("kong\n"),
        );
        let toolbox = toolbox(&runner);
        let repos = vec![ChartRepo {
            name: "sprinthive".to_string(),
            url: "https://charts.example.com".to_string(),
        }];
        let charts = vec![chart("sprinthive/kong", "kong"), chart("stable/grafana", "grafana")];

        let outcomes = Helm::new(&toolbox).install_all(&repos, &charts).await.unwrap();

        assert_eq!(outcomes[0].status, ReleaseStatus::Skipped);
        assert_eq!(outcomes[1].status, ReleaseStatus::Installed);
        assert_eq!(
            runner.command_lines(),
            vec![
                "helm repo add sprinthive https://charts.example.com",
                "helm list -q",
                "helm install --name grafana stable/grafana --namespace infra",
            ]
        );
    }

    #[tokio::test]
    async fn test_first_chart_failure_stops_installation() {
        let runner = ScriptedRunner::new();
        runner.respond(Tool::Helm, &["install", "--name", "a"], ToolOutput::exit(1));
        let toolbox = toolbox(&runner);
        let charts = vec![chart("repo/a", "a"), chart("repo/b", "b")];

        let err = Helm::new(&toolbox).install_all(&[], &charts).await.unwrap_err();

        assert!(matches!(err, ShipError::ExternalTool { tool: Tool::Helm, .. }));
        assert_eq!(runner.count(Tool::Helm, &["install"]), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_tiller_answers() {
        let runner = ScriptedRunner::new();
        runner.respond_sequence(
            Tool::Helm,
            &["version", "--server"],
            vec![ToolOutput::exit(1), ToolOutput::exit(1), ToolOutput::exit(0)],
        );
        let toolbox = toolbox(&runner);
        let policy = PollPolicy::new(Duration::from_secs(15), Duration::from_secs(300));

        Helm::new(&toolbox).wait_until_available(policy).await.unwrap();
        assert_eq!(runner.count(Tool::Helm, &["version", "--server"]), 3);
    }
}
