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

use super::runner::{ToolCommand, ToolOutput, ToolRunner};
use super::{Tool, ToolPaths};
use crate::shared::error::{Result, ShipError};
use std::sync::Arc;
use tracing::{debug, info};

/// Single entry point for running external tools.
///
/// Every driver goes through [`Toolbox::invoke`] or [`Toolbox::capture`], so a
/// non-zero exit always surfaces as [`ShipError::ExternalTool`] carrying the
/// tool, its arguments and the exit code.
#[derive(Clone)]
pub struct Toolbox {
    paths: ToolPaths,
    runner: Arc<dyn ToolRunner>,
}

impl std::fmt::Debug for Toolbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbox")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl Toolbox {
    pub fn new(paths: ToolPaths, runner: Arc<dyn ToolRunner>) -> Self {
        Self { paths, runner }
    }

    /// Runs a tool with its output streamed to the terminal.
    pub async fn invoke(&self, tool: Tool, args: &[&str]) -> Result<()> {
        self.execute(tool, args, false).await.map(|_| ())
    }

    /// Runs a tool and returns its captured output.
    pub async fn capture(&self, tool: Tool, args: &[&str]) -> Result<ToolOutput> {
        self.execute(tool, args, true).await
    }

    /// Confirms that `tool` can be launched and answers a version query.
    pub async fn probe(&self, tool: Tool) -> Result<()> {
        self.capture(tool, tool.probe_args())
            .await
            .map(|_| ())
            .map_err(|err| ShipError::ToolUnavailable {
                tool,
                reason: err.to_string(),
            })
    }

    /// Probes every tool in [`Tool::ALL`] order, stopping at the first failure.
    pub async fn probe_all(&self) -> Result<()> {
        for tool in Tool::ALL {
            self.probe(tool).await?;
            debug!(tool = %tool, program = self.paths.program(tool), "tool available");
        }
        Ok(())
    }

    async fn execute(&self, tool: Tool, args: &[&str], capture: bool) -> Result<ToolOutput> {
        let command = ToolCommand {
            tool,
            program: self.paths.program(tool).to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            capture,
        };

        info!(command = %command.command_line(), "running");

        let output = self
            .runner
            .run(&command)
            .await
            .map_err(|err| ShipError::ExternalTool {
                tool,
                args: command.args.clone(),
                code: None,
                stderr: format!("failed to launch {}: {}", command.program, err),
            })?;

        if output.success() {
            return Ok(output);
        }

        Err(ShipError::ExternalTool {
            tool,
            args: command.args,
            code: output.code,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRunner;

    fn toolbox(runner: &ScriptedRunner) -> Toolbox {
        Toolbox::new(
            ToolPaths::default().with_override(Tool::Helm, "/opt/helm"),
            Arc::new(runner.clone()),
        )
    }

    #[tokio::test]
    async fn test_invoke_uses_resolved_program() {
        let runner = ScriptedRunner::new();
        toolbox(&runner)
            .invoke(Tool::Helm, &["repo", "add", "stable", "https://charts"])
            .await
            .unwrap();

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "/opt/helm");
        assert!(!calls[0].capture);
        assert_eq!(calls[0].command_line(), "helm repo add stable https://charts");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_external_tool_error() {
        let runner = ScriptedRunner::new();
        runner.respond(
            Tool::Kops,
            &["delete"],
            ToolOutput::exit(1).with_stderr("boom"),
        );

        let err = toolbox(&runner)
            .invoke(Tool::Kops, &["delete", "cluster", "a.example.com"])
            .await
            .unwrap_err();

        match err {
            ShipError::ExternalTool {
                tool,
                code,
                stderr,
                args,
            } => {
                assert_eq!(tool, Tool::Kops);
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "boom");
                assert_eq!(args, vec!["delete", "cluster", "a.example.com"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_probe_failure_names_tool() {
        let runner = ScriptedRunner::new();
        runner.fail_launch(Tool::Helm, &["version"], "No such file or directory");

        let err = toolbox(&runner).probe_all().await.unwrap_err();
        assert!(matches!(err, ShipError::ToolUnavailable { tool: Tool::Helm, .. }));
        assert!(err.to_string().starts_with("helm executable not valid"));

        // terraform and kops were probed first, kubectl never
        let lines = runner.command_lines();
        assert_eq!(
            lines,
            vec!["terraform --version", "kops version", "helm version --client"]
        );
    }
}
