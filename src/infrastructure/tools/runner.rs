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

use super::Tool;
use std::io;
use std::process::Stdio;

/// A single external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub tool: Tool,
    pub program: String,
    pub args: Vec<String>,
    /// Capture stdout/stderr instead of passing them through to the terminal.
    pub capture: bool,
}

impl ToolCommand {
    /// Tool name followed by its arguments, e.g. `kops update cluster --yes`.
    pub fn command_line(&self) -> String {
        let mut line = self.tool.as_str().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn exit(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Seam between the drivers and the operating system.
#[async_trait::async_trait]
pub trait ToolRunner: Send + Sync {
    /// Runs the command to completion. An `Err` means the process could not be
    /// launched; a non-zero exit is reported through [`ToolOutput::code`].
    async fn run(&self, command: &ToolCommand) -> io::Result<ToolOutput>;
}

/// Spawns real processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolRunner;

#[async_trait::async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        let mut process = tokio::process::Command::new(&command.program);
        process.args(&command.args);

        if command.capture {
            let output = process.stdin(Stdio::null()).output().await?;
            return Ok(ToolOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let status = process.status().await?;
        Ok(ToolOutput {
            code: status.code(),
            ..Default::default()
        })
    }
}
