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

//! External tool resolution and invocation

pub mod runner;
pub mod toolbox;

pub use self::runner::{ProcessToolRunner, ToolCommand, ToolOutput, ToolRunner};
pub use self::toolbox::Toolbox;

use crate::domain::config::Paths;
use std::fmt;

/// The external programs ship drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Terraform,
    Kops,
    Helm,
    Kubectl,
}

impl Tool {
    /// Probe order used at startup.
    pub const ALL: [Tool; 4] = [Tool::Terraform, Tool::Kops, Tool::Helm, Tool::Kubectl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Terraform => "terraform",
            Tool::Kops => "kops",
            Tool::Helm => "helm",
            Tool::Kubectl => "kubectl",
        }
    }

    /// Arguments for a side-effect free invocation that proves the binary works.
    pub fn probe_args(&self) -> &'static [&'static str] {
        match self {
            Tool::Terraform => &["--version"],
            Tool::Kops => &["version"],
            Tool::Helm => &["version", "--client"],
            Tool::Kubectl => &["version", "--client"],
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved program locations, fixed for the lifetime of a command.
///
/// A tool without an override is launched by its bare name and found through
/// `PATH` when spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    terraform: String,
    kops: String,
    helm: String,
    kubectl: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            terraform: Tool::Terraform.as_str().to_string(),
            kops: Tool::Kops.as_str().to_string(),
            helm: Tool::Helm.as_str().to_string(),
            kubectl: Tool::Kubectl.as_str().to_string(),
        }
    }
}

impl ToolPaths {
    pub fn from_paths(paths: &Paths) -> Self {
        let mut resolved = Self::default();
        for tool in Tool::ALL {
            if let Some(path) = paths.binary_override(tool) {
                resolved = resolved.with_override(tool, path);
            }
        }
        resolved
    }

    pub fn with_override(mut self, tool: Tool, program: impl Into<String>) -> Self {
        let program = program.into();
        match tool {
            Tool::Terraform => self.terraform = program,
            Tool::Kops => self.kops = program,
            Tool::Helm => self.helm = program,
            Tool::Kubectl => self.kubectl = program,
        }
        self
    }

    pub fn program(&self, tool: Tool) -> &str {
        match tool {
            Tool::Terraform => &self.terraform,
            Tool::Kops => &self.kops,
            Tool::Helm => &self.helm,
            Tool::Kubectl => &self.kubectl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_use_bare_names() {
        let paths = ToolPaths::default();
        assert_eq!(paths.program(Tool::Terraform), "terraform");
        assert_eq!(paths.program(Tool::Kops), "kops");
        assert_eq!(paths.program(Tool::Helm), "helm");
        assert_eq!(paths.program(Tool::Kubectl), "kubectl");
    }

    #[test]
    fn test_override_only_touches_one_tool() {
        let paths = ToolPaths::default().with_override(Tool::Kops, "/opt/bin/kops");
        assert_eq!(paths.program(Tool::Kops), "/opt/bin/kops");
        assert_eq!(paths.program(Tool::Helm), "helm");
    }

    #[test]
    fn test_probe_args() {
        assert_eq!(Tool::Terraform.probe_args(), &["--version"]);
        assert_eq!(Tool::Helm.probe_args(), &["version", "--client"]);
    }
}
