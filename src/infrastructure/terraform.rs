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

use crate::infrastructure::tools::{Tool, Toolbox};
use crate::shared::error::Result;
use std::path::Path;

/// Provisions and destroys the network infrastructure.
pub struct Terraform<'a> {
    toolbox: &'a Toolbox,
}

impl<'a> Terraform<'a> {
    pub fn new(toolbox: &'a Toolbox) -> Self {
        Self { toolbox }
    }

    pub async fn apply(&self, config_dir: &Path, state_path: &Path) -> Result<()> {
        let state = state_flag(state_path);
        let dir = config_dir.display().to_string();
        self.toolbox
            .invoke(Tool::Terraform, &["apply", &state, &dir])
            .await
    }

    pub async fn destroy(&self, config_dir: &Path, state_path: &Path) -> Result<()> {
        let state = state_flag(state_path);
        let dir = config_dir.display().to_string();
        self.toolbox
            .invoke(Tool::Terraform, &["destroy", "-force", &state, &dir])
            .await
    }
}

fn state_flag(state_path: &Path) -> String {
    format!("-state={}", state_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::tools::{ToolOutput, ToolPaths};
    use crate::shared::error::ShipError;
    use crate::test_support::ScriptedRunner;
    use std::sync::Arc;

    fn toolbox(runner: &ScriptedRunner) -> Toolbox {
        Toolbox::new(ToolPaths::default(), Arc::new(runner.clone()))
    }

    #[tokio::test]
    async fn test_apply_and_destroy_arguments() {
        let runner = ScriptedRunner::new();
        let toolbox = toolbox(&runner);
        let terraform = Terraform::new(&toolbox);

        terraform
            .apply(Path::new("out"), Path::new("out/terraform.tfstate"))
            .await
            .unwrap();
        terraform
            .destroy(Path::new("out"), Path::new("out/terraform.tfstate"))
            .await
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                "terraform apply -state=out/terraform.tfstate out",
                "terraform destroy -force -state=out/terraform.tfstate out",
            ]
        );
    }

    #[tokio::test]
    async fn test_apply_failure_is_fatal() {
        let runner = ScriptedRunner::new();
        runner.respond(Tool::Terraform, &["apply"], ToolOutput::exit(1));
        let toolbox = toolbox(&runner);

        let err = Terraform::new(&toolbox)
            .apply(Path::new("out"), Path::new("out/terraform.tfstate"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShipError::ExternalTool { tool: Tool::Terraform, code: Some(1), .. }
        ));
    }
}
