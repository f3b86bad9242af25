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

use crate::domain::config::Values;
use crate::infrastructure::tools::Tool;
use crate::shared::error::{Result, ShipError};
use std::path::Path;

/// Filesystem checks run after the values document passed the schema.
pub struct ValuesValidator<'a> {
    values: &'a Values,
}

impl<'a> ValuesValidator<'a> {
    pub fn new(values: &'a Values) -> Self {
        Self { values }
    }

    pub fn validate(&self) -> Result<()> {
        let paths = &self.values.paths;

        self.require_file("sshPublicKeyPath", &paths.ssh_public_key_path)?;
        self.require_file("terraformTemplatePath", &paths.terraform_template_path)?;
        self.require_file("kopsTemplatePath", &paths.kops_template_path)?;

        if !Path::new(&paths.output_dir).is_dir() {
            return Err(ShipError::validation(format!(
                "paths.outputDir '{}' is not a directory",
                paths.output_dir
            )));
        }

        for tool in Tool::ALL {
            if let Some(program) = paths.binary_override(tool) {
                self.require_file(tool.as_str(), program)?;
            }
        }

        Ok(())
    }

    /// Extra requirements of `create`, checked before anything is rendered.
    ///
    /// Returns the tiller permissions manifest to apply.
    pub fn validate_create(&self) -> Result<&'a str> {
        let permissions = self
            .values
            .paths
            .tiller_permissions
            .as_deref()
            .ok_or_else(|| {
                ShipError::validation("paths.tillerPermissions is required to create a cluster")
            })?;

        if !is_remote(permissions) {
            self.require_file("tillerPermissions", permissions)?;
        }
        Ok(permissions)
    }

    fn require_file(&self, field: &str, path: &str) -> Result<()> {
        if Path::new(path).is_file() {
            Ok(())
        } else {
            Err(ShipError::validation(format!(
                "paths.{} '{}' does not exist",
                field, path
            )))
        }
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{ClusterConfig, Paths};
    use std::fs;
    use tempfile::TempDir;

    fn values_in(dir: &TempDir) -> Values {
        let root = dir.path();
        for file in ["id_rsa.pub", "networking.tf.j2", "kops.config.j2"] {
            fs::write(root.join(file), "").unwrap();
        }
        let path = |name: &str| root.join(name).display().to_string();

        Values {
            paths: Paths {
                ssh_public_key_path: path("id_rsa.pub"),
                terraform_template_path: path("networking.tf.j2"),
                kops_template_path: path("kops.config.j2"),
                output_dir: root.display().to_string(),
                tiller_permissions: None,
                terraform: None,
                kops: None,
                helm: None,
                kubectl: None,
            },
            cluster_config: ClusterConfig {
                aws_region: "eu-west-2".to_string(),
                aws_az1: "a".to_string(),
                short_name: "demo".to_string(),
                fully_qualified_name: "demo.k8s.example.com".to_string(),
                config_base_url: "s3://demo-state".to_string(),
                vpc_id: None,
                public_nat_gateway_id: None,
                node_subnet_id: None,
                public_subnet_id: None,
                extra: Default::default(),
            },
            chart_repos: vec![],
            charts: vec![],
        }
    }

    #[test]
    fn test_valid_paths() {
        let dir = TempDir::new().unwrap();
        let values = values_in(&dir);
        ValuesValidator::new(&values).validate().unwrap();
    }

    #[test]
    fn test_output_dir_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let mut values = values_in(&dir);
        values.paths.output_dir = values.paths.ssh_public_key_path.clone();

        let err = ValuesValidator::new(&values).validate().unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_missing_binary_override() {
        let dir = TempDir::new().unwrap();
        let mut values = values_in(&dir);
        values.paths.helm = Some("/nonexistent/helm".to_string());

        let err = ValuesValidator::new(&values).validate().unwrap_err();
        assert!(err.to_string().contains("paths.helm"));
    }

    #[test]
    fn test_create_requires_tiller_permissions() {
        let dir = TempDir::new().unwrap();
        let mut values = values_in(&dir);
        assert!(ValuesValidator::new(&values).validate_create().is_err());

        values.paths.tiller_permissions = Some("https://example.com/rbac.yaml".to_string());
        assert_eq!(
            ValuesValidator::new(&values).validate_create().unwrap(),
            "https://example.com/rbac.yaml"
        );

        values.paths.tiller_permissions = Some("/nonexistent/rbac.yaml".to_string());
        assert!(ValuesValidator::new(&values).validate_create().is_err());
    }
}
