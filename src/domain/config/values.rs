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

use crate::infrastructure::constants::{
    KOPS_CONFIG_FILE_NAME, NETWORKING_FILE_NAME, TERRAFORM_STATE_FILE_NAME,
};
use crate::infrastructure::tools::Tool;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The values document (`values.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Values {
    pub paths: Paths,
    pub cluster_config: ClusterConfig,
    #[serde(default)]
    pub chart_repos: Vec<ChartRepo>,
    #[serde(default)]
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paths {
    pub ssh_public_key_path: String,
    pub terraform_template_path: String,
    pub kops_template_path: String,
    pub output_dir: String,
    /// Manifest (file or URL) granting tiller its service account; needed by `create`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiller_permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kops: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubectl: Option<String>,
}

impl Paths {
    pub fn binary_override(&self, tool: Tool) -> Option<&str> {
        match tool {
            Tool::Terraform => self.terraform.as_deref(),
            Tool::Kops => self.kops.as_deref(),
            Tool::Helm => self.helm.as_deref(),
            Tool::Kubectl => self.kubectl.as_deref(),
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.output_dir).join(file_name)
    }

    pub fn networking_path(&self) -> PathBuf {
        self.output_path(NETWORKING_FILE_NAME)
    }

    pub fn kops_config_path(&self) -> PathBuf {
        self.output_path(KOPS_CONFIG_FILE_NAME)
    }

    pub fn state_path(&self) -> PathBuf {
        self.output_path(TERRAFORM_STATE_FILE_NAME)
    }
}

/// Cluster identity and template inputs.
///
/// Keys keep their template spelling (`AWSRegion`, `VPCID`, ...). Keys not
/// modelled here land in `extra` and are still visible to the templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterConfig {
    #[serde(rename = "AWSRegion")]
    pub aws_region: String,
    #[serde(rename = "AWSAZ1")]
    pub aws_az1: String,
    #[serde(rename = "ShortName")]
    pub short_name: String,
    #[serde(rename = "FullyQualifiedName")]
    pub fully_qualified_name: String,
    #[serde(rename = "ConfigBaseURL")]
    pub config_base_url: String,
    #[serde(rename = "VPCID", default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(
        rename = "PublicNATGatewayID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_nat_gateway_id: Option<String>,
    #[serde(rename = "NodeSubnetID", default, skip_serializing_if = "Option::is_none")]
    pub node_subnet_id: Option<String>,
    #[serde(
        rename = "PublicSubnetID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_subnet_id: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ClusterConfig {
    /// Region and availability zone concatenated, e.g. `eu-west-2a`.
    pub fn zone(&self) -> String {
        format!("{}{}", self.aws_region, self.aws_az1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartRepo {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub name: String,
    pub release: String,
    pub namespace: String,
    /// Raw `key=value[,key=value]` string handed to `--set` unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_file: Option<String>,
}
