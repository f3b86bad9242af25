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

use std::time::Duration;

/// Default input locations
pub const DEFAULT_VALUES_PATH: &str = "values.yaml";
pub const DEFAULT_SCHEMA_PATH: &str = "values.schema";

/// Artifacts written under `paths.outputDir`
pub const NETWORKING_FILE_NAME: &str = "networking.tf";
pub const KOPS_CONFIG_FILE_NAME: &str = "kops.config";
pub const TERRAFORM_STATE_FILE_NAME: &str = "terraform.tfstate";

/// Availability polling
pub const CLUSTER_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const CHART_SERVER_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_WAIT_TIMEOUT_MINUTES: u64 = 5;

/// Poll targets, as shown to the operator
pub const CLUSTER_TARGET: &str = "Kubernetes server";
pub const CHART_SERVER_TARGET: &str = "Helm tiller";

/// kubectl `version --output json` field present once the API server answers
pub const SERVER_VERSION_FIELD: &str = "serverVersion";

/// Helm server component
pub const TILLER_SERVICE_ACCOUNT: &str = "tiller";

/// kops secret name for the admin SSH key
pub const SSH_KEY_SECRET_NAME: &str = "admin";

/// Terraform resource types looked up during enrichment
pub const RESOURCE_VPC: &str = "aws_vpc";
pub const RESOURCE_NAT_GATEWAY: &str = "aws_nat_gateway";
pub const RESOURCE_SUBNET: &str = "aws_subnet";

/// Terraform resource name prefixes, followed by `<region><az>`
pub const NAME_PREFIX_PUBLIC: &str = "public-";
pub const NAME_PREFIX_NODES: &str = "nodes-";
