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

use crate::domain::config::ClusterConfig;
use crate::infrastructure::constants::{
    NAME_PREFIX_NODES, NAME_PREFIX_PUBLIC, RESOURCE_NAT_GATEWAY, RESOURCE_SUBNET, RESOURCE_VPC,
};
use crate::infrastructure::state::TerraformState;
use crate::shared::error::Result;
use tracing::debug;

impl ClusterConfig {
    /// Fills the network identifiers left unset with ids from `state`.
    ///
    /// Values already present in the config are never replaced, and the state
    /// is only consulted for fields that are missing.
    pub fn enrich_from_state(&mut self, state: &TerraformState) -> Result<()> {
        let zone = self.zone();

        fill(&mut self.vpc_id, state, RESOURCE_VPC, &self.short_name)?;
        fill(
            &mut self.public_nat_gateway_id,
            state,
            RESOURCE_NAT_GATEWAY,
            &format!("{}{}", NAME_PREFIX_PUBLIC, zone),
        )?;
        fill(
            &mut self.node_subnet_id,
            state,
            RESOURCE_SUBNET,
            &format!("{}{}", NAME_PREFIX_NODES, zone),
        )?;
        fill(
            &mut self.public_subnet_id,
            state,
            RESOURCE_SUBNET,
            &format!("{}{}", NAME_PREFIX_PUBLIC, zone),
        )?;

        Ok(())
    }
}

fn fill(
    field: &mut Option<String>,
    state: &TerraformState,
    resource_type: &str,
    name: &str,
) -> Result<()> {
    if field.is_none() {
        let id = state.resource_id(resource_type, name)?;
        debug!(resource_type, name, id, "derived from infrastructure state");
        *field = Some(id.to_string());
    }
    Ok(())
}
