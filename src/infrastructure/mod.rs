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

//! Adapters around the external tools and files ship works with

pub mod constants;
pub mod helm;
pub mod kops;
pub mod kubectl;
pub mod state;
pub mod template;
pub mod terraform;
pub mod tools;

pub use self::helm::{Helm, ReleaseOutcome, ReleaseStatus};
pub use self::kops::Kops;
pub use self::kubectl::Kubectl;
pub use self::state::TerraformState;
pub use self::template::TemplateRenderer;
pub use self::terraform::Terraform;
pub use self::tools::{Tool, ToolPaths, Toolbox};
