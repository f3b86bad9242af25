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

use crate::infrastructure::tools::Tool;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShipError>;

#[derive(Error, Debug)]
pub enum ShipError {
    #[error("Failed to read {path}: {message}")]
    ConfigRead { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("Config validation failed: {0}")]
    ConfigValidation(String),

    #[error("{tool} executable not valid: {reason}")]
    ToolUnavailable { tool: Tool, reason: String },

    #[error("Failed to load infrastructure state {path}: {message}")]
    StateFile { path: String, message: String },

    #[error("Resource '{resource}' not found in infrastructure state {path}")]
    StateLookup { resource: String, path: String },

    #[error("{tool} {} exited with status {}{}", .args.join(" "), format_code(.code), format_stderr(.stderr))]
    ExternalTool {
        tool: Tool,
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{target} not ready: {reason}")]
    NotReady { target: String, reason: String },

    #[error("{target} could not be contacted within {}s", .timeout.as_secs())]
    AvailabilityTimeout { target: String, timeout: Duration },

    #[error("Failed to render template {path}: {message}")]
    Template { path: String, message: String },

    #[error("Aborted!")]
    Aborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl ShipError {
    pub fn config_read(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::ConfigRead {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn config_parse(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn validation(context: impl Into<String>) -> Self {
        Self::ConfigValidation(context.into())
    }

    pub fn state_lookup(resource: impl Into<String>, path: impl Into<String>) -> Self {
        Self::StateLookup {
            resource: resource.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_tool_message_includes_args_and_status() {
        let err = ShipError::ExternalTool {
            tool: Tool::Kops,
            args: vec!["delete".to_string(), "cluster".to_string()],
            code: Some(2),
            stderr: "cluster not found\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "kops delete cluster exited with status 2: cluster not found"
        );
    }

    #[test]
    fn test_external_tool_message_without_exit_code() {
        let err = ShipError::ExternalTool {
            tool: Tool::Terraform,
            args: vec!["apply".to_string()],
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "terraform apply exited with status unknown");
    }

    #[test]
    fn test_timeout_message() {
        let err = ShipError::AvailabilityTimeout {
            target: "Kubernetes server".to_string(),
            timeout: Duration::from_secs(300),
        };
        assert_eq!(
            err.to_string(),
            "Kubernetes server could not be contacted within 300s"
        );
    }
}
