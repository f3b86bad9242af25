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

//! Jinja2 rendering of the terraform and kops templates

use crate::shared::error::{Result, ShipError};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Renders Jinja2 templates with a serializable context.
///
/// Undefined variables render as empty strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<S: Serialize>(&self, template_path: &Path, context: &S) -> Result<String> {
        let name = template_path.display().to_string();
        let source = std::fs::read_to_string(template_path)?;

        let mut env = minijinja::Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template(&name, &source)
            .map_err(|e| template_error(&name, e))?;

        let ctx = minijinja::Value::from_serialize(context);
        env.get_template(&name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| template_error(&name, e))
    }

    /// Renders `template_path` and writes the result to `output_path`.
    pub fn render_to_file<S: Serialize>(
        &self,
        template_path: &Path,
        context: &S,
        output_path: &Path,
    ) -> Result<()> {
        let rendered = self.render(template_path, context)?;
        std::fs::write(output_path, rendered)?;
        debug!(
            template = %template_path.display(),
            output = %output_path.display(),
            "rendered template"
        );
        Ok(())
    }
}

fn template_error(name: &str, err: minijinja::Error) -> ShipError {
    ShipError::Template {
        path: name.to_string(),
        message: err.to_string(),
    }
}
