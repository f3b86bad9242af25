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

//! Test doubles shared by unit and integration tests.

use crate::infrastructure::tools::{Tool, ToolCommand, ToolOutput, ToolRunner};
use crate::shared::error::Result;
use crate::shared::prompt::Confirm;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Scripted {
    Exit(ToolOutput),
    LaunchFailure(String),
}

#[derive(Debug)]
struct Rule {
    tool: Tool,
    prefix: Vec<String>,
    responses: VecDeque<Scripted>,
}

impl Rule {
    fn matches(&self, command: &ToolCommand) -> bool {
        self.tool == command.tool && command.args.starts_with(&self.prefix)
    }

    /// The last scripted response repeats forever.
    fn next(&mut self) -> Scripted {
        if self.responses.len() > 1 {
            if let Some(response) = self.responses.pop_front() {
                return response;
            }
        }
        self.responses
            .front()
            .cloned()
            .unwrap_or(Scripted::Exit(ToolOutput::exit(0)))
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    rules: Vec<Rule>,
    invocations: Vec<ToolCommand>,
}

/// Records every invocation and answers from scripted rules.
///
/// Rules match on tool plus an argument prefix; the first matching rule wins.
/// Commands without a rule exit 0 with empty output.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, tool: Tool, prefix: &[&str], output: ToolOutput) {
        self.respond_sequence(tool, prefix, vec![output]);
    }

    pub fn respond_sequence(&self, tool: Tool, prefix: &[&str], outputs: Vec<ToolOutput>) {
        self.push_rule(tool, prefix, outputs.into_iter().map(Scripted::Exit).collect());
    }

    pub fn fail_launch(&self, tool: Tool, prefix: &[&str], message: &str) {
        self.push_rule(
            tool,
            prefix,
            VecDeque::from([Scripted::LaunchFailure(message.to_string())]),
        );
    }

    pub fn invocations(&self) -> Vec<ToolCommand> {
        self.lock().invocations.clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.lock()
            .invocations
            .iter()
            .map(ToolCommand::command_line)
            .collect()
    }

    pub fn count(&self, tool: Tool, prefix: &[&str]) -> usize {
        let prefix: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
        self.lock()
            .invocations
            .iter()
            .filter(|c| c.tool == tool && c.args.starts_with(&prefix))
            .count()
    }

    fn push_rule(&self, tool: Tool, prefix: &[&str], responses: VecDeque<Scripted>) {
        self.lock().rules.push(Rule {
            tool,
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            responses,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl ToolRunner for ScriptedRunner {
    async fn run(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        let mut state = self.lock();
        state.invocations.push(command.clone());
        let response = state
            .rules
            .iter_mut()
            .find(|rule| rule.matches(command))
            .map(Rule::next)
            .unwrap_or(Scripted::Exit(ToolOutput::exit(0)));

        match response {
            Scripted::Exit(output) => Ok(output),
            Scripted::LaunchFailure(message) => {
                Err(io::Error::new(io::ErrorKind::NotFound, message))
            }
        }
    }
}

/// Answers confirmation prompts from a fixed script and records the questions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirm {
    answers: Arc<Mutex<VecDeque<bool>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirm {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.iter().copied().collect())),
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl Confirm for ScriptedConfirm {
    /// Unscripted prompts are declined.
    fn confirm(&self, prompt: &str) -> Result<bool> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        Ok(self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or(false))
    }
}
