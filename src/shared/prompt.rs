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

//! Interactive yes/no confirmation

use crate::shared::error::{Result, ShipError};
use std::io::{BufRead, Write};

pub trait Confirm: Send + Sync {
    /// Asks `prompt` and returns whether the operator agreed.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Like [`Confirm::confirm`], but a refusal is [`ShipError::Aborted`].
    fn confirm_or_abort(&self, prompt: &str) -> Result<()> {
        if self.confirm(prompt)? {
            Ok(())
        } else {
            Err(ShipError::Aborted)
        }
    }
}

/// Reads the answer from standard input. Anything but `y`/`yes` declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        ask(prompt, &mut stdin.lock(), &mut stdout)
    }
}

fn ask(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{} [y/N]: ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(text: &str) -> (bool, String) {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        let agreed = ask("Destroy it?", &mut input, &mut output).unwrap();
        (agreed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
        assert!(answer("  yes  \n").0);
    }

    #[test]
    fn test_default_is_no() {
        assert!(!answer("\n").0);
        assert!(!answer("").0);
        assert!(!answer("nope\n").0);
    }

    #[test]
    fn test_prompt_is_written() {
        let (_, written) = answer("n\n");
        assert_eq!(written, "Destroy it? [y/N]: ");
    }
}
