use native_sbom::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock CommandRunner replaying scripted tool output
///
/// Responses are keyed by the full command line (`dpkg -S /lib/libx.so`).
/// Unscripted commands of an available tool fail with a non-zero status;
/// commands of an unavailable tool fail as if the binary were missing.
#[derive(Default, Clone)]
pub struct MockCommandRunner {
    available: HashSet<String>,
    responses: HashMap<String, CommandOutput>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, program: &str) -> Self {
        self.available.insert(program.to_string());
        self
    }

    pub fn with_output(mut self, program: &str, args: &[&str], stdout: &str) -> Self {
        self.available.insert(program.to_string());
        self.responses.insert(
            Self::command_line(program, args),
            CommandOutput::success(stdout),
        );
        self
    }

    pub fn with_failure(mut self, program: &str, args: &[&str], stderr: &str) -> Self {
        self.available.insert(program.to_string());
        self.responses.insert(
            Self::command_line(program, args),
            CommandOutput::failure(stderr),
        );
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, program: &str) -> bool {
        self.get_calls()
            .iter()
            .any(|c| c.split_whitespace().next() == Some(program))
    }

    fn command_line(program: &str, args: &[&str]) -> String {
        std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl CommandRunner for MockCommandRunner {
    fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = Self::command_line(program, args);
        self.calls.lock().unwrap().push(line.clone());

        if !self.available.contains(program) {
            return Err(BomError::ToolUnavailable {
                tool: program.to_string(),
            }
            .into());
        }
        Ok(self
            .responses
            .get(&line)
            .cloned()
            .unwrap_or_else(|| CommandOutput::failure(format!("{}: no scripted output", program))))
    }
}
