use crate::shared::error::BomError;
use crate::shared::Result;

/// Captured result of one external process invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// stdout followed by stderr, for tools that print to either stream.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// CommandRunner port for invoking external tools
///
/// This port abstracts process execution (`ldd`, `otool`, `rpm`, `dpkg`,
/// compiler drivers) so the walker and collectors can be driven by
/// scripted output in tests. Exit status and text output are the whole
/// contract with these tools.
pub trait CommandRunner {
    /// Whether `program` can be found on PATH
    fn is_available(&self, program: &str) -> bool;

    /// Runs `program` with `args` and captures its output
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned or exceeds the
    /// runner's timeout. A non-zero exit status is NOT an error here; see
    /// [`CommandRunner::run_checked`].
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Runs a command and fails on a non-zero exit status
    fn run_checked(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(program, args)?;
        if !output.success {
            return Err(BomError::CommandFailed {
                command: describe_command(program, args),
                details: first_line(&output.stderr)
                    .or_else(|| first_line(&output.stdout))
                    .unwrap_or("non-zero exit status")
                    .to_string(),
            }
            .into());
        }
        Ok(output)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn is_available(&self, program: &str) -> bool {
        (**self).is_available(program)
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Renders `program arg1 arg2` for log and error messages
pub fn describe_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRunner(CommandOutput);

    impl CommandRunner for FixedRunner {
        fn is_available(&self, _program: &str) -> bool {
            true
        }

        fn run(&self, _program: &str, _args: &[&str]) -> Result<CommandOutput> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_run_checked_passes_success_through() {
        let runner = FixedRunner(CommandOutput::success("ok"));
        assert_eq!(runner.run_checked("ldd", &["/x"]).unwrap().stdout, "ok");
    }

    #[test]
    fn test_run_checked_reports_first_stderr_line() {
        let runner = FixedRunner(CommandOutput::failure(
            "\nfile /x is not owned by any package\nmore",
        ));
        let err = runner.run_checked("rpm", &["-q", "--whatprovides", "/x"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("rpm -q --whatprovides /x"));
        assert!(message.contains("is not owned by any package"));
    }

    #[test]
    fn test_combined_output() {
        let output = CommandOutput {
            success: false,
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert_eq!(output.combined(), "out\nerr");
        assert_eq!(CommandOutput::success("only").combined(), "only");
    }

    #[test]
    fn test_describe_command() {
        assert_eq!(describe_command("otool", &["-L", "/a b"]), "otool -L /a b");
        assert_eq!(describe_command("gcc", &[]), "gcc");
    }
}
