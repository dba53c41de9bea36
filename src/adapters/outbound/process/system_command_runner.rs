use crate::ports::outbound::{describe_command, CommandOutput, CommandRunner};
use crate::shared::error::BomError;
use crate::shared::Result;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Default limit for a single external command
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// SystemCommandRunner adapter running real processes
///
/// Every command gets a closed stdin and a bounded wall-clock time. Output
/// pipes are drained on background threads so a chatty child cannot block
/// on a full pipe while we wait for it. A child that outlives the timeout is
/// killed and reported as `BomError::CommandTimedOut`.
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_COMMAND_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

impl CommandRunner for SystemCommandRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = describe_command(program, args);
        debug!(command = %command, "running external command");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => BomError::ToolUnavailable {
                    tool: program.to_string(),
                },
                _ => BomError::CommandFailed {
                    command: command.clone(),
                    details: e.to_string(),
                },
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(command = %command, "command timed out after {:?}, killing it", self.timeout);
                let _ = child.kill();
                let _ = child.wait();
                return Err(BomError::CommandTimedOut {
                    command,
                    timeout: self.timeout,
                }
                .into());
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BomError::CommandFailed {
                    command,
                    details: e.to_string(),
                }
                .into());
            }
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        Ok(CommandOutput {
            success: status.success(),
            stdout,
            stderr,
        })
    }
}
