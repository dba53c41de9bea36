/// Process adapters for invoking external tools
mod system_command_runner;

pub use system_command_runner::{SystemCommandRunner, DEFAULT_COMMAND_TIMEOUT};
