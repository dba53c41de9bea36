use clap::Parser;
use std::path::PathBuf;

use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::bom_construction::domain::Platform;
use crate::ports::outbound::BomFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "purl" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'text'",
                s
            )),
        }
    }
}

impl OutputFormat {
    /// Creates a formatter instance for the specified output format
    pub fn create_formatter(&self) -> Box<dyn BomFormatter> {
        match self {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Text => Box::new(TextFormatter::new()),
        }
    }

    pub fn progress_message(&self) -> &'static str {
        match self {
            OutputFormat::Json => "📝 Generating JSON output...",
            OutputFormat::Text => "📝 Generating package URL list...",
        }
    }
}

/// Identify native libraries and produce a bill of materials of package URLs
///
/// Accepts linker-style inputs: `-L` directories, `-l` library names and
/// literal library or archive files.
#[derive(Parser, Debug)]
#[command(name = "native-sbom")]
#[command(version)]
#[command(about = "Identify native libraries and produce a bill of materials", long_about = None)]
pub struct Args {
    /// Library files or archives to identify as given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory to search for libraries (repeatable, searched in order)
    #[arg(short = 'L', long = "library-path", value_name = "DIR")]
    pub library_paths: Vec<PathBuf>,

    /// Library name to resolve and walk, as in `-lpng` (repeatable)
    #[arg(short = 'l', long = "library", value_name = "NAME")]
    pub libraries: Vec<String>,

    /// Scan a directory tree for library files instead
    #[arg(long, value_name = "DIR", conflicts_with_all = ["files", "libraries"])]
    pub scan: Option<PathBuf>,

    /// Output format: json or text [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to ./native-sbom.config.yml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Timeout for each external command, in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Do not append the toolchain's default library directories
    #[arg(long)]
    pub no_system_paths: bool,

    /// Library naming conventions to apply: linux, macos or windows
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Exit with code 1 when no library could be identified
    #[arg(long)]
    pub fail_on_empty: bool,

    /// Log resolution and identification details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output; warnings and errors are still printed
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether anything was given to identify
    pub fn has_inputs(&self) -> bool {
        self.scan.is_some() || !self.libraries.is_empty() || !self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("purl").unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let error = OutputFormat::from_str("markdown").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("markdown"));
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_parse_linker_style_arguments() {
        let args = Args::try_parse_from([
            "native-sbom",
            "-L/opt/lib",
            "-L",
            "/usr/local/lib",
            "-lpng",
            "-l",
            "z",
            "/opt/lib/libfoo.a",
        ])
        .unwrap();

        assert_eq!(
            args.library_paths,
            vec![PathBuf::from("/opt/lib"), PathBuf::from("/usr/local/lib")]
        );
        assert_eq!(args.libraries, vec!["png", "z"]);
        assert_eq!(args.files, vec![PathBuf::from("/opt/lib/libfoo.a")]);
        assert!(args.scan.is_none());
        assert!(args.format.is_none());
    }

    #[test]
    fn test_parse_options() {
        let args = Args::try_parse_from([
            "native-sbom",
            "--scan",
            "/opt/app",
            "-f",
            "text",
            "--timeout",
            "5",
            "--platform",
            "darwin",
            "--no-system-paths",
            "--fail-on-empty",
            "-v",
            "-q",
        ])
        .unwrap();

        assert_eq!(args.scan, Some(PathBuf::from("/opt/app")));
        assert_eq!(args.format, Some(OutputFormat::Text));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.platform, Some(Platform::MacOs));
        assert!(args.no_system_paths);
        assert!(args.fail_on_empty);
        assert!(args.verbose);
        assert!(args.quiet);
    }

    #[test]
    fn test_scan_conflicts_with_libraries() {
        assert!(Args::try_parse_from(["native-sbom", "--scan", "/opt", "-lpng"]).is_err());
    }

    #[test]
    fn test_has_inputs() {
        assert!(!Args::try_parse_from(["native-sbom", "-L", "/opt/lib"])
            .unwrap()
            .has_inputs());
        assert!(Args::try_parse_from(["native-sbom", "-lz"]).unwrap().has_inputs());
        assert!(Args::try_parse_from(["native-sbom", "--scan", "."]).unwrap().has_inputs());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Args::try_parse_from(["native-sbom", "--timeout", "0"]).is_err());
    }
}
