use crate::bom_construction::domain::{LibraryReference, Platform};
use crate::ports::outbound::CommandRunner;
use crate::shared::Result;
use std::path::Path;

/// LinkInspector service listing the libraries a binary links against
///
/// Runs `ldd <path>` on Linux and `otool -L <path>` on macOS. Windows has
/// no inspector and every file reports no dependencies.
pub struct LinkInspector<R: CommandRunner> {
    runner: R,
    platform: Platform,
}

impl<R: CommandRunner> LinkInspector<R> {
    pub fn new(runner: R, platform: Platform) -> Self {
        Self { runner, platform }
    }

    /// Libraries referenced by `file`, in tool output order
    ///
    /// # Errors
    /// Returns an error if the inspector is missing, exits non-zero or times out
    pub fn dependencies(&self, file: &Path) -> Result<Vec<LibraryReference>> {
        let Some((program, leading_args)) = self.platform.link_inspector() else {
            return Ok(Vec::new());
        };

        let path = file.to_string_lossy().into_owned();
        let mut args: Vec<&str> = leading_args.to_vec();
        args.push(path.as_str());

        let output = self.runner.run_checked(program, &args)?;
        Ok(parse_link_output(&output.stdout, file))
    }
}

/// Leading path-like token of every line of `ldd`/`otool -L` output.
///
/// ```text
/// 	libc.so.6 => /lib/x86_64-linux-gnu/libc.so.6 (0x00007f...)
/// 	/usr/lib/libSystem.B.dylib (compatibility version 1.0.0, current version 1292.0.0)
/// ```
///
/// A trailing `:` is stripped (otool's header line) and the inspected file
/// itself is never reported as its own dependency.
pub fn parse_link_output(output: &str, inspected: &Path) -> Vec<LibraryReference> {
    let mut references: Vec<LibraryReference> = Vec::new();
    for line in output.lines() {
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        let token = token.trim_end_matches(':');
        if token.is_empty() || Path::new(token) == inspected {
            continue;
        }
        let reference = LibraryReference::new(token);
        if !references.contains(&reference) {
            references.push(reference);
        }
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::CommandOutput;
    use std::cell::RefCell;

    const LDD_OUTPUT: &str = "\tlinux-vdso.so.1 (0x00007ffd5b5f2000)\n\
        \tlibpng16.so.16 => /lib/x86_64-linux-gnu/libpng16.so.16 (0x00007f1e2c5a0000)\n\
        \tlibz.so.1 => /lib/x86_64-linux-gnu/libz.so.1 (0x00007f1e2c580000)\n\
        \tlibc.so.6 => /lib/x86_64-linux-gnu/libc.so.6 (0x00007f1e2c38e000)\n\
        \t/lib64/ld-linux-x86-64.so.2 (0x00007f1e2c60f000)\n";

    const OTOOL_OUTPUT: &str = "/usr/local/lib/libpng16.16.dylib:\n\
        \t/usr/local/opt/libpng/lib/libpng16.16.dylib (compatibility version 54.0.0, current version 54.0.0)\n\
        \t/usr/lib/libz.1.dylib (compatibility version 1.0.0, current version 1.2.11)\n\
        \t/usr/lib/libSystem.B.dylib (compatibility version 1.0.0, current version 1292.0.0)\n";

    struct RecordingRunner {
        output: CommandOutput,
        calls: RefCell<Vec<String>>,
    }

    impl CommandRunner for RecordingRunner {
        fn is_available(&self, _program: &str) -> bool {
            true
        }

        fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
            self.calls
                .borrow_mut()
                .push(crate::ports::outbound::describe_command(program, args));
            Ok(self.output.clone())
        }
    }

    fn names(references: &[LibraryReference]) -> Vec<&str> {
        references.iter().map(|r| r.as_str()).collect()
    }

    #[test]
    fn test_parse_ldd_output() {
        let references = parse_link_output(LDD_OUTPUT, Path::new("/usr/lib/libfoo.so"));
        assert_eq!(
            names(&references),
            vec![
                "linux-vdso.so.1",
                "libpng16.so.16",
                "libz.so.1",
                "libc.so.6",
                "/lib64/ld-linux-x86-64.so.2"
            ]
        );
    }

    #[test]
    fn test_parse_otool_output_skips_header() {
        let references =
            parse_link_output(OTOOL_OUTPUT, Path::new("/usr/local/lib/libpng16.16.dylib"));
        assert_eq!(
            names(&references),
            vec![
                "/usr/local/opt/libpng/lib/libpng16.16.dylib",
                "/usr/lib/libz.1.dylib",
                "/usr/lib/libSystem.B.dylib"
            ]
        );
    }

    #[test]
    fn test_parse_edge_cases() {
        let output = "\n   \n\tlibz.so.1 => not found\n\tlibz.so.1 => /lib/libz.so.1\n:\n\tstatically linked\n";
        let references = parse_link_output(output, Path::new("/x"));
        assert_eq!(names(&references), vec!["libz.so.1", "statically"]);
    }

    #[test]
    fn test_dependencies_invokes_platform_tool() {
        let runner = RecordingRunner {
            output: CommandOutput::success(OTOOL_OUTPUT),
            calls: RefCell::new(Vec::new()),
        };
        let inspector = LinkInspector::new(&runner, Platform::MacOs);
        let references = inspector
            .dependencies(Path::new("/usr/local/lib/libpng16.16.dylib"))
            .unwrap();

        assert_eq!(references.len(), 3);
        assert_eq!(
            runner.calls.borrow().as_slice(),
            ["otool -L /usr/local/lib/libpng16.16.dylib"]
        );
    }

    #[test]
    fn test_windows_has_no_dependencies() {
        let runner = RecordingRunner {
            output: CommandOutput::success(LDD_OUTPUT),
            calls: RefCell::new(Vec::new()),
        };
        let inspector = LinkInspector::new(&runner, Platform::Windows);
        assert!(inspector.dependencies(Path::new("C:/zlib.dll")).unwrap().is_empty());
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_failed_inspection_is_an_error() {
        let runner = RecordingRunner {
            output: CommandOutput::failure("not a dynamic executable"),
            calls: RefCell::new(Vec::new()),
        };
        let inspector = LinkInspector::new(&runner, Platform::Linux);
        assert!(inspector.dependencies(Path::new("/lib/libx.a")).is_err());
    }
}
