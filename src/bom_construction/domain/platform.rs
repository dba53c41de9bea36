use crate::shared::error::BomError;
use std::fmt;
use std::str::FromStr;

/// Operating system whose library conventions drive resolution and naming.
///
/// Passed explicitly into every OS-dependent component so that tests can
/// exercise macOS or Windows behaviour from any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Generic Unix with ELF shared objects (`lib<name>.so[.ver]`)
    Linux,
    /// macOS with Mach-O dynamic libraries (`lib<name>.<ver>.dylib`)
    MacOs,
    /// Windows DLLs; naming is understood but resolution is unsupported
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::MacOs, Platform::Windows];

    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        }
    }

    /// Prefix prepended to a bare library name when globbing.
    pub fn library_prefix(&self) -> &'static str {
        match self {
            Platform::Linux | Platform::MacOs => "lib",
            Platform::Windows => "",
        }
    }

    /// Suffix appended to a bare library name when globbing.
    pub fn library_suffix(&self) -> &'static str {
        match self {
            Platform::Linux => ".so",
            Platform::MacOs => ".dylib",
            Platform::Windows => ".dll",
        }
    }

    /// Whether a reference already names a library file rather than a bare name.
    pub fn looks_like_library_file(&self, reference: &str) -> bool {
        match self {
            Platform::Linux => {
                reference.contains(".so.") || reference.ends_with(".so") || reference.ends_with(".a")
            }
            Platform::MacOs => reference.ends_with(".dylib") || reference.ends_with(".a"),
            Platform::Windows => {
                let lower = reference.to_ascii_lowercase();
                lower.ends_with(".dll") || lower.ends_with(".lib")
            }
        }
    }

    /// Whether a file name denotes a dynamically linked library.
    pub fn is_shared_library(&self, file_name: &str) -> bool {
        match self {
            Platform::Linux => file_name.ends_with(".so") || file_name.contains(".so."),
            Platform::MacOs => file_name.ends_with(".dylib"),
            Platform::Windows => file_name.to_ascii_lowercase().ends_with(".dll"),
        }
    }

    /// Program and leading arguments of the dynamic-link inspector, if any.
    pub fn link_inspector(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Platform::Linux => Some(("ldd", &[])),
            Platform::MacOs => Some(("otool", &["-L"])),
            Platform::Windows => None,
        }
    }

    /// Fails fast on platforms whose library resolution is not implemented.
    pub fn ensure_resolution_supported(&self) -> Result<(), BomError> {
        match self {
            Platform::Windows => Err(BomError::UnsupportedPlatform {
                platform: self.name().to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" | "unix" => Ok(Platform::Linux),
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            "windows" | "win" => Ok(Platform::Windows),
            _ => Err(format!(
                "Invalid platform: {}. Please specify 'linux', 'macos' or 'windows'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(Platform::from_str("darwin").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_str("OSX").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_str("Unix").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_str("windows").unwrap(), Platform::Windows);
        assert!(Platform::from_str("beos").is_err());
    }

    #[test]
    fn test_linux_library_file_detection() {
        let p = Platform::Linux;
        assert!(p.looks_like_library_file("libpng.so"));
        assert!(p.looks_like_library_file("libpng.so.16"));
        assert!(p.looks_like_library_file("/usr/lib/libtiff.a"));
        assert!(!p.looks_like_library_file("png"));
        assert!(!p.looks_like_library_file("libpng.dylib"));
    }

    #[test]
    fn test_macos_library_file_detection() {
        let p = Platform::MacOs;
        assert!(p.looks_like_library_file("libpng.16.dylib"));
        assert!(p.looks_like_library_file("libpng.a"));
        assert!(!p.looks_like_library_file("libpng.so"));
    }

    #[test]
    fn test_shared_library_detection() {
        assert!(Platform::Linux.is_shared_library("libsnuh.so.1.2.3"));
        assert!(Platform::Linux.is_shared_library("libpng.so"));
        assert!(!Platform::Linux.is_shared_library("libtiff.a"));
        assert!(Platform::MacOs.is_shared_library("libpng.dylib"));
        assert!(Platform::Windows.is_shared_library("ZLIB1.DLL"));
    }

    #[test]
    fn test_link_inspector_per_platform() {
        assert_eq!(Platform::Linux.link_inspector().unwrap().0, "ldd");
        let (program, args) = Platform::MacOs.link_inspector().unwrap();
        assert_eq!(program, "otool");
        assert_eq!(args, &["-L"]);
        assert!(Platform::Windows.link_inspector().is_none());
    }

    #[test]
    fn test_windows_resolution_unsupported() {
        assert!(Platform::Linux.ensure_resolution_supported().is_ok());
        assert!(Platform::MacOs.ensure_resolution_supported().is_ok());
        let err = Platform::Windows.ensure_resolution_supported().unwrap_err();
        assert!(err.is_fatal());
    }
}
