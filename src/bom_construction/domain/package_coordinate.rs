use crate::shared::error::BomError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum length for a single coordinate field (security limit)
const MAX_FIELD_LENGTH: usize = 255;

const PURL_SCHEME: &str = "pkg:";

/// Package ecosystem a coordinate belongs to (the purl `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ecosystem {
    /// Generic C/C++ library identified from metadata or file names
    Cpp,
    Conan,
    Rpm,
    Deb,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Cpp => "cpp",
            Ecosystem::Conan => "conan",
            Ecosystem::Rpm => "rpm",
            Ecosystem::Deb => "deb",
        }
    }

    /// Package-manager ecosystems register the exact package name, so no
    /// "lib"-toggled variant is produced for them.
    pub fn uses_native_package_names(&self) -> bool {
        matches!(self, Ecosystem::Rpm | Ecosystem::Deb)
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpp" => Ok(Ecosystem::Cpp),
            "conan" => Ok(Ecosystem::Conan),
            "rpm" => Ok(Ecosystem::Rpm),
            "deb" => Ok(Ecosystem::Deb),
            other => Err(format!("unsupported package type '{}'", other)),
        }
    }
}

/// Canonical `{type, namespace, name, version}` identifying one component.
///
/// Name and version are never empty; a coordinate that cannot satisfy that
/// is never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageCoordinate {
    ecosystem: Ecosystem,
    namespace: Option<String>,
    name: String,
    version: String,
}

impl PackageCoordinate {
    pub fn new(
        ecosystem: Ecosystem,
        namespace: Option<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, BomError> {
        let name = name.into().trim().to_string();
        let version = version.into().trim().to_string();
        let namespace = namespace
            .map(|ns| ns.trim().trim_matches('/').to_string())
            .filter(|ns| !ns.is_empty());

        let describe = || match &namespace {
            Some(ns) => format!("{}/{}/{}@{}", ecosystem, ns, name, version),
            None => format!("{}/{}@{}", ecosystem, name, version),
        };

        if name.is_empty() {
            return Err(BomError::InvalidCoordinate {
                input: describe(),
                reason: "name cannot be empty".to_string(),
            });
        }
        if version.is_empty() {
            return Err(BomError::InvalidCoordinate {
                input: describe(),
                reason: "version cannot be empty".to_string(),
            });
        }
        for field in [Some(&name), Some(&version), namespace.as_ref()]
            .into_iter()
            .flatten()
        {
            if field.len() > MAX_FIELD_LENGTH {
                return Err(BomError::InvalidCoordinate {
                    input: describe(),
                    reason: format!(
                        "field is too long ({} bytes). Maximum allowed: {} bytes",
                        field.len(),
                        MAX_FIELD_LENGTH
                    ),
                });
            }
        }

        Ok(Self {
            ecosystem,
            namespace,
            name,
            version,
        })
    }

    /// Shorthand for a namespace-less generic C/C++ coordinate.
    pub fn cpp(name: impl Into<String>, version: impl Into<String>) -> Result<Self, BomError> {
        Self::new(Ecosystem::Cpp, None, name, version)
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The name with a leading `lib` stripped, or `lib` prepended.
    ///
    /// Returns `None` when the name is exactly `lib`.
    pub fn toggled_lib_name(&self) -> Option<String> {
        match self.name.strip_prefix("lib") {
            Some("") => None,
            Some(bare) => Some(bare.to_string()),
            None => Some(format!("lib{}", self.name)),
        }
    }

    /// Same coordinate under the "lib"-toggled name.
    ///
    /// `None` when there is no toggled name or it fails validation
    /// (a prepended `lib` can push a name past the length limit).
    pub fn with_lib_toggled(&self) -> Option<Self> {
        let name = self.toggled_lib_name()?;
        Self::new(
            self.ecosystem,
            self.namespace.clone(),
            name,
            self.version.clone(),
        )
        .ok()
    }

    /// Package-URL string, e.g. `pkg:rpm/fedora/zlib@1.2.11`.
    pub fn to_purl(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PURL_SCHEME, self.ecosystem)?;
        if let Some(namespace) = &self.namespace {
            for segment in namespace.split('/') {
                write!(f, "/{}", urlencoding::encode(segment))?;
            }
        }
        write!(
            f,
            "/{}@{}",
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.version)
        )
    }
}

impl FromStr for PackageCoordinate {
    type Err = BomError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| BomError::InvalidCoordinate {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let decode = |segment: &str| {
            urlencoding::decode(segment)
                .map(|s| s.into_owned())
                .map_err(|_| invalid("segment is not valid percent-encoded UTF-8"))
        };

        let rest = input
            .trim()
            .strip_prefix(PURL_SCHEME)
            .ok_or_else(|| invalid("missing 'pkg:' scheme"))?;
        let rest = rest.trim_start_matches('/');

        let (path, version) = rest
            .rsplit_once('@')
            .ok_or_else(|| invalid("missing '@version'"))?;

        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("expected 'type/[namespace/]name'"));
        }

        let ecosystem = Ecosystem::from_str(segments[0]).map_err(|reason| invalid(&reason))?;
        let name = decode(segments[segments.len() - 1])?;
        let namespace = if segments.len() > 2 {
            let decoded = segments[1..segments.len() - 1]
                .iter()
                .map(|s| decode(s))
                .collect::<Result<Vec<_>, _>>()?;
            Some(decoded.join("/"))
        } else {
            None
        };

        PackageCoordinate::new(ecosystem, namespace, name, decode(version)?)
    }
}

impl Serialize for PackageCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PackageCoordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PackageCoordinate::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
