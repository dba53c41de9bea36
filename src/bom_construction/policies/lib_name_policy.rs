use crate::bom_construction::domain::PackageCoordinate;

/// LibNamePolicy decides which name variants of a coordinate enter the BOM
///
/// Downstream registries disagree on whether a C library is registered as
/// `png` or `libpng`, so generic coordinates are emitted under both names.
///
/// Rules:
/// 1. RPM and Debian coordinates keep the package name exactly as installed
/// 2. Any other coordinate yields itself followed by its "lib"-toggled twin
/// 3. A coordinate named exactly `lib` has no twin
/// 4. A twin whose name would exceed the coordinate length limit is omitted
pub struct LibNamePolicy;

impl LibNamePolicy {
    /// Returns the coordinates to record for one identified artifact
    ///
    /// # Arguments
    /// * `coordinate` - Coordinate as produced by a collector
    ///
    /// # Returns
    /// The as-identified coordinate first, then the toggled variant if any
    pub fn variants(coordinate: &PackageCoordinate) -> Vec<PackageCoordinate> {
        let mut variants = vec![coordinate.clone()];
        if coordinate.ecosystem().uses_native_package_names() {
            return variants;
        }
        if let Some(toggled) = coordinate.with_lib_toggled() {
            variants.push(toggled);
        }
        variants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_construction::domain::Ecosystem;

    fn names(coordinates: &[PackageCoordinate]) -> Vec<String> {
        coordinates.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_cpp_gets_both_names() {
        let c = PackageCoordinate::cpp("libpng", "1.2.3").unwrap();
        assert_eq!(
            names(&LibNamePolicy::variants(&c)),
            vec!["pkg:cpp/libpng@1.2.3", "pkg:cpp/png@1.2.3"]
        );

        let bare = PackageCoordinate::cpp("png", "1.2.3").unwrap();
        assert_eq!(
            names(&LibNamePolicy::variants(&bare)),
            vec!["pkg:cpp/png@1.2.3", "pkg:cpp/libpng@1.2.3"]
        );
    }

    #[test]
    fn test_conan_gets_both_names() {
        let c = PackageCoordinate::new(Ecosystem::Conan, None, "zlib", "1.2.11").unwrap();
        assert_eq!(LibNamePolicy::variants(&c).len(), 2);
    }

    #[test]
    fn test_package_manager_names_are_kept() {
        let deb = PackageCoordinate::new(Ecosystem::Deb, Some("ubuntu".into()), "debtest", "1.2.3")
            .unwrap();
        let rpm = PackageCoordinate::new(Ecosystem::Rpm, Some("fedora".into()), "libpng", "1.6")
            .unwrap();

        assert_eq!(LibNamePolicy::variants(&deb), vec![deb]);
        assert_eq!(LibNamePolicy::variants(&rpm), vec![rpm]);
    }

    #[test]
    fn test_bare_lib_has_no_twin() {
        let c = PackageCoordinate::cpp("lib", "1.0").unwrap();
        assert_eq!(LibNamePolicy::variants(&c), vec![c]);
    }

    #[test]
    fn test_overlong_twin_is_omitted() {
        let c = PackageCoordinate::cpp("n".repeat(254), "1.0").unwrap();
        let variants = LibNamePolicy::variants(&c);
        assert_eq!(variants, vec![c]);
        assert!(variants
            .iter()
            .all(|v| v.to_purl().parse::<PackageCoordinate>().is_ok()));
    }
}
