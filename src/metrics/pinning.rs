use crate::types::scoring::MetricResult;
use crate::types::signals::PackageManifest;
use semver::Version;

pub fn pinning(manifest: Option<&PackageManifest>) -> MetricResult {
    MetricResult::new(manifest.map(pinning_value).unwrap_or(1.0))
}

fn pinning_value(manifest: &PackageManifest) -> f64 {
    let (pinned, total) = manifest
        .specifiers()
        .fold((0usize, 0usize), |(pinned, total), specifier| {
            (pinned + usize::from(is_exact_pin(specifier)), total + 1)
        });
    if total == 0 {
        return 1.0;
    }
    pinned as f64 / total as f64
}

pub fn is_exact_pin(specifier: &str) -> bool {
    let specifier = specifier.trim();
    let specifier = specifier.strip_prefix('=').unwrap_or(specifier).trim_start();
    let specifier = specifier.strip_prefix('v').unwrap_or(specifier);
    Version::parse(specifier).is_ok()
}
