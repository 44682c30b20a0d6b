use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a package finding.
///
/// Identity fields:
/// - package name
/// - verdict
/// - project path (scan-root-relative)
/// - installed version
pub fn fingerprint_for_package(
    package: &str,
    verdict: &str,
    project_path: &str,
    installed_version: &str,
) -> String {
    let canonical = [package, verdict, project_path, installed_version].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
