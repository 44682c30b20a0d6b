use crate::{RenderableFindingKind, RenderableReport};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Breaches and sensitive files are `::error`, warnings are `::warning`. Findings point at
/// the project directory; artifacts point at the file itself.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(error) = &report.data.error {
        out.push(format!("::error::[wormguard] {}", escape(error)));
        return out;
    }

    for f in &report.findings {
        let (level, message) = match f.kind {
            RenderableFindingKind::Breach => (
                "error",
                format!(
                    "[wormguard:breach] {}@{} matches compromised list: {}",
                    f.package, f.installed_version, f.raw_constraint
                ),
            ),
            RenderableFindingKind::Warning => (
                "warning",
                format!(
                    "[wormguard:warning] {}@{} is in use; compromised list: {}. Verify manually.",
                    f.package, f.installed_version, f.raw_constraint
                ),
            ),
        };
        out.push(format!(
            "::{} file={}::{}",
            level,
            escape_property(&f.project),
            escape(&message)
        ));
    }

    for path in &report.artifacts {
        out.push(format!(
            "::error file={}::{}",
            escape_property(path),
            escape("[wormguard:artifact] sensitive file found in installed dependencies")
        ));
    }

    out
}

fn escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape(s).replace(':', "%3A").replace(',', "%2C")
}
