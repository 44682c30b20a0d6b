//! Shared test utilities for the wormguard workspace.
//!
//! Golden-report normalization plus the project-tree and fake package-manager builders
//! that the app and CLI integration tests share.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

const TIMESTAMP_KEYS: [&str; 2] = ["started_at", "ended_at"];

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// - `tool.version` is replaced with `"__VERSION__"` only when the root object looks like a
///   report envelope (`schema`, `tool`, `run`, `verdict`, `projects`).
/// - `started_at`, `ended_at` and `duration_ms` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "verdict", "projects"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Utf8Path, rel: &str, contents: &str) -> Utf8PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directories");
    }
    std::fs::write(&path, contents).expect("write fixture file");
    path
}

/// Shell script that prints a fixed listing after some noise, whatever it is asked.
///
/// Run it as `sh <script> ...`; the script is never executed directly.
pub fn fake_pm_script(dir: &Utf8Path, listing: &Value) -> Utf8PathBuf {
    let body = format!(
        "echo 'Progress: resolved 42, reused 42'\ncat <<'JSON'\n{}\nJSON\n",
        serde_json::to_string_pretty(listing).expect("serialize listing")
    );
    write_file(dir, "fake-pm.sh", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_only_touches_envelope_tool_version() {
        let input = json!({
            "schema": "wormguard.report.v1",
            "tool": { "name": "wormguard", "version": "0.1.0" },
            "run": { "started_at": "2025-01-01T00:00:00Z", "ended_at": "2025-01-01T00:00:01Z", "duration_ms": 1000 },
            "verdict": { "status": "pass" },
            "projects": [
                { "findings": [ { "package": "tool", "installed_version": "1.0.0" } ] }
            ]
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "wormguard");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["ended_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["duration_ms"], 0);
        assert_eq!(result["projects"][0]["findings"][0]["installed_version"], "1.0.0");
    }

    #[test]
    fn root_without_envelope_keys_not_normalized() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "run": { "started_at": "2025-01-01T00:00:00Z" }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
    }

    #[test]
    fn write_file_creates_parents() {
        let tmp = std::env::temp_dir().join(format!("wormguard-test-util-{}", std::process::id()));
        let root = Utf8PathBuf::from_path_buf(tmp).expect("utf8 temp dir");

        let path = write_file(&root, "a/b/c.txt", "hi");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "hi");
        std::fs::remove_dir_all(&root).expect("cleanup");
    }
}
