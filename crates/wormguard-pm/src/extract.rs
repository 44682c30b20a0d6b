use anyhow::{Context, bail};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use wormguard_domain::model::InstalledVersionMap;

/// Sections read on each project descriptor. Nested packages only carry `dependencies`.
const DESCRIPTOR_SECTIONS: [&str; 3] = ["dependencies", "devDependencies", "optionalDependencies"];

/// Best-effort extraction of the JSON document in a tool's captured output.
///
/// Contract: find the first `[` or `{`, parse one JSON value from there and ignore
/// whatever follows it. Any parse error fails the whole extraction.
pub fn extract_json(text: &str) -> anyhow::Result<Value> {
    let Some(start) = text.find(|c: char| c == '[' || c == '{') else {
        bail!("no JSON array or object in tool output");
    };
    let mut values = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
    match values.next() {
        Some(value) => value.context("parse tool output as JSON"),
        None => bail!("no JSON value in tool output"),
    }
}

/// Record the first version seen for every wanted name in a listing document.
///
/// `doc` is one project descriptor or an array of them. Names already present in
/// `installed` are never overwritten. Returns how many names were newly recorded.
pub fn collect_versions(
    doc: &Value,
    wanted: &BTreeSet<&str>,
    installed: &mut InstalledVersionMap,
) -> usize {
    let before = installed.len();
    let descriptors = match doc {
        Value::Array(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    };
    for descriptor in descriptors {
        for section in DESCRIPTOR_SECTIONS {
            if let Some(deps) = descriptor.get(section).and_then(Value::as_object) {
                walk(deps, wanted, installed);
            }
        }
    }
    installed.len() - before
}

fn walk(deps: &Map<String, Value>, wanted: &BTreeSet<&str>, installed: &mut InstalledVersionMap) {
    for (name, node) in deps {
        if wanted.contains(name.as_str())
            && !installed.contains_key(name)
            && let Some(version) = node.get("version").and_then(Value::as_str)
            && !version.is_empty()
        {
            installed.insert(name.clone(), version.to_string());
        }
        if let Some(children) = node.get("dependencies").and_then(Value::as_object) {
            walk(children, wanted, installed);
        }
    }
}
