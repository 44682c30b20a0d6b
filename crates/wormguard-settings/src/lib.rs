//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{ToolConfig, WormguardConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `wormguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<WormguardConfigV1> {
    let cfg: WormguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + config file + overrides).
pub fn resolve_config(
    cfg: WormguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = parse_config_toml(
            r#"
profile = "npm"
rules_url = "https://example.com/iocs.csv"
lockfile = "package-lock.json"
batch_size = 10
tool_timeout_secs = 60

[tool]
program = "npm"
args = ["ls"]
trailing_args = ["--all", "--json"]
"#,
        )
        .expect("parse");
        assert_eq!(cfg.profile.as_deref(), Some("npm"));
        assert_eq!(cfg.batch_size, Some(10));
        let tool = cfg.tool.expect("tool table");
        assert_eq!(tool.program.as_deref(), Some("npm"));
        assert_eq!(tool.trailing_args, Some(vec!["--all".to_string(), "--json".to_string()]));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config_toml("lockfle = \"x\"").is_err());
    }
}
