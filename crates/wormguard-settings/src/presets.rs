use std::time::Duration;
use wormguard_domain::policy::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_OUTPUT_MB, DEFAULT_RULES_URL, DEFAULT_TOOL_TIMEOUT_SECS,
    EffectiveConfig, IndicatorSet, ResolverPolicy, ScanLayout,
};

/// Preset profiles describe one package manager each.
///
/// Keep these small and readable. Anything unusual should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "npm" => npm_profile(),
        // default
        _ => pnpm_profile(),
    }
}

fn pnpm_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "pnpm".to_string(),
        rules_url: DEFAULT_RULES_URL.to_string(),
        layout: ScanLayout {
            lockfile: "pnpm-lock.yaml".to_string(),
            install_dir: "node_modules".to_string(),
            store_dir: Some(".pnpm".to_string()),
        },
        resolver: resolver("pnpm", &["list"], &["--depth", "Infinity", "--json", "--quiet"]),
        indicators: IndicatorSet::default(),
    }
}

fn npm_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "npm".to_string(),
        rules_url: DEFAULT_RULES_URL.to_string(),
        layout: ScanLayout {
            lockfile: "package-lock.json".to_string(),
            install_dir: "node_modules".to_string(),
            store_dir: None,
        },
        resolver: ResolverPolicy {
            tolerate_nonzero_exit: true,
            ..resolver("npm", &["ls"], &["--all", "--json"])
        },
        indicators: IndicatorSet::default(),
    }
}

fn resolver(program: &str, args: &[&str], trailing_args: &[&str]) -> ResolverPolicy {
    ResolverPolicy {
        program: program.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
        trailing_args: trailing_args.iter().map(|s| s.to_string()).collect(),
        batch_size: DEFAULT_BATCH_SIZE,
        timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        max_output_bytes: DEFAULT_MAX_OUTPUT_MB * 1024 * 1024,
        tolerate_nonzero_exit: false,
    }
}
