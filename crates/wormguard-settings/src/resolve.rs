use crate::{model::WormguardConfigV1, presets};
use std::time::Duration;
use wormguard_domain::policy::EffectiveConfig;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub rules_url: Option<String>,
    pub batch_size: Option<u32>,
    pub tool_timeout_secs: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: WormguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "pnpm".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(url) = overrides.rules_url.or(cfg.rules_url) {
        effective.rules_url = url;
    }

    // Layout
    if let Some(lockfile) = cfg.lockfile {
        effective.layout.lockfile = lockfile;
    }
    if let Some(install_dir) = cfg.install_dir {
        effective.layout.install_dir = install_dir;
    }
    if let Some(store_dir) = cfg.store_dir {
        effective.layout.store_dir = (!store_dir.is_empty()).then_some(store_dir);
    }

    // Resolver
    if let Some(tool) = cfg.tool {
        if let Some(program) = tool.program {
            effective.resolver.program = program;
        }
        if let Some(args) = tool.args {
            effective.resolver.args = args;
        }
        if let Some(trailing) = tool.trailing_args {
            effective.resolver.trailing_args = trailing;
        }
        if let Some(tolerate) = tool.tolerate_nonzero_exit {
            effective.resolver.tolerate_nonzero_exit = tolerate;
        }
    }
    if let Some(batch) = overrides.batch_size.or(cfg.batch_size) {
        anyhow::ensure!(batch >= 1, "batch_size must be at least 1");
        effective.resolver.batch_size = batch as usize;
    }
    if let Some(secs) = overrides.tool_timeout_secs.or(cfg.tool_timeout_secs) {
        anyhow::ensure!(secs >= 1, "tool_timeout_secs must be at least 1");
        effective.resolver.timeout = Duration::from_secs(secs);
    }
    if let Some(mb) = cfg.max_output_mb {
        anyhow::ensure!(mb >= 1, "max_output_mb must be at least 1");
        effective.resolver.max_output_bytes = (mb as usize).saturating_mul(1024 * 1024);
    }

    validate(&effective)?;
    Ok(ResolvedConfig { effective })
}

fn validate(cfg: &EffectiveConfig) -> anyhow::Result<()> {
    anyhow::ensure!(!cfg.layout.lockfile.is_empty(), "lockfile must not be empty");
    anyhow::ensure!(
        !cfg.layout.install_dir.is_empty(),
        "install_dir must not be empty"
    );
    anyhow::ensure!(
        !cfg.resolver.program.is_empty(),
        "tool.program must not be empty"
    );
    anyhow::ensure!(!cfg.rules_url.is_empty(), "rules_url must not be empty");
    Ok(())
}
