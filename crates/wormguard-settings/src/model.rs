use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `wormguard.toml` schema v1.
///
/// Every field is optional; anything left out comes from the selected profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WormguardConfigV1 {
    /// Optional schema string for tooling (`wormguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Package-manager profile: `pnpm` (default) or `npm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Where the compromised-package list is fetched from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockfile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<String>,

    /// Hidden store directory still entered by the artifact scan. Empty string disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,

    /// Package names per dependency-listing invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_timeout_secs: Option<u64>,

    /// Output ceiling per invocation, in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_mb: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Arguments before the package names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Arguments after the package names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_args: Option<Vec<String>>,

    /// Parse the listing even when the tool exits nonzero (on by default for `npm`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerate_nonzero_exit: Option<bool>,
}
