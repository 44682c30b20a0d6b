//! Stable identifiers for verdict reasons.
//!
//! Reasons are short snake_case tokens attached to `verdict.reasons`.

pub const REASON_BREACH_DETECTED: &str = "breach_detected";
pub const REASON_SENSITIVE_ARTIFACTS: &str = "sensitive_artifacts";
pub const REASON_MANUAL_VERIFICATION: &str = "manual_verification_required";
pub const REASON_NO_PROJECTS_FOUND: &str = "no_projects_found";
pub const REASON_RESOLVER_DEGRADED: &str = "resolver_degraded";

// Tool-level
pub const REASON_RULE_RETRIEVAL_FAILED: &str = "rule_retrieval_failed";
pub const REASON_NO_VALID_RULES: &str = "no_valid_rules";
pub const REASON_TOOL_ERROR: &str = "tool_error";
