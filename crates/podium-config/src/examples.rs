// crates/podium-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Podium configuration. The output is deterministic
//! and kept in sync with the config model by the tests below.

/// Returns a canonical example `podium.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[server]
transport = "stdio"
max_body_bytes = 1048576
# bind = "127.0.0.1:8080"   # required when transport = "http"

[automation]
osascript_path = "osascript"
script_dir = "scripts"

[audit]
enabled = true
# path = "podium-audit.jsonl"   # stderr when omitted
"#,
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
