// crates/podium-config/src/docs.rs
// ============================================================================
// Module: Config Docs Generator
// Description: Markdown generator for podium.toml documentation.
// Purpose: Keep config docs in sync with defaults and validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Generates deterministic markdown documentation for `podium.toml`. The CLI
//! prints this output so the docs can never drift from the shipped binary.

/// One documented configuration key.
struct DocEntry {
    /// Dotted TOML key.
    key: &'static str,
    /// Rendered default value.
    default: &'static str,
    /// Behavior description.
    description: &'static str,
}

/// Documented keys in file order.
const ENTRIES: &[DocEntry] = &[
    DocEntry {
        key: "server.transport",
        default: "\"stdio\"",
        description: "MCP transport: `stdio` (framed stdin/stdout) or `http` (JSON-RPC POST).",
    },
    DocEntry {
        key: "server.bind",
        default: "unset",
        description: "Socket address for the HTTP transport; required when transport is `http`.",
    },
    DocEntry {
        key: "server.max_body_bytes",
        default: "1048576",
        description: "Maximum accepted HTTP request body size in bytes; must be greater than zero.",
    },
    DocEntry {
        key: "automation.osascript_path",
        default: "\"osascript\"",
        description: "Interpreter binary used to run generated scripts; resolved via PATH.",
    },
    DocEntry {
        key: "automation.script_dir",
        default: "\"scripts\"",
        description: "Directory of script resources holding named routines; created when missing.",
    },
    DocEntry {
        key: "audit.enabled",
        default: "true",
        description: "Emit one JSON audit line per request.",
    },
    DocEntry {
        key: "audit.path",
        default: "unset",
        description: "Audit log file path; audit lines go to stderr when omitted.",
    },
];

/// Builds markdown documentation for `podium.toml`.
#[must_use]
pub fn config_docs_markdown() -> String {
    let mut out = String::new();
    out.push_str("# podium.toml\n\n");
    out.push_str("Configuration is read from `podium.toml` in the working directory, ");
    out.push_str("from the path in `PODIUM_CONFIG`, or from `--config`. A missing file ");
    out.push_str("at the default location yields the defaults below; an invalid file ");
    out.push_str("stops the server.\n\n");
    out.push_str("| Key | Default | Description |\n");
    out.push_str("| --- | --- | --- |\n");
    for entry in ENTRIES {
        out.push_str("| `");
        out.push_str(entry.key);
        out.push_str("` | ");
        out.push_str(entry.default);
        out.push_str(" | ");
        out.push_str(entry.description);
        out.push_str(" |\n");
    }
    out.push('\n');
    out.push_str("## Example\n\n");
    out.push_str("```toml\n");
    out.push_str(&crate::examples::config_toml_example());
    out.push_str("```\n");
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
