// crates/podium-config/src/lib.rs
// ============================================================================
// Module: Podium Config Library
// Description: Canonical config model, validation, and docs for Podium.
// Purpose: Single source of truth for podium.toml semantics.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! `podium-config` defines the canonical configuration model for Podium. It
//! provides strict, fail-closed validation plus deterministic generators for
//! the example config and its documentation.
//! Security posture: config inputs are untrusted and reads are size-capped.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod docs;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use docs::config_docs_markdown;
pub use examples::config_toml_example;
