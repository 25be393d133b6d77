// crates/podium-core/src/invoke.rs
// ============================================================================
// Module: Process Invoker
// Description: Synchronous osascript subprocess execution.
// Purpose: Run assembled scripts and classify interpreter failures.
// Dependencies: podium-core::error, podium-core::script, std::process
// ============================================================================

//! ## Overview
//! One invocation runs one interpreter process and blocks until it exits.
//! There is no timeout and no retry: automation commands are not idempotent
//! (adding a slide twice creates two slides), so a failed invocation is
//! surfaced immediately and an unresponsive application stalls the calling
//! thread. The invoker is an explicit dependency of the tool router, which
//! lets tests substitute a recording stub for the real interpreter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::Command;

use crate::error::AdapterError;
use crate::script::AssembledScript;

// ============================================================================
// SECTION: Invoker Trait
// ============================================================================

/// Synchronous script execution boundary.
pub trait ScriptInvoker: Send + Sync {
    /// Runs one assembled script to completion and returns trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Script`] when the interpreter exits non-zero
    /// and [`AdapterError::Unexpected`] when the process cannot be launched.
    fn invoke(&self, script: &AssembledScript) -> Result<String, AdapterError>;
}

// ============================================================================
// SECTION: Osascript Invoker
// ============================================================================

/// Production invoker shelling out to `osascript`.
#[derive(Debug, Clone)]
pub struct OsascriptInvoker {
    /// Interpreter binary path or name resolved via `PATH`.
    binary: PathBuf,
}

impl Default for OsascriptInvoker {
    fn default() -> Self {
        Self::new("osascript")
    }
}

impl OsascriptInvoker {
    /// Builds an invoker for the given interpreter binary.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Maps one completed invocation onto the adapter error taxonomy.
    ///
    /// Success returns trimmed stdout; failure classifies trimmed stderr into
    /// a [`crate::error::ScriptErrorKind`]. Split out from process handling so
    /// the mapping is testable without spawning an interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Script`] when `success` is false.
    pub fn interpret(success: bool, stdout: &[u8], stderr: &[u8]) -> Result<String, AdapterError> {
        if success {
            Ok(String::from_utf8_lossy(stdout).trim().to_string())
        } else {
            Err(AdapterError::from_stderr(&String::from_utf8_lossy(stderr)))
        }
    }
}

impl ScriptInvoker for OsascriptInvoker {
    fn invoke(&self, script: &AssembledScript) -> Result<String, AdapterError> {
        let output = match script {
            AssembledScript::Compiled {
                path,
                routine,
                argv,
            } => Command::new(&self.binary).arg(path).arg(routine).args(argv).output(),
            AssembledScript::Inline {
                source,
            } => Command::new(&self.binary).arg("-e").arg(source).output(),
        }
        .map_err(|err| {
            AdapterError::Unexpected(format!("failed to launch {}: {err}", self.binary.display()))
        })?;
        Self::interpret(output.status.success(), &output.stdout, &output.stderr)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
