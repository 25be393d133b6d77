// crates/podium-core/src/script.rs
// ============================================================================
// Module: Script Assembler
// Description: Script resource resolution and call-expression assembly.
// Purpose: Produce complete script payloads for the process invoker.
// Dependencies: podium-core::error, podium-core::format
// ============================================================================

//! ## Overview
//! Script units come in two shapes: named resources in a fixed catalog
//! directory (one file holding one or more routines) and inline one-off
//! sources built by the operation layer. For text resources the assembler
//! appends a rendered call expression to the resource source; compiled
//! `.scpt` resources cannot be concatenated and are invoked with positional
//! argv tokens instead. Assembly is deterministic: the same routine and
//! arguments always yield byte-identical output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::error::AdapterError;
use crate::format::ScriptArg;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Extension tried first when resolving a script stem.
const COMPILED_EXTENSION: &str = "scpt";
/// Extension tried second when resolving a script stem.
const SOURCE_EXTENSION: &str = "applescript";

// ============================================================================
// SECTION: Routine Calls
// ============================================================================

/// A named routine call against a catalog resource.
///
/// # Invariants
/// - `script` is a bare resource stem without extension or path separators.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineCall {
    /// Resource stem the routine lives in.
    pub script: String,
    /// Routine name to invoke.
    pub routine: String,
    /// Positional arguments in declaration order.
    pub args: Vec<ScriptArg>,
}

impl RoutineCall {
    /// Builds a routine call.
    #[must_use]
    pub fn new(
        script: impl Into<String>,
        routine: impl Into<String>,
        args: Vec<ScriptArg>,
    ) -> Self {
        Self {
            script: script.into(),
            routine: routine.into(),
            args,
        }
    }

    /// Renders the call expression `routine(arg1, arg2, …)`.
    #[must_use]
    pub fn call_expression(&self) -> String {
        let rendered: Vec<String> = self.args.iter().map(ScriptArg::literal).collect();
        format!("{}({})", self.routine, rendered.join(", "))
    }

    /// Appends the call expression to resource source text.
    ///
    /// The resource text and the call expression are separated by exactly one
    /// blank line regardless of trailing whitespace in the resource.
    #[must_use]
    pub fn assemble_with_source(&self, source: &str) -> String {
        format!("{}\n\n{}\n", source.trim_end(), self.call_expression())
    }
}

// ============================================================================
// SECTION: Assembled Scripts
// ============================================================================

/// A complete script payload ready for invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AssembledScript {
    /// Compiled resource invoked by path with positional argv tokens.
    Compiled {
        /// Resolved `.scpt` path.
        path: PathBuf,
        /// Routine name passed as the first trailing argument.
        routine: String,
        /// Rendered argv tokens in declaration order.
        argv: Vec<String>,
    },
    /// Inline source executed through the interpreter's `-e` flag.
    Inline {
        /// Complete script source text.
        source: String,
    },
}

impl AssembledScript {
    /// Wraps inline source text as an assembled script.
    #[must_use]
    pub fn inline(source: impl Into<String>) -> Self {
        Self::Inline {
            source: source.into(),
        }
    }
}

// ============================================================================
// SECTION: Script Catalog
// ============================================================================

/// Fixed on-disk directory of named script resources.
#[derive(Debug, Clone)]
pub struct ScriptCatalog {
    /// Catalog directory holding `.scpt` / `.applescript` resources.
    dir: PathBuf,
}

impl ScriptCatalog {
    /// Opens a catalog, creating the directory when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::FileOperation`] when the directory cannot be
    /// created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AdapterError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| {
            AdapterError::FileOperation(format!(
                "failed to create script directory {}: {err}",
                dir.display()
            ))
        })?;
        Ok(Self {
            dir,
        })
    }

    /// Returns the catalog directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves a resource stem, trying `.scpt` then `.applescript`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::FileOperation`] for invalid stems and when
    /// neither candidate exists. Resolution failures are raised before any
    /// process is started.
    pub fn resolve(&self, stem: &str) -> Result<PathBuf, AdapterError> {
        validate_stem(stem)?;
        let compiled = self.dir.join(format!("{stem}.{COMPILED_EXTENSION}"));
        if compiled.exists() {
            return Ok(compiled);
        }
        let source = self.dir.join(format!("{stem}.{SOURCE_EXTENSION}"));
        if source.exists() {
            return Ok(source);
        }
        Err(AdapterError::FileOperation(format!(
            "Script file not found: {stem} (tried .scpt and .applescript)"
        )))
    }

    /// Assembles a routine call into an invocable script payload.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::FileOperation`] when resolution or resource
    /// reads fail.
    pub fn assemble(&self, call: &RoutineCall) -> Result<AssembledScript, AdapterError> {
        let path = self.resolve(&call.script)?;
        if path.extension().and_then(|ext| ext.to_str()) == Some(COMPILED_EXTENSION) {
            return Ok(AssembledScript::Compiled {
                path,
                routine: call.routine.clone(),
                argv: call.args.iter().map(ScriptArg::argv).collect(),
            });
        }
        let source = fs::read_to_string(&path).map_err(|err| {
            AdapterError::FileOperation(format!(
                "failed to read script resource {}: {err}",
                path.display()
            ))
        })?;
        Ok(AssembledScript::Inline {
            source: call.assemble_with_source(&source),
        })
    }
}

/// Rejects stems that could escape the catalog directory.
fn validate_stem(stem: &str) -> Result<(), AdapterError> {
    if stem.is_empty() || stem.contains('/') || stem.contains('\\') || stem.contains('.') {
        return Err(AdapterError::FileOperation(format!("invalid script resource stem: {stem}")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
