//! Error types for the compilation crate.

use qpipe_ir::IrError;
use thiserror::Error;

/// Errors raised while running compilation passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The circuit IR rejected an operation.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Writing pass output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pass could not complete.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed {
        /// Name of the pass.
        name: String,
        /// Why it failed.
        reason: String,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
