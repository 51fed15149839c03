//! Code generation errors.
//!
//! Lowering itself cannot fail on a well-formed tree; every error here comes
//! from LLVM while verifying, optimizing or JIT-compiling the module.

use thiserror::Error;

use crate::passes::OptimizationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The native target could not be initialized.
    #[error("failed to initialize native target: {0}")]
    TargetInit(String),
    /// No target machine for the host triple.
    #[error("failed to create target machine: {0}")]
    TargetMachine(String),
    /// The generated module is malformed.
    #[error("module verification failed: {0}")]
    Verify(String),
    /// The optimization pipeline failed.
    #[error(transparent)]
    Optimization(#[from] OptimizationError),
    /// The JIT execution engine could not be created.
    #[error("failed to create JIT execution engine: {0}")]
    Jit(String),
    /// The entry point was not found in the JIT-compiled module.
    #[error("function `{name}` not found: {message}")]
    MissingFunction { name: &'static str, message: String },
}
