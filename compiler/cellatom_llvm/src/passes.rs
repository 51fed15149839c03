//! Optimization pipeline.
//!
//! Runs LLVM's **New Pass Manager** through the C API in `llvm-sys`, with
//! the string pipeline `default<O0>` through `default<O3>`:
//!
//! ```text
//! OptimizationLevel ──▶ PassBuilderOptions ──▶ LLVMRunPasses("default<On>")
//! ```
//!
//! At `O1` and above the inliner folds the private per-cell function into
//! the sweep loop.

use std::ffi::CString;
use std::fmt;

use inkwell::module::Module;
use inkwell::targets::TargetMachine;
use thiserror::Error;
use tracing::debug;

/// Optimization level for the pass pipeline and the JIT code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptimizationLevel {
    /// No optimization. Maps to `default<O0>`.
    #[default]
    O0,
    /// Light inlining, CSE, `SimplifyCFG`. Maps to `default<O1>`.
    O1,
    /// Standard optimization. Maps to `default<O2>`.
    O2,
    /// Aggressive optimization, full vectorization. Maps to `default<O3>`.
    O3,
}

impl OptimizationLevel {
    /// All levels, lowest first.
    pub const ALL: [OptimizationLevel; 4] = [Self::O0, Self::O1, Self::O2, Self::O3];

    /// Level from its number, `0..=3`.
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level)).copied()
    }

    /// Pipeline string for the new pass manager.
    #[must_use]
    pub fn pipeline_string(self) -> &'static str {
        match self {
            Self::O0 => "default<O0>",
            Self::O1 => "default<O1>",
            Self::O2 => "default<O2>",
            Self::O3 => "default<O3>",
        }
    }

    /// Check if this level enables loop and SLP vectorization.
    #[must_use]
    pub fn enables_vectorization(self) -> bool {
        matches!(self, Self::O2 | Self::O3)
    }

    /// Check if this level enables loop unrolling.
    #[must_use]
    pub fn enables_loop_unrolling(self) -> bool {
        !matches!(self, Self::O0)
    }
}

impl From<OptimizationLevel> for inkwell::OptimizationLevel {
    fn from(level: OptimizationLevel) -> Self {
        match level {
            OptimizationLevel::O0 => Self::None,
            OptimizationLevel::O1 => Self::Less,
            OptimizationLevel::O2 => Self::Default,
            OptimizationLevel::O3 => Self::Aggressive,
        }
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::O0 => write!(f, "O0"),
            Self::O1 => write!(f, "O1"),
            Self::O2 => write!(f, "O2"),
            Self::O3 => write!(f, "O3"),
        }
    }
}

/// Error type for optimization operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizationError {
    #[error("failed to create pass builder options")]
    PassBuilderOptionsCreationFailed,

    #[error("optimization passes failed: {message}")]
    PassesFailed { message: String },

    #[error("invalid pipeline '{pipeline}': {message}")]
    InvalidPipeline { pipeline: String, message: String },
}

/// Extract error message from LLVM error, disposing the error.
///
/// # Safety
/// The error pointer must be valid and non-null.
unsafe fn extract_llvm_error_message(error: llvm_sys::error::LLVMErrorRef) -> String {
    let msg_ptr = llvm_sys::error::LLVMGetErrorMessage(error);
    if msg_ptr.is_null() {
        "unknown error".to_string()
    } else {
        let msg = std::ffi::CStr::from_ptr(msg_ptr)
            .to_string_lossy()
            .into_owned();
        llvm_sys::error::LLVMDisposeErrorMessage(msg_ptr);
        msg
    }
}

/// RAII guard for `LLVMPassBuilderOptionsRef`.
struct PassBuilderOptionsGuard {
    options: llvm_sys::transforms::pass_builder::LLVMPassBuilderOptionsRef,
}

impl PassBuilderOptionsGuard {
    /// Returns `None` if LLVM fails to create the options.
    fn new() -> Option<Self> {
        let options = unsafe { llvm_sys::transforms::pass_builder::LLVMCreatePassBuilderOptions() };
        if options.is_null() {
            None
        } else {
            Some(Self { options })
        }
    }

    fn as_ptr(&self) -> llvm_sys::transforms::pass_builder::LLVMPassBuilderOptionsRef {
        self.options
    }
}

impl Drop for PassBuilderOptionsGuard {
    fn drop(&mut self) {
        unsafe {
            llvm_sys::transforms::pass_builder::LLVMDisposePassBuilderOptions(self.options);
        }
    }
}

/// Run the `default<On>` pipeline over `module`.
pub fn run_optimization_passes(
    module: &Module<'_>,
    target_machine: &TargetMachine,
    level: OptimizationLevel,
) -> Result<(), OptimizationError> {
    use llvm_sys::transforms::pass_builder::{
        LLVMPassBuilderOptionsSetLoopUnrolling, LLVMPassBuilderOptionsSetLoopVectorization,
        LLVMPassBuilderOptionsSetSLPVectorization, LLVMRunPasses,
    };

    let guard = PassBuilderOptionsGuard::new()
        .ok_or(OptimizationError::PassBuilderOptionsCreationFailed)?;

    unsafe {
        LLVMPassBuilderOptionsSetLoopVectorization(
            guard.as_ptr(),
            level.enables_vectorization().into(),
        );
        LLVMPassBuilderOptionsSetSLPVectorization(
            guard.as_ptr(),
            level.enables_vectorization().into(),
        );
        LLVMPassBuilderOptionsSetLoopUnrolling(
            guard.as_ptr(),
            level.enables_loop_unrolling().into(),
        );
    }

    let pipeline = level.pipeline_string();
    let pipeline_cstr = CString::new(pipeline).map_err(|_| OptimizationError::InvalidPipeline {
        pipeline: pipeline.to_string(),
        message: "pipeline contains null bytes".to_string(),
    })?;

    let module_ref = module.as_mut_ptr();
    let tm_ref = target_machine.as_mut_ptr();

    debug!(pipeline, "running optimization passes");
    let error =
        unsafe { LLVMRunPasses(module_ref, pipeline_cstr.as_ptr(), tm_ref, guard.as_ptr()) };

    if !error.is_null() {
        let message = unsafe { extract_llvm_error_message(error) };
        return Err(OptimizationError::PassesFailed { message });
    }

    Ok(())
}
