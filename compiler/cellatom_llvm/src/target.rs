//! Native target setup.
//!
//! The generated code only ever runs in-process, so the target is always the
//! host: default triple, host CPU name and host CPU features.

use std::sync::Once;

use inkwell::targets::{
    CodeModel, InitializationConfig, RelocMode, Target, TargetMachine, TargetTriple,
};
use tracing::debug;

use crate::{CodegenError, OptimizationLevel};

static NATIVE_TARGET_INIT: Once = Once::new();

/// Initialize the native LLVM target.
///
/// Safe to call multiple times; initialization happens once.
pub fn initialize_native_target() -> Result<(), CodegenError> {
    let mut result = Ok(());

    NATIVE_TARGET_INIT.call_once(|| {
        if let Err(e) = Target::initialize_native(&InitializationConfig::default()) {
            result = Err(CodegenError::TargetInit(e));
        }
    });

    result
}

/// Host triple as reported by LLVM.
pub fn host_triple() -> TargetTriple {
    TargetMachine::get_default_triple()
}

/// Create a target machine for the host, tuned for `level`.
pub fn native_target_machine(level: OptimizationLevel) -> Result<TargetMachine, CodegenError> {
    initialize_native_target()?;

    let triple = host_triple();
    let triple_name = triple.as_str().to_string_lossy().into_owned();
    let target = Target::from_triple(&triple)
        .map_err(|e| CodegenError::TargetMachine(format!("failed to get target: {e}")))?;
    let cpu = TargetMachine::get_host_cpu_name().to_string();
    let features = TargetMachine::get_host_cpu_features().to_string();
    debug!(triple = %triple_name, cpu = %cpu, "creating native target machine");

    target
        .create_target_machine(
            &triple,
            &cpu,
            &features,
            level.into(),
            RelocMode::Default,
            CodeModel::JITDefault,
        )
        .ok_or_else(|| {
            CodegenError::TargetMachine(format!(
                "LLVM returned None for target '{triple_name}' with CPU '{cpu}'"
            ))
        })
}
