use swag_core::config::SwagConfig;
use swag_core::error::GeneratorError;
use swag_core::ir::IrSpec;
use swag_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

/// Request functions built on the axios runtime in `httpRequest.ts`.
pub struct AxiosServiceGenerator;

impl AxiosServiceGenerator {
    /// Runtime support files written next to the generated service.
    pub fn runtime_files(&self) -> Vec<GeneratedFile> {
        emitters::scaffold::emit_scaffold()
    }
}

impl CodeGenerator for AxiosServiceGenerator {
    fn name(&self) -> &'static str {
        "service"
    }

    fn generate(&self, ir: &IrSpec, config: &SwagConfig) -> Result<String, GeneratorError> {
        emitters::service::emit_service(ir, &config.dev_flag)
    }
}

/// Type declarations for every collected type descriptor.
pub struct TypesGenerator;

impl CodeGenerator for TypesGenerator {
    fn name(&self) -> &'static str {
        "types"
    }

    fn generate(&self, ir: &IrSpec, _config: &SwagConfig) -> Result<String, GeneratorError> {
        emitters::types::emit_types(ir)
    }
}
