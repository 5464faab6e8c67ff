use swag_core::config::SwagConfig;
use swag_core::error::GeneratorError;
use swag_core::ir::IrSpec;
use swag_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

pub const HOOKS_CONFIG_FILE: &str = "hooksConfig.ts";

/// React Query hooks wrapping the generated request functions.
pub struct ReactQueryHooksGenerator;

impl ReactQueryHooksGenerator {
    /// Option types the hooks import. Written once, then owned by the user.
    pub fn runtime_files(&self) -> Vec<GeneratedFile> {
        vec![GeneratedFile {
            path: HOOKS_CONFIG_FILE.to_string(),
            content: include_str!("../templates/hooksConfig.ts").to_string(),
            overwrite: false,
        }]
    }
}

impl CodeGenerator for ReactQueryHooksGenerator {
    fn name(&self) -> &'static str {
        "hooks"
    }

    fn generate(&self, ir: &IrSpec, config: &SwagConfig) -> Result<String, GeneratorError> {
        emitters::hooks::emit_hooks(ir, &config.hooks.page_param)
    }
}
