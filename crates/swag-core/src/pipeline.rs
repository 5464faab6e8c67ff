//! One generation run: document in, three text artifacts out.
//!
//! A run never returns partial output. A transform failure empties every
//! artifact; a generator failure empties only its own artifact.

use crate::CodeGenerator;
use crate::config::SwagConfig;
use crate::error::TransformError;
use crate::ir::IrSpec;
use crate::parse;
use crate::transform::{TransformOptions, transform_with_options};

/// The three generated buffers. An empty string means the artifact was not
/// produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    /// Request functions.
    pub code: String,
    /// Type declarations.
    pub types: String,
    /// Reactive hooks, produced only when `react_hooks` is enabled.
    pub hooks: String,
}

/// Generators used for each artifact.
pub struct Generators<'g> {
    pub service: &'g dyn CodeGenerator,
    pub types: &'g dyn CodeGenerator,
    pub hooks: Option<&'g dyn CodeGenerator>,
}

/// Decode and transform a document.
pub fn build_ir(document: serde_json::Value, config: &SwagConfig) -> Result<IrSpec, TransformError> {
    let spec = parse::from_value(document)?;
    transform_with_options(&spec, &TransformOptions::from(config))
}

/// Run the whole pipeline. Errors are logged, never returned.
pub fn generate(
    document: serde_json::Value,
    config: &SwagConfig,
    generators: &Generators<'_>,
) -> Artifacts {
    let ir = match build_ir(document, config) {
        Ok(ir) => ir,
        Err(err) => {
            log::error!("generation aborted: {err}");
            return Artifacts::default();
        }
    };

    let hooks = match generators.hooks {
        Some(generator) if config.react_hooks => render(generator, &ir, config),
        _ => String::new(),
    };

    Artifacts {
        code: render(generators.service, &ir, config),
        types: render(generators.types, &ir, config),
        hooks,
    }
}

fn render(generator: &dyn CodeGenerator, ir: &IrSpec, config: &SwagConfig) -> String {
    match generator.generate(ir, config) {
        Ok(text) => text,
        Err(err) => {
            log::error!("{} generation failed: {err}", generator.name());
            String::new()
        }
    }
}
