pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod pipeline;
pub mod transform;

use config::SwagConfig;
use error::GeneratorError;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
    /// Whether an existing file at `path` should be replaced. User-editable
    /// files are only written once.
    pub overwrite: bool,
}

/// Renders one text artifact from the IR.
pub trait CodeGenerator {
    /// Label used in log messages.
    fn name(&self) -> &'static str;

    fn generate(&self, ir: &ir::IrSpec, config: &SwagConfig) -> Result<String, GeneratorError>;
}
