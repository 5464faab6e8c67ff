pub mod scaffold;
pub mod service;
pub mod text;
pub mod types;

use minijinja::Environment;
use swag_core::error::GeneratorError;
use swag_core::ir::IrInfo;

/// Render a single embedded template.
pub fn render_template(
    name: &str,
    source: &str,
    ctx: minijinja::Value,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template(name, source).map_err(template_error)?;
    env.get_template(name)
        .and_then(|tmpl| tmpl.render(ctx))
        .map_err(template_error)
}

fn template_error(err: minijinja::Error) -> GeneratorError {
    GeneratorError::Template(err.to_string())
}

/// `Title version` line for file banners, escaped for use inside a doc
/// comment; empty when the document has neither.
pub fn heading(info: &IrInfo) -> String {
    let line = [info.title.as_str(), info.version.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    text::escape_jsdoc(&line)
}
