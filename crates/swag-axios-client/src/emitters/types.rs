use std::collections::HashSet;

use minijinja::context;
use swag_core::error::GeneratorError;
use swag_core::ir::{IrObject, IrSpec, IrType, IrTypeDef};

use super::text::jsdoc;
use super::{heading, render_template};
use crate::type_mapper::{ir_type_to_ts, property_key};

/// Emit the type-declaration artifact. Objects with properties become
/// interfaces, everything else a type alias. A name declared twice keeps its
/// first declaration.
pub fn emit_types(ir: &IrSpec) -> Result<String, GeneratorError> {
    let mut seen = HashSet::new();
    let declarations: Vec<minijinja::Value> = ir
        .types
        .iter()
        .filter(|def| {
            let fresh = seen.insert(def.name.as_str());
            if !fresh {
                log::debug!(
                    "skipping duplicate {} declaration {}",
                    def.origin.as_str(),
                    def.name
                );
            }
            fresh
        })
        .map(declaration_context)
        .collect();

    render_template(
        "types.ts.j2",
        include_str!("../../templates/types.ts.j2"),
        context! {
            heading => heading(&ir.info),
            declarations => declarations,
        },
    )
}

fn declaration_context(def: &IrTypeDef) -> minijinja::Value {
    let doc = jsdoc(None, def.description.as_deref(), false, "");
    match &def.schema {
        IrType::Object(object) if !object.properties.is_empty() => context! {
            kind => "interface",
            name => def.name.clone(),
            doc => doc,
            members => members(object),
            index_type => object.additional_properties.as_deref().map(ir_type_to_ts),
        },
        other => context! {
            kind => "alias",
            name => def.name.clone(),
            doc => doc,
            ts_type => ir_type_to_ts(other),
        },
    }
}

fn members(object: &IrObject) -> Vec<minijinja::Value> {
    object
        .properties
        .iter()
        .map(|(name, prop)| {
            context! {
                key => property_key(name),
                required => prop.required,
                ts_type => ir_type_to_ts(&prop.property_type),
                doc => jsdoc(None, prop.description.as_deref(), false, "  "),
            }
        })
        .collect()
}
