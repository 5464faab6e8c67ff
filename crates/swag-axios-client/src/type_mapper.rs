use swag_core::ir::{IrObject, IrType};
use swag_core::transform::name_normalizer::is_valid_identifier;

use crate::emitters::text::js_string;

/// Map an `IrType` to its TypeScript type string representation.
pub fn ir_type_to_ts(ir_type: &IrType) -> String {
    match ir_type {
        IrType::String | IrType::DateTime => "string".to_string(),
        IrType::StringLiteral(s) => js_string(s),
        IrType::Number | IrType::Integer => "number".to_string(),
        IrType::Boolean => "boolean".to_string(),
        IrType::Null => "null".to_string(),
        IrType::Binary => "Blob".to_string(),
        IrType::Any => "any".to_string(),
        IrType::Ref(name) => name.clone(),
        IrType::Array(inner) => format!("{}[]", grouped(inner)),
        IrType::Map(value_type) => index_signature(value_type),
        IrType::Object(object) => object_literal(object),
        IrType::Union(variants) => join_variants(variants, " | "),
        IrType::Intersection(parts) => join_variants(parts, " & "),
    }
}

/// Property key as written in an object type: bare when it is a valid
/// identifier, quoted otherwise.
pub fn property_key(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

fn grouped(ir_type: &IrType) -> String {
    match ir_type {
        IrType::Union(v) | IrType::Intersection(v) if v.len() > 1 => {
            format!("({})", ir_type_to_ts(ir_type))
        }
        _ => ir_type_to_ts(ir_type),
    }
}

fn join_variants(variants: &[IrType], separator: &str) -> String {
    if variants.is_empty() {
        return "any".to_string();
    }
    variants
        .iter()
        .map(grouped)
        .collect::<Vec<_>>()
        .join(separator)
}

fn index_signature(value_type: &IrType) -> String {
    format!("{{ [x: string]: {} }}", ir_type_to_ts(value_type))
}

fn object_literal(object: &IrObject) -> String {
    if object.properties.is_empty() {
        return match &object.additional_properties {
            Some(value_type) => index_signature(value_type),
            None => index_signature(&IrType::Any),
        };
    }
    let mut members: Vec<String> = object
        .properties
        .iter()
        .map(|(name, prop)| {
            let optional = if prop.required { "" } else { "?" };
            format!(
                "{}{optional}: {}",
                property_key(name),
                ir_type_to_ts(&prop.property_type)
            )
        })
        .collect();
    if let Some(value_type) = &object.additional_properties {
        members.push(format!("[x: string]: {}", ir_type_to_ts(value_type)));
    }
    format!("{{ {} }}", members.join("; "))
}
