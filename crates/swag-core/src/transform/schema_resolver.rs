use indexmap::IndexMap;

use crate::ir::{IrObject, IrProperty, IrType};
use crate::parse::ref_resolve::split_ref;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};

use super::name_normalizer::normalize_name;

/// Name of a type declaration derived from a component key.
pub fn type_name(name: &str) -> String {
    normalize_name(name).pascal_case
}

/// Name under which a `components.requestBodies` entry is declared.
pub fn request_body_type_name(name: &str) -> String {
    format!("RequestBody{}", type_name(name))
}

/// Name of the type declaration a `$ref` points at. Unknown reference
/// formats fall back to their last path segment.
pub fn ref_type_name(ref_path: &str) -> String {
    match split_ref(ref_path) {
        Ok(("requestBodies", name)) => request_body_type_name(name),
        Ok((_, name)) => type_name(name),
        Err(_) => type_name(ref_path.rsplit('/').next().unwrap_or(ref_path)),
    }
}

/// Convert a parsed `SchemaOrRef` to an `IrType`.
pub fn schema_or_ref_to_ir_type(schema_or_ref: &SchemaOrRef) -> IrType {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => IrType::Ref(ref_type_name(ref_path)),
        SchemaOrRef::Schema(schema) => schema_to_ir_type(schema),
    }
}

/// Convert a parsed `Schema` to an `IrType`, honouring `nullable: true`.
pub fn schema_to_ir_type(schema: &Schema) -> IrType {
    let base = base_type(schema);
    if schema.nullable != Some(true) {
        return base;
    }
    match base {
        IrType::Null | IrType::Any => base,
        IrType::Union(mut variants) => {
            if !variants.contains(&IrType::Null) {
                variants.push(IrType::Null);
            }
            IrType::Union(variants)
        }
        other => IrType::Union(vec![other, IrType::Null]),
    }
}

fn base_type(schema: &Schema) -> IrType {
    // Handle composition first
    if !schema.one_of.is_empty() {
        let variants: Vec<IrType> = schema.one_of.iter().map(schema_or_ref_to_ir_type).collect();
        return IrType::Union(variants);
    }
    if !schema.any_of.is_empty() {
        let variants: Vec<IrType> = schema.any_of.iter().map(schema_or_ref_to_ir_type).collect();
        return IrType::Union(variants);
    }
    if !schema.all_of.is_empty() {
        if schema.all_of.len() == 1 && schema.properties.is_empty() {
            return schema_or_ref_to_ir_type(&schema.all_of[0]);
        }
        let mut parts: Vec<IrType> = schema.all_of.iter().map(schema_or_ref_to_ir_type).collect();
        // Extra properties declared next to allOf
        if !schema.properties.is_empty() {
            parts.push(IrType::Object(build_object(
                &schema.properties,
                &schema.required,
                None,
            )));
        }
        return IrType::Intersection(parts);
    }

    // Handle enum
    if !schema.enum_values.is_empty() {
        let string_variants: Vec<String> = schema
            .enum_values
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect();
        if string_variants.len() == schema.enum_values.len() {
            let mut literals: Vec<IrType> = string_variants
                .into_iter()
                .map(IrType::StringLiteral)
                .collect();
            return if literals.len() == 1 {
                literals.remove(0)
            } else {
                IrType::Union(literals)
            };
        }
        // Numeric or mixed enums keep their declared type
        return base_type(&Schema {
            enum_values: Vec::new(),
            ..schema.clone()
        });
    }

    // Handle const
    if let Some(ref val) = schema.const_value {
        if let Some(s) = val.as_str() {
            return IrType::StringLiteral(s.to_string());
        }
        return IrType::Any;
    }

    match &schema.schema_type {
        Some(TypeSet::Single(t)) => single_type(t, schema),
        Some(TypeSet::Multiple(types)) => {
            let mut variants: Vec<IrType> = types.iter().map(|t| single_type(t, schema)).collect();
            if variants.len() == 1 {
                variants.remove(0)
            } else {
                IrType::Union(variants)
            }
        }
        None => {
            // No type specified; infer from the keywords present
            if !schema.properties.is_empty() || schema.additional_properties.is_some() {
                resolve_object_type(schema)
            } else if let Some(ref items) = schema.items {
                IrType::Array(Box::new(schema_or_ref_to_ir_type(items)))
            } else {
                IrType::Any
            }
        }
    }
}

fn single_type(t: &SchemaType, schema: &Schema) -> IrType {
    match t {
        SchemaType::String => match schema.format.as_deref() {
            Some("date-time" | "date") => IrType::DateTime,
            Some("binary") => IrType::Binary,
            _ => IrType::String,
        },
        SchemaType::Number => IrType::Number,
        SchemaType::Integer => IrType::Integer,
        SchemaType::Boolean => IrType::Boolean,
        SchemaType::Null => IrType::Null,
        SchemaType::Array => match &schema.items {
            Some(items) => IrType::Array(Box::new(schema_or_ref_to_ir_type(items))),
            None => IrType::Array(Box::new(IrType::Any)),
        },
        SchemaType::Object => resolve_object_type(schema),
    }
}

fn resolve_object_type(schema: &Schema) -> IrType {
    let additional = match &schema.additional_properties {
        Some(AdditionalProperties::Schema(s)) => Some(schema_or_ref_to_ir_type(s)),
        Some(AdditionalProperties::Bool(true)) => Some(IrType::Any),
        Some(AdditionalProperties::Bool(false)) | None => None,
    };

    match additional {
        Some(value) if schema.properties.is_empty() => IrType::Map(Box::new(value)),
        additional => IrType::Object(build_object(
            &schema.properties,
            &schema.required,
            additional,
        )),
    }
}

fn build_object(
    properties: &IndexMap<String, SchemaOrRef>,
    required: &[String],
    additional: Option<IrType>,
) -> IrObject {
    let properties = properties
        .iter()
        .map(|(name, prop)| {
            let description = match prop {
                SchemaOrRef::Schema(s) => s.description.clone(),
                SchemaOrRef::Ref { .. } => None,
            };
            let property = IrProperty {
                property_type: schema_or_ref_to_ir_type(prop),
                required: required.contains(name),
                description,
            };
            (name.clone(), property)
        })
        .collect();

    IrObject {
        properties,
        additional_properties: additional.map(Box::new),
    }
}
