use std::collections::HashSet;

use crate::error::ResolveError;
use crate::ir::{IrObject, IrParameter, IrParameterLocation, IrProperty, IrType};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::ComponentLookup;

use super::name_normalizer::{normalize_name, to_identifier};
use super::schema_resolver::{ref_type_name, schema_or_ref_to_ir_type};

/// Argument names generated functions and hooks declare next to the path
/// parameters.
pub const RESERVED_ARGUMENTS: [&str; 5] = ["body", "params", "headers", "options", "configOverride"];

/// Parameters of one operation, partitioned by location. Each bucket keeps
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedParameters {
    pub path: Vec<IrParameter>,
    pub query: Vec<IrParameter>,
    pub header: Vec<IrParameter>,
}

impl ClassifiedParameters {
    /// The query group may be omitted only if every query parameter is optional.
    pub fn query_nullable(&self) -> bool {
        self.query.iter().all(|p| !p.required)
    }

    /// Set when any header parameter is optional.
    pub fn header_nullable(&self) -> bool {
        self.header.iter().any(|p| !p.required)
    }

    /// `{ petId, "owner-id": ownerId }` literal binding placeholders to
    /// arguments; `None` without path parameters.
    pub fn path_params_map(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        let entries: Vec<String> = self
            .path
            .iter()
            .map(|p| {
                if p.name == p.ident {
                    p.ident.clone()
                } else {
                    format!("\"{}\": {}", p.name.replace('"', "\\\""), p.ident)
                }
            })
            .collect();
        Some(format!("{{ {} }}", entries.join(", ")))
    }
}

/// Resolve `$ref` parameters and split path-level plus operation-level
/// parameters by location. An operation parameter replaces a path-level one
/// with the same name and location. Cookie parameters are dropped, as are
/// headers on the ignore list.
pub fn classify_parameters(
    lookup: &ComponentLookup<'_>,
    path_level: &[ParameterOrRef],
    operation_level: &[ParameterOrRef],
    ignored_headers: &[String],
) -> Result<ClassifiedParameters, ResolveError> {
    let mut merged: Vec<IrParameter> = Vec::new();
    for param in path_level.iter().chain(operation_level) {
        let Some(resolved) = resolve_parameter(lookup, param)? else {
            continue;
        };
        match merged
            .iter_mut()
            .find(|p| p.name == resolved.name && p.location == resolved.location)
        {
            Some(existing) => *existing = resolved,
            None => merged.push(resolved),
        }
    }

    let mut classified = ClassifiedParameters::default();
    for param in merged {
        match param.location {
            IrParameterLocation::Path => classified.path.push(param),
            IrParameterLocation::Query => classified.query.push(param),
            IrParameterLocation::Header => {
                if ignored_headers
                    .iter()
                    .any(|h| h.eq_ignore_ascii_case(&param.name))
                {
                    log::debug!("ignoring header parameter {}", param.name);
                    continue;
                }
                classified.header.push(param);
            }
        }
    }
    disambiguate_idents(&mut classified.path);
    Ok(classified)
}

/// Append `_` to path parameter identifiers until none collides with a
/// reserved argument or an earlier path parameter. Placeholder names are kept.
fn disambiguate_idents(path: &mut [IrParameter]) {
    let mut taken: HashSet<String> = RESERVED_ARGUMENTS.iter().map(|s| s.to_string()).collect();
    for param in path.iter_mut() {
        if taken.contains(&param.ident) {
            let original = param.ident.clone();
            while taken.contains(&param.ident) {
                param.ident.push('_');
            }
            log::debug!("path parameter {} bound as {}", original, param.ident);
        }
        taken.insert(param.ident.clone());
    }
}

/// Resolve one parameter. A reference keeps the looked-up definition's name,
/// location and flags but is typed by the referenced parameter's own type
/// declaration.
pub fn resolve_parameter(
    lookup: &ComponentLookup<'_>,
    param: &ParameterOrRef,
) -> Result<Option<IrParameter>, ResolveError> {
    match param {
        ParameterOrRef::Ref { ref_path } => {
            let definition = lookup.parameter(ref_path)?;
            Ok(to_ir_parameter(
                definition,
                IrType::Ref(ref_type_name(ref_path)),
            ))
        }
        ParameterOrRef::Parameter(p) => {
            let param_type = p
                .schema
                .as_ref()
                .map(schema_or_ref_to_ir_type)
                .unwrap_or(IrType::Any);
            Ok(to_ir_parameter(p, param_type))
        }
    }
}

fn to_ir_parameter(param: &Parameter, param_type: IrType) -> Option<IrParameter> {
    let location = match param.location {
        ParameterLocation::Path => IrParameterLocation::Path,
        ParameterLocation::Query => IrParameterLocation::Query,
        ParameterLocation::Header => IrParameterLocation::Header,
        ParameterLocation::Cookie => return None,
    };
    Some(IrParameter {
        name: param.name.clone(),
        ident: to_identifier(&param.name),
        location,
        param_type,
        required: param.required,
        description: param.description.clone(),
    })
}

/// Object shape mirroring a parameter group: one property per parameter,
/// optional unless the parameter is required.
pub fn params_object(params: &[IrParameter]) -> IrType {
    let properties = params
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                IrProperty {
                    property_type: p.param_type.clone(),
                    required: p.required,
                    description: p.description.clone(),
                },
            )
        })
        .collect();
    IrType::Object(IrObject {
        properties,
        additional_properties: None,
    })
}

pub fn query_type_name(service_name: &str) -> String {
    format!("{}QueryParams", normalize_name(service_name).pascal_case)
}

pub fn header_type_name(service_name: &str) -> String {
    format!("{}HeaderParams", normalize_name(service_name).pascal_case)
}
