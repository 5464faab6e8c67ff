use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::SwagConfig;
use crate::error::TransformError;
use crate::ir::*;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::ParameterOrRef;
use crate::parse::ref_resolve::ComponentLookup;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::OpenApiSpec;

use super::constants::ConstantInterner;
use super::name_normalizer::{service_name, to_identifier};
use super::parameters::{
    classify_parameters, header_type_name, params_object, query_type_name,
};
use super::payload::resolve_payload;
use super::schema_resolver::{request_body_type_name, schema_or_ref_to_ir_type, type_name};

/// Options controlling naming and filtering during the transform phase.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Stripped once, case-insensitively, from the start of every route.
    pub prefix: Option<String>,
    pub naming_template: Option<String>,
    pub aliases: IndexMap<String, String>,
    pub ignored_header_params: Vec<String>,
}

impl From<&SwagConfig> for TransformOptions {
    fn from(config: &SwagConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            naming_template: config.naming.template.clone(),
            aliases: config.naming.aliases.clone(),
            ignored_header_params: config.ignore.header_params.clone(),
        }
    }
}

/// Transform a parsed OpenAPI spec into the IR record collections.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit options.
///
/// Paths and, within each path, methods are visited in document order.
/// Synthesized parameter types are collected as endpoints are built; named
/// components are appended afterwards.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    let mut ctx = TransformContext::new(spec, options);

    for (route, item) in &spec.paths {
        for (method, operation) in &item.operations {
            ctx.add_endpoint(route, item, *method, operation)?;
        }
    }
    ctx.add_component_types();

    let ir = ctx.finish();
    log::debug!(
        "transformed {} endpoints, {} types, {} constants",
        ir.endpoints.len(),
        ir.types.len(),
        ir.constants.len()
    );
    Ok(ir)
}

/// Remove `prefix` from the start of `route`, ignoring ASCII case. Applied
/// once; a route that does not start with the prefix is returned as is.
pub fn strip_route_prefix(route: &str, prefix: Option<&str>) -> String {
    let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
        return route.to_string();
    };
    match (route.get(..prefix.len()), route.get(prefix.len()..)) {
        (Some(head), Some(rest)) if head.eq_ignore_ascii_case(prefix) => {
            if rest.is_empty() {
                "/".to_string()
            } else {
                rest.to_string()
            }
        }
        _ => route.to_string(),
    }
}

/// Literal passed as the base request config of an endpoint.
fn config_literal(content_type: &str, accept: &str) -> String {
    format!(
        "{{ headers: {{ \"Content-Type\": {}, Accept: {} }} }}",
        serde_json::Value::from(content_type),
        serde_json::Value::from(accept)
    )
}

/// Per-run state. Every counter and accumulator lives here, so separate runs
/// never share anything.
struct TransformContext<'a> {
    spec: &'a OpenApiSpec,
    lookup: ComponentLookup<'a>,
    options: &'a TransformOptions,
    constants: ConstantInterner,
    endpoints: Vec<IrEndpoint>,
    types: Vec<IrTypeDef>,
    service_names: HashSet<String>,
}

impl<'a> TransformContext<'a> {
    fn new(spec: &'a OpenApiSpec, options: &'a TransformOptions) -> Self {
        Self {
            spec,
            lookup: ComponentLookup::new(spec),
            options,
            constants: ConstantInterner::new(),
            endpoints: Vec::new(),
            types: Vec::new(),
            service_names: HashSet::new(),
        }
    }

    fn add_endpoint(
        &mut self,
        raw_route: &str,
        item: &PathItem,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<(), TransformError> {
        let route = strip_route_prefix(raw_route, self.options.prefix.as_deref());
        let name = self.unique_service_name(&route, method, operation);

        let params = classify_parameters(
            &self.lookup,
            &item.parameters,
            &operation.parameters,
            &self.options.ignored_header_params,
        )?;

        let query_params_type = if params.query.is_empty() {
            None
        } else {
            Some(self.push_params_type(
                query_type_name(&name),
                params_object(&params.query),
                TypeOrigin::QueryParams,
            ))
        };
        let header_params_type = if params.header.is_empty() {
            None
        } else {
            Some(self.push_params_type(
                header_type_name(&name),
                params_object(&params.header),
                TypeOrigin::HeaderParams,
            ))
        };

        let payload = resolve_payload(&self.lookup, operation)?;
        let config_constant = self
            .constants
            .intern(config_literal(&payload.content_type, &payload.accept));
        let security_constant = self.security_constant(operation)?;

        let query_params_nullable = params.query_nullable();
        let header_params_nullable = params.header_nullable();
        let path_params_map = params.path_params_map();

        self.endpoints.push(IrEndpoint {
            service_name: name,
            method,
            route,
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            deprecated: operation.deprecated.unwrap_or(false),
            content_type: payload.content_type,
            accept: payload.accept,
            path_params: params.path,
            path_params_map,
            query_params: params.query,
            query_params_type,
            query_params_nullable,
            header_params_type,
            header_params_nullable,
            request_body: payload.request_body,
            response: payload.response,
            security_constant,
            config_constant,
        });
        Ok(())
    }

    /// Derive the service name, apply any alias and make it unique with a
    /// numeric suffix.
    fn unique_service_name(
        &mut self,
        route: &str,
        method: HttpMethod,
        operation: &Operation,
    ) -> String {
        let derived = service_name(
            route,
            method,
            operation.operation_id.as_deref(),
            self.options.naming_template.as_deref(),
        );
        let base = match self.options.aliases.get(&derived) {
            Some(alias) => to_identifier(alias),
            None => derived,
        };

        let mut name = base.clone();
        let mut suffix = 2;
        while !self.service_names.insert(name.clone()) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }
        if name != base {
            log::warn!("service name {base} already taken, using {name} for {method} {route}");
        }
        name
    }

    fn push_params_type(&mut self, name: String, schema: IrType, origin: TypeOrigin) -> String {
        self.types.push(IrTypeDef {
            name: name.clone(),
            schema,
            description: None,
            origin,
        });
        name
    }

    /// Operation security wins over document security. An empty requirement
    /// list means no security.
    fn security_constant(&mut self, operation: &Operation) -> Result<Option<String>, TransformError> {
        let security = operation.security.as_ref().or(self.spec.security.as_ref());
        match security {
            Some(requirements) if !requirements.is_empty() => {
                let literal = serde_json::to_string(requirements)
                    .map_err(|e| TransformError::Other(e.to_string()))?;
                Ok(Some(self.constants.intern(literal)))
            }
            _ => Ok(None),
        }
    }

    /// Append component schemas, named parameters and request bodies.
    /// Request bodies without a schema produce no declaration.
    fn add_component_types(&mut self) {
        let Some(components) = self.lookup.components() else {
            return;
        };

        for (name, schema_or_ref) in &components.schemas {
            let description = match schema_or_ref {
                SchemaOrRef::Schema(schema) => schema.description.clone(),
                SchemaOrRef::Ref { .. } => None,
            };
            self.types.push(IrTypeDef {
                name: type_name(name),
                schema: schema_or_ref_to_ir_type(schema_or_ref),
                description,
                origin: TypeOrigin::Component,
            });
        }

        for (name, param_or_ref) in &components.parameters {
            let param = match param_or_ref {
                ParameterOrRef::Parameter(param) => param,
                ParameterOrRef::Ref { ref_path } => match self.lookup.parameter(ref_path) {
                    Ok(param) => param,
                    Err(err) => {
                        log::warn!("skipping parameter component {name}: {err}");
                        continue;
                    }
                },
            };
            self.types.push(IrTypeDef {
                name: type_name(name),
                schema: param
                    .schema
                    .as_ref()
                    .map(schema_or_ref_to_ir_type)
                    .unwrap_or(IrType::Any),
                description: param.description.clone(),
                origin: TypeOrigin::Parameter,
            });
        }

        for (name, body_or_ref) in &components.request_bodies {
            let body = match body_or_ref {
                RequestBodyOrRef::RequestBody(body) => body,
                RequestBodyOrRef::Ref { ref_path } => match self.lookup.request_body(ref_path) {
                    Ok(body) => body,
                    Err(err) => {
                        log::warn!("skipping request body component {name}: {err}");
                        continue;
                    }
                },
            };
            let Some(schema) = body
                .first_media()
                .and_then(|(_, media)| media.schema.as_ref())
            else {
                continue;
            };
            self.types.push(IrTypeDef {
                name: request_body_type_name(name),
                schema: schema_or_ref_to_ir_type(schema),
                description: body.description.clone(),
                origin: TypeOrigin::RequestBody,
            });
        }
    }

    fn finish(self) -> IrSpec {
        IrSpec {
            info: IrInfo {
                title: self.spec.info.title.clone(),
                version: self.spec.info.version.clone(),
            },
            endpoints: self.endpoints,
            types: self.types,
            constants: self.constants.into_constants(),
        }
    }
}
