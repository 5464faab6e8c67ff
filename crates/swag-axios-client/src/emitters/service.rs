use minijinja::context;
use swag_core::error::GeneratorError;
use swag_core::ir::{IrEndpoint, IrSpec};
use swag_core::transform::unwrap_envelope;

use super::text::{escape_jsdoc, js_string, jsdoc, sort_by_route, used_type_names};
use super::{heading, render_template};
use crate::type_mapper::ir_type_to_ts;

/// Emit the request-function artifact: banner, type imports, the route
/// helper, shared constants and one function per endpoint, sorted by route.
pub fn emit_service(ir: &IrSpec, dev_flag: &str) -> Result<String, GeneratorError> {
    let endpoints = sort_by_route(&ir.endpoints);
    let contexts: Vec<minijinja::Value> = endpoints
        .iter()
        .map(|ep| endpoint_context(ep, ir))
        .collect();

    let body = render_template(
        "endpoints.ts.j2",
        include_str!("../../templates/endpoints.ts.j2"),
        context! {
            endpoints => contexts,
            dev_flag => dev_flag,
        },
    )?;
    let imports = used_type_names(&body, &ir.types);

    let constants: Vec<minijinja::Value> = ir
        .constants
        .iter()
        .map(|c| context! { name => c.name.clone(), value => c.value.clone() })
        .collect();

    render_template(
        "service.ts.j2",
        include_str!("../../templates/service.ts.j2"),
        context! {
            heading => heading(&ir.info),
            imports => imports,
            uses_form => ir.endpoints.iter().any(IrEndpoint::has_form_body),
            constants => constants,
            body => body.trim_end(),
        },
    )
}

/// Return type of the generated function, after envelope unwrapping.
pub fn response_type(endpoint: &IrEndpoint, ir: &IrSpec) -> String {
    endpoint
        .response
        .as_ref()
        .map(|ty| ir_type_to_ts(&unwrap_envelope(ty, &ir.types)))
        .unwrap_or_else(|| "any".to_string())
}

/// One argument of a generated request function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ts_type: String,
    pub optional: bool,
    pub doc: Option<String>,
}

impl Param {
    fn new(name: &str, ts_type: String, optional: bool) -> Self {
        Self {
            name: name.to_string(),
            ts_type,
            optional,
            doc: None,
        }
    }

    /// `name?: Type` with the optional marker only when needed.
    pub fn signature(&self) -> String {
        let optional = if self.optional { "?" } else { "" };
        format!("{}{optional}: {}", self.name, self.ts_type)
    }

    /// Signature prefixed by an inline doc comment, if any.
    pub fn declaration(&self) -> String {
        match &self.doc {
            Some(doc) => format!("/** {} */ {}", escape_jsdoc(doc), self.signature()),
            None => self.signature(),
        }
    }
}

/// Arguments in call order: path parameters, body, query group, then header
/// group. The trailing request options are not included.
pub fn endpoint_params(endpoint: &IrEndpoint) -> Vec<Param> {
    let mut params: Vec<Param> = endpoint
        .path_params
        .iter()
        .map(|p| Param {
            doc: p
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            ..Param::new(&p.ident, ir_type_to_ts(&p.param_type), !p.required)
        })
        .collect();

    if let Some(body) = &endpoint.request_body {
        params.push(Param::new("body", ir_type_to_ts(body), false));
    }
    if let Some(query_type) = &endpoint.query_params_type {
        params.push(Param::new(
            "params",
            query_type.clone(),
            endpoint.query_params_nullable,
        ));
    }
    if let Some(header_type) = &endpoint.header_params_type {
        params.push(Param::new(
            "headers",
            header_type.clone(),
            endpoint.header_params_nullable,
        ));
    }
    params
}

/// Make `params` valid as positional arguments: an optional argument that
/// precedes a required one becomes required with `| undefined` added.
pub fn positional(mut params: Vec<Param>) -> Vec<Param> {
    let mut required_after = false;
    for param in params.iter_mut().rev() {
        if !param.optional {
            required_after = true;
        } else if required_after {
            param.optional = false;
            param.ts_type = format!("{} | undefined", param.ts_type);
        }
    }
    params
}

/// Rendered parameter declarations, ending with the request options.
pub fn param_list(endpoint: &IrEndpoint) -> Vec<String> {
    let mut params: Vec<String> = positional(endpoint_params(endpoint))
        .iter()
        .map(Param::declaration)
        .collect();
    params.push("options?: RequestOptions".to_string());
    params
}

fn endpoint_context(endpoint: &IrEndpoint, ir: &IrSpec) -> minijinja::Value {
    let name = &endpoint.service_name;
    let url = match &endpoint.path_params_map {
        Some(map) => format!("template({name}.key, {map})"),
        None => format!("{name}.key"),
    };
    let data = endpoint.request_body.as_ref().map(|_| {
        if endpoint.has_form_body() {
            "objToForm(body)".to_string()
        } else {
            "body".to_string()
        }
    });

    context! {
        name => name.clone(),
        doc => jsdoc(
            endpoint.summary.as_deref(),
            endpoint.description.as_deref(),
            endpoint.deprecated,
            "",
        ),
        params => param_list(endpoint),
        return_type => response_type(endpoint, ir),
        deprecated => endpoint.deprecated,
        method => endpoint.method.as_key(),
        url => url,
        config_constant => endpoint.config_constant.clone(),
        has_headers => endpoint.header_params_type.is_some(),
        has_query => endpoint.query_params_type.is_some(),
        data => data,
        security_constant => endpoint.security_constant.clone(),
        route => js_string(&endpoint.route),
    }
}
