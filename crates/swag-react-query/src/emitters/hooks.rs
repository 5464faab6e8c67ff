use minijinja::context;
use swag_axios_client::emitters::service::{Param, endpoint_params, positional, response_type};
use swag_axios_client::emitters::text::{jsdoc, sort_by_route, used_type_names};
use swag_axios_client::emitters::{heading, render_template};
use swag_axios_client::type_mapper::property_key;
use swag_core::error::GeneratorError;
use swag_core::ir::{HttpMethod, IrEndpoint, IrSpec};
use swag_core::transform::name_normalizer::normalize_name;

/// Module the hooks import request functions from.
pub const SERVICE_MODULE: &str = "./services";

/// Emit the hooks artifact: a `useQuery` hook (with a `prefetch` helper) per
/// GET endpoint, an extra `useInfiniteQuery` hook for GET endpoints taking
/// `page_param` as a query parameter, and a `useMutation` hook for every
/// other method.
pub fn emit_hooks(ir: &IrSpec, page_param: &str) -> Result<String, GeneratorError> {
    let endpoints = sort_by_route(&ir.endpoints);
    let hooks: Vec<minijinja::Value> = endpoints
        .iter()
        .map(|ep| hook_context(ep, ir, page_param))
        .collect();

    let body = render_template(
        "hook_bodies.ts.j2",
        include_str!("../../templates/hook_bodies.ts.j2"),
        context! { hooks => hooks },
    )?;

    let has_query = endpoints.iter().any(|ep| is_query(ep));
    let has_mutation = endpoints.iter().any(|ep| !is_query(ep));
    let has_infinite = endpoints.iter().any(|ep| is_paginated(ep, page_param));
    let mut react_imports = Vec::new();
    let mut config_imports = Vec::new();
    if has_infinite {
        react_imports.push("useInfiniteQuery");
        config_imports.push("InfiniteHookOptions");
    }
    if has_mutation {
        react_imports.push("useMutation");
        config_imports.push("MutationHookOptions");
    }
    if has_query {
        config_imports.push("QueryHookOptions");
        react_imports.push("useQuery");
    }

    let services: Vec<&str> = endpoints
        .iter()
        .map(|ep| ep.service_name.as_str())
        .collect();

    render_template(
        "hooks.ts.j2",
        include_str!("../../templates/hooks.ts.j2"),
        context! {
            heading => heading(&ir.info),
            react_imports => react_imports,
            has_query => has_query,
            has_infinite => has_infinite,
            config_imports => config_imports,
            services => services,
            service_module => SERVICE_MODULE,
            types => used_type_names(&body, &ir.types),
            body => body.trim_end(),
        },
    )
}

fn is_query(endpoint: &IrEndpoint) -> bool {
    endpoint.method == HttpMethod::Get
}

/// GET endpoints whose query group has the page parameter.
fn is_paginated(endpoint: &IrEndpoint, page_param: &str) -> bool {
    is_query(endpoint)
        && endpoint.query_params_type.is_some()
        && endpoint.query_params.iter().any(|p| p.name == page_param)
}

/// `useGetPetById` for `getPetById`.
pub fn hook_name(service_name: &str) -> String {
    format!("use{}", normalize_name(service_name).pascal_case)
}

fn hook_context(endpoint: &IrEndpoint, ir: &IrSpec, page_param: &str) -> minijinja::Value {
    let service = endpoint.service_name.clone();
    let return_type = response_type(endpoint, ir);
    let doc = jsdoc(
        endpoint.summary.as_deref(),
        endpoint.description.as_deref(),
        endpoint.deprecated,
        "",
    );

    if is_query(endpoint) {
        let params = positional(endpoint_params(endpoint));
        let declarations: Vec<String> = params.iter().map(Param::declaration).collect();
        let names: Vec<String> = params.iter().map(|p| p.name.clone()).collect();

        let mut hook_params = declarations.clone();
        hook_params.push(format!("options?: QueryHookOptions<{return_type}>"));
        hook_params.push("configOverride?: RequestOptions".to_string());

        let mut prefetch_params = vec!["queryClient: QueryClient".to_string()];
        prefetch_params.extend(declarations.iter().cloned());
        prefetch_params.push("configOverride?: RequestOptions".to_string());

        let mut key_items = vec![format!("{service}.key")];
        key_items.extend(names.iter().cloned());

        let mut call_args = names.clone();
        call_args.push("configOverride".to_string());

        let infinite = is_paginated(endpoint, page_param).then(|| {
            let mut infinite_params = declarations.clone();
            infinite_params.push(format!("options?: InfiniteHookOptions<{return_type}>"));
            infinite_params.push("configOverride?: RequestOptions".to_string());

            let mut infinite_key = vec![format!("{service}.key"), "\"infinite\"".to_string()];
            infinite_key.extend(names.iter().cloned());

            let page_key = property_key(page_param);
            let mut page_args: Vec<String> = names
                .iter()
                .map(|name| {
                    if name == "params" {
                        format!("{{ ...params, {page_key}: pageParam }}")
                    } else {
                        name.clone()
                    }
                })
                .collect();
            page_args.push("configOverride".to_string());

            context! {
                name => format!("{}Infinite", hook_name(&service)),
                params => infinite_params,
                key_items => infinite_key,
                call_args => page_args,
            }
        });

        context! {
            kind => "query",
            name => hook_name(&service),
            doc => doc,
            service => service,
            params => hook_params,
            prefetch_params => prefetch_params,
            key_items => key_items,
            call_args => call_args,
            infinite => infinite,
        }
    } else {
        let params = endpoint_params(endpoint);
        let mut members: Vec<String> = params.iter().map(Param::signature).collect();
        members.push("configOverride?: RequestOptions".to_string());
        let variables = format!("{{ {} }}", members.join("; "));

        let mut call_args: Vec<String> = params
            .iter()
            .map(|p| format!("variables.{}", p.name))
            .collect();
        call_args.push("variables.configOverride".to_string());

        context! {
            kind => "mutation",
            name => hook_name(&service),
            doc => doc,
            service => service,
            params => vec![format!("options?: MutationHookOptions<{return_type}, {variables}>")],
            variables => variables,
            call_args => call_args,
        }
    }
}
