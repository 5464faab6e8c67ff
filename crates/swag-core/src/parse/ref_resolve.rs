use std::collections::HashSet;

use super::components::Components;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// Prefix shared by every local component reference.
pub const COMPONENTS_PREFIX: &str = "#/components/";

/// Looks up `$ref` targets in the document's components table. Schema
/// references are never inlined: generated code refers to them by name.
#[derive(Debug, Clone, Copy)]
pub struct ComponentLookup<'a> {
    components: Option<&'a Components>,
}

enum Step<'a, T> {
    Found(&'a T),
    Next(&'a str),
}

impl<'a> ComponentLookup<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    pub fn components(&self) -> Option<&'a Components> {
        self.components
    }

    pub fn parameter(&self, ref_path: &str) -> Result<&'a Parameter, ResolveError> {
        let components = self.components;
        follow(ref_path, "parameters", |name| {
            match components?.parameters.get(name)? {
                ParameterOrRef::Parameter(p) => Some(Step::Found(p)),
                ParameterOrRef::Ref { ref_path } => Some(Step::Next(ref_path)),
            }
        })
    }

    pub fn request_body(&self, ref_path: &str) -> Result<&'a RequestBody, ResolveError> {
        let components = self.components;
        follow(ref_path, "requestBodies", |name| {
            match components?.request_bodies.get(name)? {
                RequestBodyOrRef::RequestBody(body) => Some(Step::Found(body)),
                RequestBodyOrRef::Ref { ref_path } => Some(Step::Next(ref_path)),
            }
        })
    }

    pub fn response(&self, ref_path: &str) -> Result<&'a Response, ResolveError> {
        let components = self.components;
        follow(ref_path, "responses", |name| {
            match components?.responses.get(name)? {
                ResponseOrRef::Response(resp) => Some(Step::Found(resp)),
                ResponseOrRef::Ref { ref_path } => Some(Step::Next(ref_path)),
            }
        })
    }
}

fn follow<'a, T>(
    ref_path: &str,
    section: &str,
    get: impl Fn(&str) -> Option<Step<'a, T>>,
) -> Result<&'a T, ResolveError> {
    let mut visited = HashSet::new();
    let mut current = ref_path.to_string();
    loop {
        if !visited.insert(current.clone()) {
            return Err(ResolveError::CircularRef(ref_path.to_string()));
        }
        let name = parse_ref_name(&current, section)?;
        match get(name) {
            Some(Step::Found(target)) => return Ok(target),
            Some(Step::Next(next)) => current = next.to_string(),
            None => return Err(ResolveError::RefTargetNotFound(ref_path.to_string())),
        }
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
pub fn parse_ref_name<'r>(
    ref_path: &'r str,
    expected_section: &str,
) -> Result<&'r str, ResolveError> {
    let (section, name) = split_ref(ref_path)?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}

/// Split a local component reference into `(section, name)`.
pub fn split_ref(ref_path: &str) -> Result<(&str, &str), ResolveError> {
    ref_path
        .strip_prefix(COMPONENTS_PREFIX)
        .and_then(|rest| rest.split_once('/'))
        .filter(|(_, name)| !name.is_empty())
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> OpenApiSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_ref_name() {
        assert_eq!(
            parse_ref_name("#/components/parameters/limit", "parameters").unwrap(),
            "limit"
        );
        assert!(parse_ref_name("#/components/schemas/Pet", "parameters").is_err());
        assert!(parse_ref_name("#/definitions/Pet", "schemas").is_err());
        assert!(parse_ref_name("#/components/schemas/", "schemas").is_err());
    }

    #[test]
    fn test_follows_transitive_parameter_refs() {
        let spec = spec(
            r##"{
            "components": { "parameters": {
                "alias": { "$ref": "#/components/parameters/limit" },
                "limit": { "name": "limit", "in": "query", "schema": { "type": "integer" } }
            } }
        }"##,
        );
        let lookup = ComponentLookup::new(&spec);
        let param = lookup.parameter("#/components/parameters/alias").unwrap();
        assert_eq!(param.name, "limit");
    }

    #[test]
    fn test_detects_circular_refs() {
        let spec = spec(
            r##"{
            "components": { "requestBodies": {
                "A": { "$ref": "#/components/requestBodies/B" },
                "B": { "$ref": "#/components/requestBodies/A" }
            } }
        }"##,
        );
        let lookup = ComponentLookup::new(&spec);
        assert!(matches!(
            lookup.request_body("#/components/requestBodies/A"),
            Err(ResolveError::CircularRef(_))
        ));
    }

    #[test]
    fn test_missing_target() {
        let spec = spec("{}");
        let lookup = ComponentLookup::new(&spec);
        assert!(matches!(
            lookup.response("#/components/responses/NotFound"),
            Err(ResolveError::RefTargetNotFound(_))
        ));
    }
}
