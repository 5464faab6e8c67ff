pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod spec;

use crate::error::ParseError;
use spec::OpenApiSpec;

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Decode an already-parsed JSON value. No version check is made here; the
/// generation pipeline accepts whatever shape deserializes.
pub fn from_value(input: serde_json::Value) -> Result<OpenApiSpec, ParseError> {
    Ok(serde_json::from_value(input)?)
}

fn validate_version(spec: &OpenApiSpec) -> Result<(), ParseError> {
    if spec.openapi.is_empty() {
        return Err(ParseError::MissingField("openapi".to_string()));
    }
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(spec.openapi.clone()));
    }
    Ok(())
}

/// Read a document as a generic JSON value. YAML is a superset of JSON, so
/// both formats go through the YAML parser unless the input is plainly JSON.
pub fn document_from_str(input: &str) -> Result<serde_json::Value, ParseError> {
    if input.trim_start().starts_with('{') {
        Ok(serde_json::from_str(input)?)
    } else {
        Ok(serde_yaml_ng::from_str(input)?)
    }
}
