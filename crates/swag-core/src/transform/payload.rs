use crate::error::ResolveError;
use crate::ir::{IrType, IrTypeDef};
use crate::parse::media_type::MediaType;
use crate::parse::operation::Operation;
use crate::parse::ref_resolve::{ComponentLookup, split_ref};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::{Response, ResponseOrRef};

use super::schema_resolver::{ref_type_name, request_body_type_name, schema_or_ref_to_ir_type};

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Status codes whose response describes the payload, in preference order.
const SUCCESS_STATUSES: [&str; 2] = ["200", "201"];

/// Request and response shapes of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub content_type: String,
    pub accept: String,
    pub request_body: Option<IrType>,
    pub response: Option<IrType>,
}

/// Resolve body, response and media types for an operation. A missing
/// response or body is not an error.
pub fn resolve_payload(
    lookup: &ComponentLookup<'_>,
    operation: &Operation,
) -> Result<Payload, ResolveError> {
    let (content_type, request_body) = resolve_request_body(lookup, operation)?;
    let (accept, response) = resolve_response(lookup, operation);
    Ok(Payload {
        content_type,
        accept,
        request_body,
        response,
    })
}

fn resolve_request_body(
    lookup: &ComponentLookup<'_>,
    operation: &Operation,
) -> Result<(String, Option<IrType>), ResolveError> {
    match &operation.request_body {
        None => Ok((JSON_MEDIA_TYPE.to_string(), None)),
        Some(RequestBodyOrRef::RequestBody(body)) => {
            let first = body.first_media();
            let content_type = media_key(first.map(|(key, _)| key));
            let body_type = first.and_then(|(_, media)| media_schema(media));
            Ok((content_type, body_type))
        }
        Some(RequestBodyOrRef::Ref { ref_path }) => {
            let body = lookup.request_body(ref_path)?;
            let first = body.first_media();
            let content_type = media_key(first.map(|(key, _)| key));
            // Named bodies are declared as types only when they carry a schema.
            let body_type = match first.and_then(|(_, media)| media.schema.as_ref()) {
                Some(_) => {
                    let (_, name) = split_ref(ref_path)?;
                    Some(IrType::Ref(request_body_type_name(name)))
                }
                None => None,
            };
            Ok((content_type, body_type))
        }
    }
}

fn resolve_response(lookup: &ComponentLookup<'_>, operation: &Operation) -> (String, Option<IrType>) {
    let Some(selected) = SUCCESS_STATUSES
        .iter()
        .find_map(|status| operation.responses.get(*status))
    else {
        return (JSON_MEDIA_TYPE.to_string(), None);
    };

    match selected {
        ResponseOrRef::Response(response) => from_response(response),
        ResponseOrRef::Ref { ref_path } => match lookup.response(ref_path) {
            Ok(response) => from_response(response),
            Err(err) => {
                log::debug!("passing response reference through as a type name: {err}");
                (
                    JSON_MEDIA_TYPE.to_string(),
                    Some(IrType::Ref(ref_type_name(ref_path))),
                )
            }
        },
    }
}

fn from_response(response: &Response) -> (String, Option<IrType>) {
    let first = response.content.first();
    let accept = media_key(first.map(|(key, _)| key));
    let payload = first.and_then(|(_, media)| media_schema(media));
    (accept, payload)
}

fn media_key(key: Option<&String>) -> String {
    key.cloned().unwrap_or_else(|| JSON_MEDIA_TYPE.to_string())
}

fn media_schema(media: &MediaType) -> Option<IrType> {
    media.schema.as_ref().map(schema_or_ref_to_ir_type)
}

/// Strip a `{ code, message, data }` style wrapper: when `ty` names a type
/// whose schema is an object with a `data` property, return that property's
/// type. Anything else comes back unchanged.
pub fn unwrap_envelope(ty: &IrType, types: &[IrTypeDef]) -> IrType {
    let IrType::Ref(name) = ty else {
        return ty.clone();
    };
    types
        .iter()
        .find(|def| &def.name == name)
        .and_then(|def| def.schema.property("data"))
        .map(|data| data.property_type.clone())
        .unwrap_or_else(|| ty.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrObject, IrProperty, TypeOrigin};
    use crate::parse::spec::OpenApiSpec;

    fn spec() -> OpenApiSpec {
        serde_json::from_str(
            r##"{
                "components": {
                    "requestBodies": {
                        "PetBody": { "content": { "multipart/form-data": { "schema": { "type": "object" } } } },
                        "Empty": { "content": { "text/plain": {} } }
                    },
                    "responses": {
                        "PetList": { "content": { "application/xml": {
                            "schema": { "$ref": "#/components/schemas/PetListResponse" } } } }
                    }
                }
            }"##,
        )
        .unwrap()
    }

    fn operation(json: &str) -> Operation {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_prefers_200_then_201() {
        let spec = spec();
        let lookup = ComponentLookup::new(&spec);
        let op = operation(
            r#"{ "responses": {
                "201": { "content": { "application/json": { "schema": { "type": "integer" } } } },
                "200": { "content": { "application/json": { "schema": { "type": "string" } } } }
            } }"#,
        );
        let payload = resolve_payload(&lookup, &op).unwrap();
        assert_eq!(payload.response, Some(IrType::String));

        let op = operation(
            r#"{ "responses": {
                "404": { "content": { "application/json": { "schema": { "type": "string" } } } },
                "201": { "content": { "application/json": { "schema": { "type": "integer" } } } }
            } }"#,
        );
        let payload = resolve_payload(&lookup, &op).unwrap();
        assert_eq!(payload.response, Some(IrType::Integer));
    }

    #[test]
    fn test_missing_response_and_body_default_to_json() {
        let spec = spec();
        let lookup = ComponentLookup::new(&spec);
        let payload = resolve_payload(&lookup, &operation("{}")).unwrap();
        assert_eq!(payload.response, None);
        assert_eq!(payload.request_body, None);
        assert_eq!(payload.content_type, JSON_MEDIA_TYPE);
        assert_eq!(payload.accept, JSON_MEDIA_TYPE);
    }

    #[test]
    fn test_response_reference_followed() {
        let spec = spec();
        let lookup = ComponentLookup::new(&spec);
        let op = operation(
            r##"{ "responses": { "200": { "$ref": "#/components/responses/PetList" } } }"##,
        );
        let payload = resolve_payload(&lookup, &op).unwrap();
        assert_eq!(payload.accept, "application/xml");
        assert_eq!(
            payload.response,
            Some(IrType::Ref("PetListResponse".to_string()))
        );
    }

    #[test]
    fn test_unresolvable_response_reference_passes_through() {
        let spec = spec();
        let lookup = ComponentLookup::new(&spec);
        let op = operation(
            r##"{ "responses": { "200": { "$ref": "#/components/responses/Gone" } } }"##,
        );
        let payload = resolve_payload(&lookup, &op).unwrap();
        assert_eq!(payload.response, Some(IrType::Ref("Gone".to_string())));
    }

    #[test]
    fn test_request_body_reference() {
        let spec = spec();
        let lookup = ComponentLookup::new(&spec);
        let op = operation(r##"{ "requestBody": { "$ref": "#/components/requestBodies/PetBody" } }"##);
        let payload = resolve_payload(&lookup, &op).unwrap();
        assert_eq!(payload.content_type, "multipart/form-data");
        assert_eq!(
            payload.request_body,
            Some(IrType::Ref("RequestBodyPetBody".to_string()))
        );

        let op = operation(r##"{ "requestBody": { "$ref": "#/components/requestBodies/Empty" } }"##);
        let payload = resolve_payload(&lookup, &op).unwrap();
        assert_eq!(payload.content_type, "text/plain");
        assert_eq!(payload.request_body, None);
    }

    #[test]
    fn test_missing_request_body_reference_is_an_error() {
        let spec = spec();
        let lookup = ComponentLookup::new(&spec);
        let op = operation(r##"{ "requestBody": { "$ref": "#/components/requestBodies/Nope" } }"##);
        assert!(resolve_payload(&lookup, &op).is_err());
    }

    fn envelope(name: &str, data: Option<IrType>) -> IrTypeDef {
        let mut object = IrObject::default();
        object.properties.insert(
            "code".to_string(),
            IrProperty {
                property_type: IrType::Integer,
                required: true,
                description: None,
            },
        );
        if let Some(data) = data {
            object.properties.insert(
                "data".to_string(),
                IrProperty {
                    property_type: data,
                    required: false,
                    description: None,
                },
            );
        }
        IrTypeDef {
            name: name.to_string(),
            schema: IrType::Object(object),
            description: None,
            origin: TypeOrigin::Component,
        }
    }

    #[test]
    fn test_unwrap_envelope() {
        let pets = IrType::Array(Box::new(IrType::Ref("Pet".to_string())));
        let types = vec![
            envelope("PetListResponse", Some(pets.clone())),
            envelope("Status", None),
        ];
        assert_eq!(
            unwrap_envelope(&IrType::Ref("PetListResponse".to_string()), &types),
            pets
        );
        let status = IrType::Ref("Status".to_string());
        assert_eq!(unwrap_envelope(&status, &types), status);
        let unknown = IrType::Ref("Unknown".to_string());
        assert_eq!(unwrap_envelope(&unknown, &types), unknown);
        assert_eq!(unwrap_envelope(&IrType::String, &types), IrType::String);
    }
}
