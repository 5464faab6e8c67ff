use swag_core::ir::{HttpMethod, IrParameterLocation, IrType, TypeOrigin};
use swag_core::parse;
use swag_core::transform::{self, TransformOptions, unwrap_envelope};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const STORE: &str = include_str!("fixtures/store.json");

fn pet_ref() -> IrType {
    IrType::Ref("Pet".to_string())
}

#[test]
fn transform_petstore_endpoints_in_document_order() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    assert_eq!(ir.info.title, "Petstore");
    let names: Vec<&str> = ir.endpoints.iter().map(|e| e.service_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["listPets", "createPet", "getPetById", "deletePetsPetId", "uploadPhoto"]
    );
}

#[test]
fn transform_petstore_types() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let names: Vec<&str> = ir.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ListPetsQueryParams",
            "ListPetsHeaderParams",
            "CreatePetHeaderParams",
            "Pet",
            "PetListResponse",
            "Limit",
            "RequestBodyPetBody",
        ]
    );

    let query = ir.find_type("ListPetsQueryParams").unwrap();
    assert_eq!(query.origin, TypeOrigin::QueryParams);
    let limit = query.schema.property("limit").expect("limit property");
    assert_eq!(limit.property_type, IrType::Ref("Limit".to_string()));
    assert!(!limit.required);
    assert_eq!(limit.description.as_deref(), Some("Page size"));
    let tag = query.schema.property("tag").expect("tag property");
    assert_eq!(tag.property_type, IrType::String);

    let pet = ir.find_type("Pet").unwrap();
    assert_eq!(pet.description.as_deref(), Some("A pet in the store"));
    assert!(pet.schema.property("id").unwrap().required);
    assert!(!pet.schema.property("tag").unwrap().required);

    let body = ir.find_type("RequestBodyPetBody").unwrap();
    assert_eq!(body.schema, pet_ref());
    assert_eq!(body.origin, TypeOrigin::RequestBody);
}

#[test]
fn transform_petstore_parameters() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let list = &ir.endpoints[0];
    assert_eq!(list.query_params_type.as_deref(), Some("ListPetsQueryParams"));
    assert!(list.query_params_nullable);
    assert_eq!(list.query_params.len(), 2);
    assert_eq!(list.header_params_type.as_deref(), Some("ListPetsHeaderParams"));
    assert!(list.header_params_nullable);
    assert!(list.path_params.is_empty());
    assert_eq!(list.path_params_map, None);

    let get = &ir.endpoints[2];
    assert_eq!(get.path_params.len(), 1);
    assert_eq!(get.path_params[0].location, IrParameterLocation::Path);
    assert_eq!(get.path_params[0].param_type, IrType::Integer);
    assert_eq!(get.path_params_map.as_deref(), Some("{ petId }"));
    assert_eq!(get.query_params_type, None);
    assert_eq!(get.header_params_type, None);
}

#[test]
fn transform_petstore_payloads() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let list = &ir.endpoints[0];
    assert_eq!(list.response, Some(IrType::Ref("PetListResponse".to_string())));
    let unwrapped = unwrap_envelope(list.response.as_ref().unwrap(), &ir.types);
    assert_eq!(unwrapped, IrType::Array(Box::new(pet_ref())));

    let create = &ir.endpoints[1];
    assert_eq!(create.method, HttpMethod::Post);
    assert_eq!(create.request_body, Some(IrType::Ref("RequestBodyPetBody".to_string())));
    assert_eq!(create.response, Some(pet_ref()));

    let get = &ir.endpoints[2];
    assert_eq!(get.response, Some(pet_ref()));

    let delete = &ir.endpoints[3];
    assert!(delete.deprecated);
    assert_eq!(delete.response, None);

    let upload = &ir.endpoints[4];
    assert_eq!(upload.content_type, "multipart/form-data");
    assert_eq!(upload.accept, "text/plain");
    assert!(upload.has_form_body());
    assert_eq!(upload.response, Some(IrType::String));
}

#[test]
fn transform_petstore_constants() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let constants: Vec<(&str, &str)> = ir
        .constants
        .iter()
        .map(|c| (c.name.as_str(), c.value.as_str()))
        .collect();
    assert_eq!(
        constants,
        vec![
            (
                "_CONSTANT0",
                r#"{ headers: { "Content-Type": "application/json", Accept: "application/json" } }"#
            ),
            ("_CONSTANT1", r#"[{"api_key":[]}]"#),
            (
                "_CONSTANT2",
                r#"{ headers: { "Content-Type": "multipart/form-data", Accept: "text/plain" } }"#
            ),
        ]
    );

    let configs: Vec<&str> = ir.endpoints.iter().map(|e| e.config_constant.as_str()).collect();
    assert_eq!(
        configs,
        vec!["_CONSTANT0", "_CONSTANT0", "_CONSTANT0", "_CONSTANT0", "_CONSTANT2"]
    );
    assert_eq!(ir.endpoints[0].security_constant.as_deref(), Some("_CONSTANT1"));
    // Explicit empty security on the operation overrides the document default
    assert_eq!(ir.endpoints[3].security_constant, None);
}

#[test]
fn transform_strips_prefix_case_insensitively() {
    let spec = parse::from_json(STORE).unwrap();
    let options = TransformOptions {
        prefix: Some("/api/v1".to_string()),
        ..TransformOptions::default()
    };
    let ir = transform::transform_with_options(&spec, &options).unwrap();

    let routes: Vec<&str> = ir.endpoints.iter().map(|e| e.route.as_str()).collect();
    assert_eq!(routes, vec!["/orders", "/orders", "/orders/{order-id}"]);
    assert_eq!(ir.endpoints[0].service_name, "getOrders");
    assert_eq!(
        ir.endpoints[2].path_params_map.as_deref(),
        Some("{ \"order-id\": orderId }")
    );
    assert!(ir.endpoints[1].has_form_body());
}

#[test]
fn transform_ignores_configured_headers() {
    let spec = parse::from_json(STORE).unwrap();
    let options = TransformOptions {
        ignored_header_params: vec!["authorization".to_string()],
        ..TransformOptions::default()
    };
    let ir = transform::transform_with_options(&spec, &options).unwrap();
    assert_eq!(ir.endpoints[2].header_params_type, None);
    assert!(ir.find_type("GetOrderHeaderParams").is_none());

    let ir = transform::transform(&spec).unwrap();
    assert_eq!(
        ir.endpoints[2].header_params_type.as_deref(),
        Some("GetOrderHeaderParams")
    );
    assert!(!ir.endpoints[2].header_params_nullable);
}

#[test]
fn transform_makes_service_names_unique() {
    let spec = parse::from_json(
        r#"{
            "openapi": "3.0.0",
            "paths": {
                "/a": { "get": { "operationId": "fetch" } },
                "/b": { "get": { "operationId": "fetch" } },
                "/c": { "get": { "operationId": "fetch" } }
            }
        }"#,
    )
    .unwrap();
    let ir = transform::transform(&spec).unwrap();
    let names: Vec<&str> = ir.endpoints.iter().map(|e| e.service_name.as_str()).collect();
    assert_eq!(names, vec!["fetch", "fetch2", "fetch3"]);
}

#[test]
fn transform_applies_aliases_and_templates() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let mut options = TransformOptions {
        naming_template: Some("api{operationId}".to_string()),
        ..TransformOptions::default()
    };
    options
        .aliases
        .insert("apiListPets".to_string(), "fetchPets".to_string());
    let ir = transform::transform_with_options(&spec, &options).unwrap();

    let names: Vec<&str> = ir.endpoints.iter().map(|e| e.service_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "fetchPets",
            "apiCreatePet",
            "apiGetPetById",
            "deletePetsPetId",
            "apiUploadPhoto"
        ]
    );
    assert!(ir.find_type("FetchPetsQueryParams").is_some());
}

#[test]
fn transform_is_deterministic() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let first = transform::transform(&spec).unwrap();
    let second = transform::transform(&spec).unwrap();
    assert_eq!(first.endpoints, second.endpoints);
    assert_eq!(first.types, second.types);
    assert_eq!(first.constants, second.constants);
}

#[test]
fn transform_fails_on_missing_reference() {
    let spec = parse::from_json(
        r##"{
            "openapi": "3.0.0",
            "paths": { "/a": { "post": {
                "requestBody": { "$ref": "#/components/requestBodies/Missing" }
            } } }
        }"##,
    )
    .unwrap();
    assert!(transform::transform(&spec).is_err());
}
