use heck::{ToLowerCamelCase, ToPascalCase};

use crate::ir::{HttpMethod, NormalizedName};

/// Service name template used when neither a custom template nor an
/// `operationId` is available.
pub const DEFAULT_NAME_TEMPLATE: &str = "{method}{path}";

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    // Handle names that start with numbers or contain special chars
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
    }
}

/// Derive the service (function) name for an operation.
///
/// Without a custom template the `operationId` wins, falling back to
/// `{method}{path}`:
/// - `GET /pets/{petId}` → `getPetsPetId`
/// - `GET /pets/{petId}` with `operationId: getPetById` → `getPetById`
///
/// A custom template is always applied; if it mentions `{operationId}` and
/// the operation has none, the default template is used instead.
pub fn service_name(
    route: &str,
    method: HttpMethod,
    operation_id: Option<&str>,
    template: Option<&str>,
) -> String {
    let fill = |template: &str, operation_id: &str| {
        let operation_id = if operation_id.is_empty() {
            String::new()
        } else {
            normalize_name(operation_id).pascal_case
        };
        template
            .replace("{method}", &normalize_name(method.as_key()).pascal_case)
            .replace("{path}", &path_name(route))
            .replace("{operationId}", &operation_id)
    };

    let raw = match (template, operation_id) {
        (None, Some(id)) => id.to_string(),
        (None, None) => fill(DEFAULT_NAME_TEMPLATE, ""),
        (Some(t), Some(id)) => fill(t, id),
        (Some(t), None) if t.contains("{operationId}") => fill(DEFAULT_NAME_TEMPLATE, ""),
        (Some(t), None) => fill(t, ""),
    };

    to_identifier(&raw)
}

/// Turn arbitrary text into a valid lowerCamelCase identifier.
pub fn to_identifier(raw: &str) -> String {
    let mut ident = normalize_name(raw).camel_case;
    if ident.is_empty() {
        ident = "unnamed".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Whether `name` can be used unquoted as a property key or binding.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn path_name(route: &str) -> String {
    if route.chars().any(char::is_alphanumeric) {
        normalize_name(route).pascal_case
    } else {
        "Root".to_string()
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for (i, ch) in name.chars().enumerate() {
        if ch.is_alphanumeric() {
            if i == 0 && ch.is_ascii_digit() {
                result.push('_');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let n = normalize_name("listModels");
        assert_eq!(n.pascal_case, "ListModels");
        assert_eq!(n.camel_case, "listModels");
    }

    #[test]
    fn test_kebab_case() {
        let n = normalize_name("pet-store");
        assert_eq!(n.pascal_case, "PetStore");
        assert_eq!(n.camel_case, "petStore");
    }

    #[test]
    fn test_special_chars() {
        let n = normalize_name("application/json");
        assert_eq!(n.pascal_case, "ApplicationJson");
    }

    #[test]
    fn test_route_based_service_name() {
        assert_eq!(
            service_name("/pets/{petId}", HttpMethod::Get, None, None),
            "getPetsPetId"
        );
        assert_eq!(
            service_name("/store/order", HttpMethod::Post, None, None),
            "postStoreOrder"
        );
    }

    #[test]
    fn test_operation_id_wins_without_template() {
        assert_eq!(
            service_name("/pets/{petId}", HttpMethod::Get, Some("getPetById"), None),
            "getPetById"
        );
        assert_eq!(
            service_name("/pets", HttpMethod::Get, Some("list-pets"), None),
            "listPets"
        );
    }

    #[test]
    fn test_custom_template() {
        assert_eq!(
            service_name("/pets", HttpMethod::Get, Some("listPets"), Some("{method}{path}")),
            "getPets"
        );
        assert_eq!(
            service_name("/pets", HttpMethod::Get, Some("listPets"), Some("api{operationId}")),
            "apiListPets"
        );
        // Template needs an operationId the operation doesn't have
        assert_eq!(
            service_name("/pets", HttpMethod::Delete, None, Some("{operationId}")),
            "deletePets"
        );
    }

    #[test]
    fn test_root_route() {
        assert_eq!(service_name("/", HttpMethod::Get, None, None), "getRoot");
    }

    #[test]
    fn test_identifier_fixups() {
        assert_eq!(to_identifier("delete"), "delete_");
        assert_eq!(to_identifier("3d-model"), "_3dModel");
        assert_eq!(to_identifier("pet_id"), "petId");
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("petId"));
        assert!(is_valid_identifier("_private"));
        assert!(!is_valid_identifier("X-Request-Id"));
        assert!(!is_valid_identifier("1st"));
        assert!(!is_valid_identifier(""));
    }
}
