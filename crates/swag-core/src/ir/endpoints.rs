use super::schemas::IrType;

pub use crate::parse::operation::HttpMethod;

/// Parameter location. Cookie parameters never reach the IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrParameterLocation {
    Path,
    Query,
    Header,
}

/// A classified parameter. References to `components.parameters` keep a
/// `Ref` type pointing at the parameter's own type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct IrParameter {
    pub name: String,
    /// Valid identifier used for the argument in generated code.
    pub ident: String,
    pub location: IrParameterLocation,
    pub param_type: IrType,
    pub required: bool,
    pub description: Option<String>,
}

/// One endpoint (path + method), ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct IrEndpoint {
    pub service_name: String,
    pub method: HttpMethod,
    /// Route template with the configured prefix stripped.
    pub route: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Request body media type, defaulting to JSON.
    pub content_type: String,
    /// Response media type, defaulting to JSON.
    pub accept: String,
    /// Path parameters in declaration order.
    pub path_params: Vec<IrParameter>,
    /// `{ petId }`-style literal mapping placeholders to arguments. Present
    /// only when there is at least one path parameter.
    pub path_params_map: Option<String>,
    pub query_params: Vec<IrParameter>,
    pub query_params_type: Option<String>,
    pub query_params_nullable: bool,
    pub header_params_type: Option<String>,
    pub header_params_nullable: bool,
    pub request_body: Option<IrType>,
    /// Payload type before envelope unwrapping.
    pub response: Option<IrType>,
    /// Interned serialized security requirements, if any.
    pub security_constant: Option<String>,
    /// Interned request config literal (content type and accept headers).
    pub config_constant: String,
}

impl IrEndpoint {
    pub fn has_form_body(&self) -> bool {
        self.request_body.is_some()
            && matches!(
                self.content_type.as_str(),
                "multipart/form-data" | "application/x-www-form-urlencoded"
            )
    }
}
