use indexmap::IndexMap;

/// A resolved schema shape. Exhaustive matching on this replaces probing raw
/// schema objects for properties.
#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    String,
    StringLiteral(String),
    Number,
    Integer,
    Boolean,
    Null,
    DateTime,
    Binary,
    Array(Box<IrType>),
    /// Object with a property registry.
    Object(IrObject),
    /// `additionalProperties` without fixed properties.
    Map(Box<IrType>),
    /// Reference to a named type declaration.
    Ref(String),
    Union(Vec<IrType>),
    Intersection(Vec<IrType>),
    Any,
}

impl IrType {
    /// Look up a property when this is an object shape.
    pub fn property(&self, name: &str) -> Option<&IrProperty> {
        match self {
            IrType::Object(obj) => obj.properties.get(name),
            _ => None,
        }
    }
}

/// Properties of an object shape, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrObject {
    pub properties: IndexMap<String, IrProperty>,
    pub additional_properties: Option<Box<IrType>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrProperty {
    pub property_type: IrType,
    pub required: bool,
    pub description: Option<String>,
}

/// Where a type declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOrigin {
    /// `components.schemas`
    Component,
    /// Synthesized from one endpoint's query parameters.
    QueryParams,
    /// Synthesized from one endpoint's header parameters.
    HeaderParams,
    /// `components.parameters`
    Parameter,
    /// `components.requestBodies`, renamed with a `RequestBody` prefix.
    RequestBody,
}

impl TypeOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeOrigin::Component => "component",
            TypeOrigin::QueryParams => "query_params",
            TypeOrigin::HeaderParams => "header_params",
            TypeOrigin::Parameter => "parameter",
            TypeOrigin::RequestBody => "request_body",
        }
    }
}

/// A named type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct IrTypeDef {
    pub name: String,
    pub schema: IrType,
    pub description: Option<String>,
    pub origin: TypeOrigin,
}
