use std::fmt;

use super::endpoints::IrEndpoint;
use super::schemas::IrTypeDef;

/// The three record collections one generation run produces. Everything
/// downstream (request functions, type declarations, hooks) renders from this.
#[derive(Debug, Clone, Default)]
pub struct IrSpec {
    pub info: IrInfo,
    /// One per path + method, in document order.
    pub endpoints: Vec<IrEndpoint>,
    /// Synthesized query/header groups first, then component schemas,
    /// named parameters and request bodies.
    pub types: Vec<IrTypeDef>,
    /// Interned literals, in first-seen order.
    pub constants: Vec<IrConstant>,
}

impl IrSpec {
    pub fn find_type(&self, name: &str) -> Option<&IrTypeDef> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// API metadata.
#[derive(Debug, Clone, Default)]
pub struct IrInfo {
    pub title: String,
    pub version: String,
}

/// A shared literal, declared once as `const <name> = <value>;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrConstant {
    pub name: String,
    pub value: String,
}

/// A name with its casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
