pub mod constants;
pub mod name_normalizer;
pub mod parameters;
pub mod payload;
pub mod schema_resolver;
pub mod spec_to_ir;

pub use payload::unwrap_envelope;
pub use spec_to_ir::{TransformOptions, strip_route_prefix, transform, transform_with_options};
