//! Generator method registry for rngconf.
//!
//! Every supported SQL type has an ordered list of generator methods. Each
//! method declares the config keys it reads, their kind, default, and bounds.
//! The first method registered for a type is that type's default.

pub mod builtin;
pub mod method;
pub mod params;
pub mod registry;
pub mod value;

pub use method::{MethodId, MethodSpec};
pub use params::{Bounds, ParamKind, ParamSpec, Projection, project_config};
pub use registry::MethodRegistry;
pub use value::{ConfigValue, TypedConfig};
