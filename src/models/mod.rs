//! Models module
//!
//! Defines the strongly-typed response descriptor rules produced by the
//! descriptor builder.

pub mod descriptor;
pub mod mapping;
pub mod method;
pub mod path;
pub mod status;

pub use descriptor::{DescriptorCollection, ResponseDescriptor};
pub use mapping::{Mapping, MappingRule};
pub use method::{MethodFilter, RequestMethod};
pub use path::PathPattern;
pub use status::{StatusClass, StatusCodes};
