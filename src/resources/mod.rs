pub mod descriptor;
pub mod kind;

pub use descriptor::{FontResource, FontSource, ResourceDescriptor};
pub use kind::{extension_of, ResourceKind};
