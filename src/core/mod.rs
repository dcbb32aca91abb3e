pub mod registry;
pub mod tag;

pub use registry::{TypeRegistry, instantiate, instantiate_with_same_type, type_of};
pub use tag::TypeTag;
