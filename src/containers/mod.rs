//! Container capabilities shared by every list kind, and the dynamic
//! [`TypedContainer`] that holds any of them.

pub mod refine;
pub mod typed;
pub mod validate;

use crate::core::TypeTag;

pub use refine::refine_columns;
pub use typed::TypedContainer;

/// Read access to a named, tagged sequence.
pub trait Container {
    type Element;

    fn type_tag(&self) -> TypeTag;

    fn name(&self) -> &str;

    fn values(&self) -> &[Self::Element];
}

/// In-place access. Not implemented by id-indexed lists, whose elements
/// must only change through their own mutators.
pub trait ContainerMut: Container {
    fn set_name(&mut self, name: &str);

    fn values_mut(&mut self) -> &mut [Self::Element];
}
