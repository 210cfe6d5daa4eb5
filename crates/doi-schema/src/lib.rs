//! Declarative field schema for DOI declarations: typed descriptors parsed
//! once from the embedded schema document and exposed as process-wide
//! read-only state.

pub mod build;
pub mod descriptor;
pub mod validate;

use crate::{build::BuildError, descriptor::DescriptorError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::registry,
        descriptor::{ChoiceOption, EntityDescriptor, FieldDescriptor, FieldFormat, FieldKind},
    };
}

///
/// Error
///

#[derive(Clone, Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    DescriptorError(#[from] DescriptorError),
}
