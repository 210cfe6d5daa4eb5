//! Core model for building Brazilian real-estate transfer declarations
//! (DOI): schema-backed entities, participation share tables, and the
//! flatten/load round trip to the wire format.

pub mod entity;
pub mod flatten;
pub mod load;
pub mod operation;
pub mod prop;
pub mod registry;
pub mod session;
pub mod store;
pub mod types;
pub mod value;
pub mod view;

pub mod prelude {
    pub use crate::{
        Error,
        entity::{Ato, EntityCore, EntityError, Imovel, RepList, Role, Subject},
        flatten::{DeclarationRecord, Participant, WireDocument, flatten},
        load::{LoadError, load},
        operation::{Operation, OperationError},
        prop::Prop,
        registry::{ImovelRegistry, RegistryError, SubjectRegistry},
        session::{Session, SessionError},
        store::{MemoryStore, ObjectStore, StoreError},
        types::{Cnpj, Cpf, Ni},
        value::Value,
        view::{Control, FieldWidget},
    };
}

use thiserror::Error as ThisError;

///
/// Error
/// Top-level error, aggregating every subsystem.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Entity(#[from] entity::EntityError),

    #[error(transparent)]
    Load(#[from] load::LoadError),

    #[error(transparent)]
    Operation(#[from] operation::OperationError),

    #[error(transparent)]
    Registry(#[from] registry::RegistryError),

    #[error(transparent)]
    Schema(#[from] doi_schema::Error),

    #[error(transparent)]
    Session(#[from] session::SessionError),

    #[error(transparent)]
    Store(#[from] store::StoreError),
}
