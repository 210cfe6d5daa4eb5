use crate::entity::{Imovel, Role, Subject};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, ThisError)]
pub enum RegistryError {
    #[error("{role} rejected by registry: entity is not valid (ni: {ni})")]
    InvalidSubject { role: Role, ni: String },

    #[error("{role} subject was built for the wrong registry")]
    RoleMismatch { role: Role },

    #[error("imovel rejected by registry: entity is not valid")]
    InvalidImovel,
}

///
/// SubjectRegistry
///
/// One act's transferors or acquirers. The registry is a gate: the
/// user-facing [`add`](Self::add) refuses entities that are not yet valid,
/// while [`force_add`](Self::force_add) admits trusted (loaded) drafts.
/// Lookup is a linear scan; acts carry at most tens of subjects.
///

#[derive(Clone, Debug)]
pub struct SubjectRegistry {
    role: Role,
    items: Vec<Subject>,
}

impl SubjectRegistry {
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    pub fn add(&mut self, subject: Subject) -> Result<(), RegistryError> {
        if subject.role() != self.role {
            return Err(RegistryError::RoleMismatch {
                role: subject.role(),
            });
        }
        if !subject.is_valid() {
            return Err(RegistryError::InvalidSubject {
                role: subject.role(),
                ni: subject.ni().unwrap_or("<unset>").to_string(),
            });
        }

        self.items.push(subject);
        Ok(())
    }

    /// Admit a subject without the validity gate. Import path only.
    pub fn force_add(&mut self, subject: Subject) {
        self.items.push(subject);
    }

    /// First subject whose identifier equals `ni`.
    #[must_use]
    pub fn get_by_ni(&self, ni: &str) -> Option<&Subject> {
        self.items.iter().find(|subject| subject.ni() == Some(ni))
    }

    pub fn get_by_ni_mut(&mut self, ni: &str) -> Option<&mut Subject> {
        self.items
            .iter_mut()
            .find(|subject| subject.ni() == Some(ni))
    }

    pub fn remove_by_ni(&mut self, ni: &str) -> Option<Subject> {
        let index = self
            .items
            .iter()
            .position(|subject| subject.ni() == Some(ni))?;
        Some(self.items.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Subject> {
        self.items.iter_mut()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

///
/// ImovelRegistry
/// One act's property-records, same gate discipline.
///

#[derive(Clone, Debug, Default)]
pub struct ImovelRegistry {
    items: Vec<Imovel>,
}

impl ImovelRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, imovel: Imovel) -> Result<(), RegistryError> {
        if !imovel.is_valid() {
            return Err(RegistryError::InvalidImovel);
        }

        self.items.push(imovel);
        Ok(())
    }

    /// Admit a property-record without the validity gate. Import path only.
    pub fn force_add(&mut self, imovel: Imovel) {
        self.items.push(imovel);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Imovel> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Imovel> {
        self.items.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Imovel> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Imovel> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Imovel> {
        self.items.iter_mut()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

///
/// TESTS
///
