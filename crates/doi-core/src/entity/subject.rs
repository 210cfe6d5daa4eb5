use crate::{
    entity::{EntityCore, EntityError},
    types::Ni,
};
use derive_more::{Deref, DerefMut, Display};

/// Indicator fields every subject must answer before it is complete.
pub const SUBJECT_REQUIRED: [&str; 6] = [
    "indicadorConjuge",
    "indicadorEspolio",
    "indicadorEstrangeiro",
    "indicadorNaoConstaParticipacaoOperacao",
    "indicadorNiIdentificado",
    "indicadorRepresentante",
];

///
/// Role
/// The two sides a subject can take in a property transaction.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Role {
    Alienante,
    Adquirente,
}

impl Role {
    /// The schema entity type backing this role.
    #[must_use]
    pub const fn schema_name(self) -> &'static str {
        match self {
            Self::Alienante => "Alienante",
            Self::Adquirente => "Adquirente",
        }
    }
}

///
/// RepList
///
/// Representative identifiers attached to a subject. Raw entries are kept
/// as typed (the user may still be mid-edit); only checksum-valid entries
/// surface on the wire.
///

#[derive(Clone, Debug, Default)]
pub struct RepList {
    entries: Vec<String>,
}

impl RepList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, ni: impl Into<String>) {
        self.entries.push(ni.into());
    }

    /// Remove the first entry equal to `ni`; returns whether one existed.
    pub fn remove(&mut self, ni: &str) -> bool {
        match self.entries.iter().position(|entry| entry == ni) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// All entries as typed, valid or not.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries that pass the CPF/CNPJ checksum gate.
    pub fn valid(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|ni| Ni::validate(ni))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// Subject
/// A transaction participant: a transferor (alienante) or acquirer
/// (adquirente), plus its optional representative list.
///

#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Subject {
    #[deref]
    #[deref_mut]
    core: EntityCore,
    role: Role,
    reps: RepList,
}

impl Subject {
    pub fn new(role: Role) -> Result<Self, EntityError> {
        Ok(Self {
            core: EntityCore::new(role.schema_name(), &SUBJECT_REQUIRED)?,
            role,
            reps: RepList::new(),
        })
    }

    pub fn alienante() -> Result<Self, EntityError> {
        Self::new(Role::Alienante)
    }

    pub fn adquirente() -> Result<Self, EntityError> {
        Self::new(Role::Adquirente)
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The subject's taxpayer identifier, when set.
    #[must_use]
    pub fn ni(&self) -> Option<&str> {
        self.core.text_value("ni")
    }

    #[must_use]
    pub const fn reps(&self) -> &RepList {
        &self.reps
    }

    pub const fn reps_mut(&mut self) -> &mut RepList {
        &mut self.reps
    }

    /// Checksum-valid representative identifiers, wire-ready.
    #[must_use]
    pub fn representantes(&self) -> Vec<&str> {
        self.reps.valid().collect()
    }

    /// Business-rule consistency:
    /// the identifier must be marked as identified, the subject may not
    /// represent itself, an estate sale needs the inventory holder's CPF,
    /// and a declared spouse needs the spouse-CPF indicator and the
    /// marital property regime.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.core.bool_value("indicadorNiIdentificado") != Some(true) {
            return false;
        }

        if let Some(own_ni) = self.ni()
            && self.reps.valid().any(|rep| rep == own_ni)
        {
            return false;
        }

        if self.core.bool_value("indicadorEspolio") == Some(true)
            && self.core.value("cpfInventariante").is_none()
        {
            return false;
        }

        if self.core.bool_value("indicadorConjuge") == Some(true)
            && (self.core.value("indicadorCpfConjugeIdentificado").is_none()
                || self.core.value("regimeBens").is_none())
        {
            return false;
        }

        true
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.core.is_complete() && self.is_consistent()
    }
}

///
/// TESTS
///
