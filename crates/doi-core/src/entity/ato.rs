use crate::{
    entity::{EntityCore, EntityError, Role},
    registry::{ImovelRegistry, SubjectRegistry},
};
use derive_more::{Deref, DerefMut};

/// Fields an act must carry before it is complete.
pub const ATO_REQUIRED: [&str; 4] = [
    "dataLavraturaRegistroAverbacao",
    "dataNegocioJuridico",
    "tipoDeclaracao",
    "tipoServico",
];

///
/// Ato
///
/// The top-level declaration unit: one notarial/registry transaction. It
/// exclusively owns its participant registries and property-records;
/// operations inside the property-records refer back to subjects by
/// taxpayer identifier.
///

#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Ato {
    #[deref]
    #[deref_mut]
    core: EntityCore,
    alienantes: SubjectRegistry,
    adquirentes: SubjectRegistry,
    imoveis: ImovelRegistry,
}

impl Ato {
    pub fn new() -> Result<Self, EntityError> {
        Ok(Self {
            core: EntityCore::new("Ato", &ATO_REQUIRED)?,
            alienantes: SubjectRegistry::new(Role::Alienante),
            adquirentes: SubjectRegistry::new(Role::Adquirente),
            imoveis: ImovelRegistry::new(),
        })
    }

    #[must_use]
    pub const fn alienantes(&self) -> &SubjectRegistry {
        &self.alienantes
    }

    pub const fn alienantes_mut(&mut self) -> &mut SubjectRegistry {
        &mut self.alienantes
    }

    #[must_use]
    pub const fn adquirentes(&self) -> &SubjectRegistry {
        &self.adquirentes
    }

    pub const fn adquirentes_mut(&mut self) -> &mut SubjectRegistry {
        &mut self.adquirentes
    }

    #[must_use]
    pub const fn imoveis(&self) -> &ImovelRegistry {
        &self.imoveis
    }

    pub const fn imoveis_mut(&mut self) -> &mut ImovelRegistry {
        &mut self.imoveis
    }

    /// The registry holding subjects for `role`.
    #[must_use]
    pub const fn subjects(&self, role: Role) -> &SubjectRegistry {
        match role {
            Role::Alienante => &self.alienantes,
            Role::Adquirente => &self.adquirentes,
        }
    }

    // TODO: cross-check operation keys against the subject registries here
    // before an act is accepted for export.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
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
