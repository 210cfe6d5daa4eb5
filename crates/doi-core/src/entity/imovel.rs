use crate::{
    entity::{EntityCore, EntityError},
    operation::Operation,
};
use derive_more::{Deref, DerefMut};

/// Fields a property-record must carry before it is complete.
pub const IMOVEL_REQUIRED: [&str; 8] = [
    "destinacao",
    "formaPagamento",
    "indicadorImovelPublicoUniao",
    "indicadorPagamentoDinheiro",
    "indicadorPermutaBens",
    "tipoOperacaoImobiliaria",
    "tipoParteTransacionada",
    "valorParteTransacionada",
];

///
/// Imovel
///
/// One real-estate unit under an act, carrying its own disposal and
/// acquisition share tables. Operation keys reference subjects registered
/// on the owning act by taxpayer identifier; the reference is relational,
/// not structural.
///

#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Imovel {
    #[deref]
    #[deref_mut]
    core: EntityCore,
    alienacao: Operation,
    aquisicao: Operation,
}

impl Imovel {
    pub fn new() -> Result<Self, EntityError> {
        Ok(Self {
            core: EntityCore::new("Imovel", &IMOVEL_REQUIRED)?,
            alienacao: Operation::new(),
            aquisicao: Operation::new(),
        })
    }

    #[must_use]
    pub const fn alienacao(&self) -> &Operation {
        &self.alienacao
    }

    pub const fn alienacao_mut(&mut self) -> &mut Operation {
        &mut self.alienacao
    }

    #[must_use]
    pub const fn aquisicao(&self) -> &Operation {
        &self.aquisicao
    }

    pub const fn aquisicao_mut(&mut self) -> &mut Operation {
        &mut self.aquisicao
    }

    /// Both share tables must independently land in the 98–100 band.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.alienacao.is_valid() && self.aquisicao.is_valid()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.core.is_complete() && self.is_consistent()
    }
}

///
/// TESTS
///
