use crate::{
    descriptor::Registry,
    validate::{ValidateError, validate_registry},
};
use std::sync::{LazyLock, OnceLock};
use thiserror::Error as ThisError;

/// The DOI schema document, carried verbatim from the tax-authority field
/// definitions.
const DOI_SCHEMA_JSON: &str = include_str!("../data/doi.json");

///
/// BuildError
///

#[derive(Clone, Debug, ThisError)]
pub enum BuildError {
    #[error("schema document is not valid JSON: {0}")]
    Parse(String),

    #[error("schema validation failed: {0}")]
    Validation(#[from] ValidateError),
}

///
/// REGISTRY
/// the static data structure
///

static REGISTRY: LazyLock<Result<Registry, BuildError>> = LazyLock::new(|| {
    serde_json::from_str(DOI_SCHEMA_JSON).map_err(|err| BuildError::Parse(err.to_string()))
});

static REGISTRY_VALIDATED: OnceLock<()> = OnceLock::new();

/// Read the global registry, validating it exactly once per process.
///
/// The registry is parsed from the embedded document on first access and
/// never mutated afterward; all entity construction goes through it.
pub fn registry() -> Result<&'static Registry, BuildError> {
    let registry = REGISTRY.as_ref().map_err(Clone::clone)?;

    if REGISTRY_VALIDATED.get().is_none() {
        validate_registry(registry)?;
        REGISTRY_VALIDATED.set(()).ok();
    }

    Ok(registry)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldFormat, FieldKind};

    #[test]
    fn embedded_document_parses_and_validates() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 4);

        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Ato", "Adquirente", "Alienante", "Imovel"]);
    }

    #[test]
    fn known_fields_resolve() {
        let registry = registry().unwrap();

        let tipo = registry.field("Ato", "tipoDeclaracao").unwrap();
        assert!(tipo.is_choice());

        let data = registry.field("Ato", "dataNegocioJuridico").unwrap();
        assert_eq!(data.format, Some(FieldFormat::Date));

        let transcricao = registry.field("Imovel", "transcricao").unwrap();
        assert_eq!(transcricao.kind, FieldKind::Number);
        assert_eq!(transcricao.format, Some(FieldFormat::Int32));

        let ni = registry.field("Alienante", "ni").unwrap();
        assert_eq!(ni.min_length, Some(11));
        assert_eq!(ni.max_length, Some(14));
    }

    #[test]
    fn unknown_names_fail_fast() {
        let registry = registry().unwrap();
        assert!(registry.entity("Fazenda").is_err());
        assert!(registry.field("Ato", "bairro").is_err());
    }

    #[test]
    fn imovel_carries_full_field_set() {
        let registry = registry().unwrap();
        let imovel = registry.entity("Imovel").unwrap();
        assert_eq!(imovel.len(), 40);

        // First field in document order drives render order.
        assert_eq!(imovel.names().next(), Some("codigoIbge"));
    }
}
