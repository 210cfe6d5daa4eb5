mod ato;
mod imovel;
mod subject;

pub use ato::{ATO_REQUIRED, Ato};
pub use imovel::{IMOVEL_REQUIRED, Imovel};
pub use subject::{RepList, Role, SUBJECT_REQUIRED, Subject};

use crate::{prop::Prop, value::Value, view::FieldWidget};
use doi_schema::build::registry;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// EntityError
///

#[derive(Clone, Debug, ThisError)]
pub enum EntityError {
    #[error(transparent)]
    Schema(#[from] doi_schema::Error),

    #[error("required field list must not be empty for {entity}")]
    EmptyRequiredList { entity: String },

    #[error("{entity} has no property named {name}")]
    UnknownProp { entity: String, name: String },
}

///
/// EntityCore
///
/// A named record composed of one [`Prop`] per schema field, plus the set
/// of fields that must be filled before the record counts as complete.
/// Concrete entities (act, property-record, subject) wrap one of these and
/// layer their consistency rule on top.
///

#[derive(Clone, Debug)]
pub struct EntityCore {
    schema_name: String,
    required: BTreeSet<String>,
    props: Vec<Prop>,
}

impl EntityCore {
    /// Instantiate every field of `schema_name`'s descriptor, all unset.
    ///
    /// Unknown schema names, an empty required list, or required names
    /// missing from the descriptor are configuration errors.
    pub fn new(schema_name: &str, required_names: &[&str]) -> Result<Self, EntityError> {
        if required_names.is_empty() {
            return Err(EntityError::EmptyRequiredList {
                entity: schema_name.to_string(),
            });
        }

        let reg = registry().map_err(doi_schema::Error::from)?;
        let descriptor = reg.entity(schema_name).map_err(doi_schema::Error::from)?;

        for name in required_names {
            reg.field(schema_name, name)
                .map_err(doi_schema::Error::from)?;
        }

        let props = descriptor
            .names()
            .map(|name| Prop::new(schema_name, name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            schema_name: schema_name.to_string(),
            required: required_names.iter().map(ToString::to_string).collect(),
            props,
        })
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    /// Props in schema (document) order.
    pub fn props(&self) -> impl Iterator<Item = &Prop> {
        self.props.iter()
    }

    pub fn prop(&self, name: &str) -> Result<&Prop, EntityError> {
        self.props
            .iter()
            .find(|prop| prop.name() == name)
            .ok_or_else(|| self.unknown_prop(name))
    }

    /// Validated store: invalid input silently leaves the field unset.
    pub fn set_prop(&mut self, name: &str, value: Value) -> Result<(), EntityError> {
        self.prop_mut(name)?.set(value);
        Ok(())
    }

    /// Unchecked store for trusted data.
    pub fn force_prop(&mut self, name: &str, value: Option<Value>) -> Result<(), EntityError> {
        self.prop_mut(name)?.force(value);
        Ok(())
    }

    /// Current value of `name`, or `None` when unset or unknown.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.props
            .iter()
            .find(|prop| prop.name() == name)
            .and_then(Prop::get)
    }

    #[must_use]
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_text)
    }

    /// Every required field holds a validated, non-null value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.required.iter().all(|name| {
            self.props
                .iter()
                .find(|prop| prop.name() == name)
                .is_some_and(Prop::holds_valid)
        })
    }

    /// Render hook: one widget per field, schema order.
    #[must_use]
    pub fn widgets(&self) -> Vec<FieldWidget> {
        self.props.iter().map(Prop::widget).collect()
    }

    fn prop_mut(&mut self, name: &str) -> Result<&mut Prop, EntityError> {
        let missing = self.unknown_prop(name);
        self.props
            .iter_mut()
            .find(|prop| prop.name() == name)
            .ok_or(missing)
    }

    fn unknown_prop(&self, name: &str) -> EntityError {
        EntityError::UnknownProp {
            entity: self.schema_name.clone(),
            name: name.to_string(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_schema_name_fails() {
        assert!(matches!(
            EntityCore::new("Fazenda", &["ni"]),
            Err(EntityError::Schema(_))
        ));
    }

    #[test]
    fn empty_required_list_fails() {
        assert!(matches!(
            EntityCore::new("Ato", &[]),
            Err(EntityError::EmptyRequiredList { .. })
        ));
    }

    #[test]
    fn required_name_outside_schema_fails() {
        assert!(matches!(
            EntityCore::new("Ato", &["bairro"]),
            Err(EntityError::Schema(_))
        ));
    }

    #[test]
    fn instantiates_every_schema_field_unset() {
        let ato = EntityCore::new("Ato", &["tipoDeclaracao"]).unwrap();
        assert_eq!(ato.props().count(), 9);
        assert!(ato.props().all(|prop| !prop.is_set()));
    }

    #[test]
    fn set_prop_rejects_unknown_names() {
        let mut ato = EntityCore::new("Ato", &["tipoDeclaracao"]).unwrap();
        assert!(matches!(
            ato.set_prop("bairro", Value::from("x")),
            Err(EntityError::UnknownProp { .. })
        ));
        assert!(ato.force_prop("bairro", None).is_err());
    }

    #[test]
    fn completeness_tracks_required_fields_in_any_order() {
        let required = ["tipoDeclaracao", "tipoServico", "dataNegocioJuridico"];
        let mut ato = EntityCore::new("Ato", &required).unwrap();
        assert!(!ato.is_complete());

        // Fill in reverse declaration order; completeness flips only once
        // the last required field lands.
        ato.set_prop("dataNegocioJuridico", Value::from("2024-03-01"))
            .unwrap();
        assert!(!ato.is_complete());
        ato.set_prop("tipoServico", Value::from("1")).unwrap();
        assert!(!ato.is_complete());
        ato.set_prop("tipoDeclaracao", Value::from("0")).unwrap();
        assert!(ato.is_complete());

        // Optional fields play no part.
        ato.set_prop("folha", Value::from("10-12")).unwrap();
        assert!(ato.is_complete());

        // A nullified required field breaks completeness again.
        ato.set_prop("tipoServico", Value::from("99")).unwrap();
        assert!(!ato.is_complete());
    }

    #[test]
    fn forced_junk_does_not_count_as_complete() {
        let mut ato = EntityCore::new("Ato", &["dataNegocioJuridico"]).unwrap();
        ato.force_prop("dataNegocioJuridico", Some(Value::from("not-a-date")))
            .unwrap();
        assert!(!ato.is_complete());
    }
}
