//! Walks the act → property-record → participant graph and emits the flat
//! declaration list the external wire format expects. One act with N
//! property-records yields exactly N records, each independently carrying
//! the full act-level field set.

use crate::{
    entity::{Ato, EntityCore, Imovel, Subject},
    operation::Operation,
    registry::SubjectRegistry,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

///
/// WireDocument
/// The exported/imported JSON envelope: `{ "declaracoes": [...] }`.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WireDocument {
    pub declaracoes: Vec<DeclarationRecord>,
}

///
/// DeclarationRecord
/// One flat record: act fields + property-record fields + the two
/// participant arrays.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DeclarationRecord {
    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
    pub alienantes: Vec<Participant>,
    pub adquirentes: Vec<Participant>,
}

///
/// Participant
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Participant {
    pub ni: String,
    pub participacao: f64,
    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representantes: Option<Vec<Representative>>,
}

///
/// Representative
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Representative {
    pub ni: String,
}

/// Flatten an act into its declaration records.
///
/// Share-table keys with no matching registered subject are silently
/// skipped, matching the upstream wire producer. That omission can mask
/// data loss; callers wanting strictness should diff operation keys
/// against the registries before exporting.
#[must_use]
pub fn flatten(ato: &Ato) -> Vec<DeclarationRecord> {
    let act_fields = emitted_fields(ato);

    ato.imoveis()
        .iter()
        .map(|imovel| imovel_record(ato, imovel, &act_fields))
        .collect()
}

fn imovel_record(
    ato: &Ato,
    imovel: &Imovel,
    act_fields: &Map<String, JsonValue>,
) -> DeclarationRecord {
    let mut fields = act_fields.clone();
    fields.extend(emitted_fields(imovel));

    // "A prazo" implies the fiduciary-sale indicator is declared off.
    if fields.get("formaPagamento").and_then(JsonValue::as_str) == Some("7") {
        fields.insert(
            "indicadorAlienacaoFiduciaria".to_string(),
            JsonValue::Bool(false),
        );
    }

    DeclarationRecord {
        fields,
        alienantes: participants(ato.alienantes(), imovel.alienacao()),
        adquirentes: participants(ato.adquirentes(), imovel.aquisicao()),
    }
}

/// Emit an entity's fields for the wire: required fields always (null when
/// unset), optional fields only when set and not the zero of their kind.
fn emitted_fields(entity: &EntityCore) -> Map<String, JsonValue> {
    let mut fields = Map::new();

    for prop in entity.props() {
        let required = entity.is_required(prop.name());
        match prop.get() {
            Some(value) if required || !value.is_zero_of_kind() => {
                fields.insert(prop.name().to_string(), value.to_json());
            }
            None if required => {
                fields.insert(prop.name().to_string(), JsonValue::Null);
            }
            _ => {}
        }
    }

    fields
}

fn participants(registry: &SubjectRegistry, operation: &Operation) -> Vec<Participant> {
    operation
        .iter()
        .filter_map(|(ni, share)| {
            registry
                .get_by_ni(ni)
                .map(|subject| participant_entry(subject, ni, share))
        })
        .collect()
}

fn participant_entry(subject: &Subject, ni: &str, share: f64) -> Participant {
    let mut fields = emitted_fields(subject);
    fields.remove("ni");

    // Companies have no spouse; the indicator never ships for a CNPJ.
    if ni.len() == 14 {
        fields.remove("indicadorConjuge");
    }

    if fields
        .get("indicadorConjuge")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false)
    {
        fields
            .entry("indicadorCpfConjugeIdentificado".to_string())
            .or_insert(JsonValue::Bool(false));
        fields.insert(
            "indicadorConjugeParticipa".to_string(),
            JsonValue::Bool(false),
        );
    }

    let representantes = (subject.bool_value("indicadorRepresentante") == Some(true)).then(|| {
        subject
            .representantes()
            .into_iter()
            .map(|rep| Representative { ni: rep.to_string() })
            .collect()
    });

    Participant {
        ni: ni.to_string(),
        participacao: share,
        fields,
        representantes,
    }
}

///
/// TESTS
///
