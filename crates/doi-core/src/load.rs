//! Rebuilds acts from flat declaration records. The inverse of
//! [`flatten`](crate::flatten::flatten): records sharing a book/sheet pair
//! collapse into one act, subjects are deduplicated per act, and each
//! record contributes one property-record.
//!
//! Loading is permissive where user input is permissive: field values go
//! through the same silent-nullify validation as typed input, and share
//! entries that would not pass the operation gate are dropped rather than
//! failing the whole import. Schema-level failures still abort, and
//! nothing is committed unless every record loads.

use crate::{
    entity::{Ato, EntityCore, EntityError, Imovel, Role, Subject},
    flatten::{DeclarationRecord, Participant},
    value::Value,
};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use thiserror::Error as ThisError;

///
/// LoadError
///

#[derive(Clone, Debug, ThisError)]
pub enum LoadError {
    #[error(transparent)]
    Entity(#[from] EntityError),
}

/// Rebuild acts from `records`, grouping by book/sheet in first-seen order.
///
/// All-or-nothing: the first schema error aborts and no partial result is
/// returned.
pub fn load(records: &[DeclarationRecord]) -> Result<Vec<Ato>, LoadError> {
    let mut pending: Vec<PendingAct> = Vec::new();

    for record in records {
        let key = group_key(&record.fields);

        let index = match pending.iter().position(|act| act.key == key) {
            Some(index) => index,
            None => {
                let mut ato = Ato::new()?;
                populate(&mut ato, &record.fields)?;
                pending.push(PendingAct {
                    key,
                    ato,
                    seen: HashSet::new(),
                });
                pending.len() - 1
            }
        };
        let act = &mut pending[index];

        for participant in &record.alienantes {
            restore_subject(act, Role::Alienante, participant)?;
        }
        for participant in &record.adquirentes {
            restore_subject(act, Role::Adquirente, participant)?;
        }

        let imovel = restore_imovel(record)?;
        act.ato.imoveis_mut().force_add(imovel);
    }

    Ok(pending.into_iter().map(|act| act.ato).collect())
}

struct PendingAct {
    key: String,
    ato: Ato,
    // Identifiers already restored on this act, across both roles. A
    // subject repeating on a later record (or the other role) is the same
    // person; only its first appearance carries the field data.
    seen: HashSet<String>,
}

/// Records belong to the same act iff book number and sheet match.
fn group_key(fields: &Map<String, JsonValue>) -> String {
    let livro = fields
        .get("numeroLivro")
        .and_then(JsonValue::as_str)
        .unwrap_or_default();
    let folha = fields
        .get("folha")
        .and_then(JsonValue::as_str)
        .unwrap_or_default();

    format!("{livro}:{folha}")
}

/// Set every schema field of `entity` that `fields` carries a scalar for.
/// Non-scalar and null values are skipped; invalid scalars nullify as in
/// interactive editing.
fn populate(entity: &mut EntityCore, fields: &Map<String, JsonValue>) -> Result<(), EntityError> {
    let names: Vec<String> = entity
        .props()
        .map(|prop| prop.name().to_string())
        .collect();

    for name in names {
        if let Some(value) = fields.get(&name).and_then(Value::from_json) {
            entity.set_prop(&name, value)?;
        }
    }

    Ok(())
}

fn restore_subject(
    act: &mut PendingAct,
    role: Role,
    participant: &Participant,
) -> Result<(), LoadError> {
    if !act.seen.insert(participant.ni.clone()) {
        return Ok(());
    }

    let mut subject = Subject::new(role)?;
    populate(&mut subject, &participant.fields)?;
    subject.set_prop("ni", Value::from(participant.ni.as_str()))?;

    if let Some(reps) = &participant.representantes {
        subject.set_prop("indicadorRepresentante", Value::from(true))?;
        for rep in reps {
            subject.reps_mut().add(rep.ni.clone());
        }
    }

    match role {
        Role::Alienante => act.ato.alienantes_mut(),
        Role::Adquirente => act.ato.adquirentes_mut(),
    }
    .force_add(subject);

    Ok(())
}

fn restore_imovel(record: &DeclarationRecord) -> Result<Imovel, LoadError> {
    let mut imovel = Imovel::new()?;
    populate(&mut imovel, &record.fields)?;

    for participant in &record.alienantes {
        let _ = imovel
            .alienacao_mut()
            .add(&participant.ni, participant.participacao);
    }
    for participant in &record.adquirentes {
        let _ = imovel
            .aquisicao_mut()
            .add(&participant.ni, participant.participacao);
    }

    Ok(imovel)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CPF_A: &str = "11144477735";
    const CPF_B: &str = "52998224725";

    fn record(livro: &str, folha: &str) -> DeclarationRecord {
        serde_json::from_value(json!({
            "tipoDeclaracao": "0",
            "tipoServico": "1",
            "dataLavraturaRegistroAverbacao": "2024-05-10",
            "dataNegocioJuridico": "2024-05-01",
            "numeroLivro": livro,
            "folha": folha,
            "destinacao": "1",
            "formaPagamento": "5",
            "indicadorImovelPublicoUniao": false,
            "indicadorPagamentoDinheiro": false,
            "indicadorPermutaBens": false,
            "tipoOperacaoImobiliaria": "11",
            "tipoParteTransacionada": "1",
            "valorParteTransacionada": 250_000.0,
            "alienantes": [{
                "ni": CPF_A,
                "participacao": 100.0,
                "indicadorConjuge": false,
                "indicadorEspolio": false,
                "indicadorEstrangeiro": false,
                "indicadorNaoConstaParticipacaoOperacao": false,
                "indicadorNiIdentificado": true,
                "indicadorRepresentante": false,
            }],
            "adquirentes": [{
                "ni": CPF_B,
                "participacao": 100.0,
                "indicadorConjuge": false,
                "indicadorEspolio": false,
                "indicadorEstrangeiro": false,
                "indicadorNaoConstaParticipacaoOperacao": false,
                "indicadorNiIdentificado": true,
                "indicadorRepresentante": false,
            }],
        }))
        .unwrap()
    }

    #[test]
    fn one_record_yields_one_act() {
        let acts = load(&[record("B-102", "45")]).unwrap();
        assert_eq!(acts.len(), 1);

        let ato = &acts[0];
        assert_eq!(ato.text_value("numeroLivro"), Some("B-102"));
        assert_eq!(ato.text_value("tipoDeclaracao"), Some("0"));
        assert!(ato.is_valid());

        assert_eq!(ato.alienantes().len(), 1);
        assert_eq!(ato.adquirentes().len(), 1);
        assert_eq!(ato.imoveis().len(), 1);

        let imovel = ato.imoveis().get(0).unwrap();
        assert_eq!(imovel.text_value("destinacao"), Some("1"));
        assert_eq!(imovel.alienacao().get(CPF_A), Some(100.0));
        assert_eq!(imovel.aquisicao().get(CPF_B), Some(100.0));
        assert!(imovel.is_valid());
    }

    #[test]
    fn records_group_by_book_and_sheet() {
        let acts = load(&[
            record("B-102", "45"),
            record("B-102", "45"),
            record("B-102", "46"),
        ])
        .unwrap();

        assert_eq!(acts.len(), 2);
        assert_eq!(acts[0].imoveis().len(), 2);
        assert_eq!(acts[1].imoveis().len(), 1);

        // Subjects repeating across grouped records are deduplicated.
        assert_eq!(acts[0].alienantes().len(), 1);
        assert_eq!(acts[0].adquirentes().len(), 1);
    }

    #[test]
    fn duplicate_ni_across_roles_is_kept_once() {
        let mut record = record("B-102", "45");
        record.adquirentes[0].ni = CPF_A.to_string();

        let acts = load(&[record]).unwrap();
        assert_eq!(acts[0].alienantes().len(), 1);
        assert_eq!(acts[0].adquirentes().len(), 0);
    }

    #[test]
    fn invalid_field_values_nullify_instead_of_failing() {
        let mut record = record("B-102", "45");
        record
            .fields
            .insert("tipoServico".to_string(), json!("not-a-choice"));
        record
            .fields
            .insert("dataNegocioJuridico".to_string(), json!("2024-13-01"));

        let acts = load(&[record]).unwrap();
        let ato = &acts[0];
        assert!(ato.value("tipoServico").is_none());
        assert!(ato.value("dataNegocioJuridico").is_none());
        assert!(!ato.is_valid());
    }

    #[test]
    fn representative_lists_restore() {
        let mut record = record("B-102", "45");
        record.alienantes[0].representantes = Some(vec![crate::flatten::Representative {
            ni: CPF_B.to_string(),
        }]);

        let acts = load(&[record]).unwrap();
        let subject = acts[0].alienantes().get_by_ni(CPF_A).unwrap();
        assert_eq!(subject.representantes(), vec![CPF_B]);
        assert_eq!(subject.bool_value("indicadorRepresentante"), Some(true));
    }

    #[test]
    fn out_of_range_shares_are_dropped_not_fatal() {
        let mut record = record("B-102", "45");
        record.alienantes[0].participacao = 150.0;

        let acts = load(&[record]).unwrap();
        let imovel = acts[0].imoveis().get(0).unwrap();
        assert!(imovel.alienacao().get(CPF_A).is_none());
        // The subject itself still restores.
        assert!(acts[0].alienantes().get_by_ni(CPF_A).is_some());
    }
}
