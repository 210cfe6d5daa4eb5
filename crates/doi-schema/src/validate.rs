use crate::descriptor::{FieldDescriptor, FieldKind, Registry};
use thiserror::Error as ThisError;

///
/// ValidateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("{entity}.{field}: oneOf must not be empty")]
    EmptyChoiceList { entity: String, field: String },

    #[error("{entity}.{field}: choice fields must be string-kinded")]
    ChoiceKindMismatch { entity: String, field: String },

    #[error("{entity}.{field}: format {format} does not apply to kind {kind}")]
    FormatKindMismatch {
        entity: String,
        field: String,
        format: String,
        kind: String,
    },

    #[error("{entity}.{field}: minLength {min} exceeds maxLength {max}")]
    LengthBounds {
        entity: String,
        field: String,
        min: usize,
        max: usize,
    },

    #[error("entity {entity} declares no fields")]
    EmptyEntity { entity: String },
}

/// Check descriptor coherence for the whole registry.
///
/// Runs once per process, before the first entity is constructed; a failure
/// here is a defect in the embedded document, not end-user input.
pub fn validate_registry(registry: &Registry) -> Result<(), ValidateError> {
    for (entity, descriptor) in registry.iter() {
        if descriptor.is_empty() {
            return Err(ValidateError::EmptyEntity {
                entity: entity.to_string(),
            });
        }
        for (field, field_descriptor) in descriptor.iter() {
            validate_field(entity, field, field_descriptor)?;
        }
    }

    Ok(())
}

fn validate_field(
    entity: &str,
    field: &str,
    descriptor: &FieldDescriptor,
) -> Result<(), ValidateError> {
    if let Some(options) = &descriptor.one_of {
        if options.is_empty() {
            return Err(ValidateError::EmptyChoiceList {
                entity: entity.to_string(),
                field: field.to_string(),
            });
        }
        if descriptor.kind != FieldKind::String {
            return Err(ValidateError::ChoiceKindMismatch {
                entity: entity.to_string(),
                field: field.to_string(),
            });
        }
    }

    if let Some(format) = descriptor.format
        && format.applies_to() != descriptor.kind
    {
        return Err(ValidateError::FormatKindMismatch {
            entity: entity.to_string(),
            field: field.to_string(),
            format: format.to_string(),
            kind: descriptor.kind.to_string(),
        });
    }

    if let (Some(min), Some(max)) = (descriptor.min_length, descriptor.max_length)
        && min > max
    {
        return Err(ValidateError::LengthBounds {
            entity: entity.to_string(),
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn field(json: &str) -> FieldDescriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn coherent_field_passes() {
        let descriptor = field(
            r#"{ "description": "d", "type": "string", "format": "date" }"#,
        );
        assert!(validate_field("Ato", "data", &descriptor).is_ok());
    }

    #[test]
    fn empty_choice_list_is_rejected() {
        let descriptor = field(
            r#"{ "description": "d", "type": "string", "oneOf": [] }"#,
        );
        assert_eq!(
            validate_field("Ato", "tipo", &descriptor),
            Err(ValidateError::EmptyChoiceList {
                entity: "Ato".into(),
                field: "tipo".into(),
            })
        );
    }

    #[test]
    fn format_on_wrong_kind_is_rejected() {
        let descriptor = field(
            r#"{ "description": "d", "type": "number", "format": "date" }"#,
        );
        assert!(matches!(
            validate_field("Imovel", "area", &descriptor),
            Err(ValidateError::FormatKindMismatch { .. })
        ));
    }

    #[test]
    fn inverted_length_bounds_are_rejected() {
        let descriptor = field(
            r#"{ "description": "d", "type": "string", "minLength": 9, "maxLength": 3 }"#,
        );
        assert!(matches!(
            validate_field("Imovel", "cep", &descriptor),
            Err(ValidateError::LengthBounds { min: 9, max: 3, .. })
        ));
    }
}
