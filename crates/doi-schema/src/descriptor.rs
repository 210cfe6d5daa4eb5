use derive_more::{Display, FromStr};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{MapAccess, Visitor},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// DescriptorError
///

#[derive(Clone, Debug, ThisError)]
pub enum DescriptorError {
    #[error("entity type not found in schema: {name}")]
    UnknownEntity { name: String },

    #[error("field not found in schema for entity {entity}: {name}")]
    UnknownField { entity: String, name: String },
}

///
/// FieldKind
/// The JSON `type` tag of a schema field.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

///
/// FieldFormat
/// Extra value constraint layered on top of a kind.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
    /// ISO `YYYY-MM-DD`, must be a real calendar date.
    Date,
    /// Integral number strictly between 0 and 100,000,000.
    Int32,
}

impl FieldFormat {
    /// The kind a format is allowed to constrain.
    #[must_use]
    pub const fn applies_to(self) -> FieldKind {
        match self {
            Self::Date => FieldKind::String,
            Self::Int32 => FieldKind::Number,
        }
    }
}

///
/// ChoiceOption
/// One enumerated option of a choice field (`oneOf` entry).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChoiceOption {
    #[serde(rename = "const")]
    pub value: String,
    pub title: String,
}

///
/// FieldDescriptor
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FieldDescriptor {
    pub description: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,

    #[serde(default, rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<ChoiceOption>>,

    /// Upstream type tag carried for reference (e.g. `TipoServico`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl FieldDescriptor {
    /// Returns `true` if the field is an enumerated choice.
    #[must_use]
    pub const fn is_choice(&self) -> bool {
        self.one_of.is_some()
    }

    /// The human-readable label shown next to the field's input control.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.description
    }
}

///
/// EntityDescriptor
///
/// Field-name → descriptor map for one entity type, kept in document
/// order. Lookups are linear; entity types carry a few dozen fields.
///

#[derive(Clone, Debug, Default)]
pub struct EntityDescriptor {
    fields: Vec<(String, FieldDescriptor)>,
}

impl EntityDescriptor {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(ident, _)| ident == name)
            .map(|(_, descriptor)| descriptor)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate `(name, descriptor)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields
            .iter()
            .map(|(ident, descriptor)| (ident.as_str(), descriptor))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(ident, _)| ident.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// The schema document stores fields as a JSON object; order matters for
// rendering, so deserialize through a map visitor instead of a BTreeMap.
impl<'de> Deserialize<'de> for EntityDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = EntityDescriptor;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to field descriptors")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((ident, descriptor)) =
                    access.next_entry::<String, FieldDescriptor>()?
                {
                    fields.push((ident, descriptor));
                }

                Ok(EntityDescriptor { fields })
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

///
/// Registry
/// Entity-type → descriptor map for the whole schema document.
///

#[derive(Clone, Debug, Default)]
pub struct Registry {
    entities: Vec<(String, EntityDescriptor)>,
}

impl Registry {
    pub fn entity(&self, name: &str) -> Result<&EntityDescriptor, DescriptorError> {
        self.entities
            .iter()
            .find(|(ident, _)| ident == name)
            .map(|(_, descriptor)| descriptor)
            .ok_or_else(|| DescriptorError::UnknownEntity {
                name: name.to_string(),
            })
    }

    pub fn field(&self, entity: &str, name: &str) -> Result<&FieldDescriptor, DescriptorError> {
        self.entity(entity)?
            .get(name)
            .ok_or_else(|| DescriptorError::UnknownField {
                entity: entity.to_string(),
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityDescriptor)> {
        self.entities
            .iter()
            .map(|(ident, descriptor)| (ident.as_str(), descriptor))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntityMapVisitor;

        impl<'de> Visitor<'de> for EntityMapVisitor {
            type Value = Registry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entity names to field maps")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entities = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((ident, descriptor)) =
                    access.next_entry::<String, EntityDescriptor>()?
                {
                    entities.push((ident, descriptor));
                }

                Ok(Registry { entities })
            }
        }

        deserializer.deserialize_map(EntityMapVisitor)
    }
}

///
/// TESTS
///
