//! View-model surface handed to the UI collaborator.
//!
//! The core never touches presentation; it only describes which input
//! control a field needs and what it currently holds. The collaborator is
//! expected to route change notifications back through `set`/`set_prop`.

use crate::value::Value;
use doi_schema::descriptor::ChoiceOption;
use serde::Serialize;

///
/// Control
/// Input control selected by descriptor shape.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    Select { options: Vec<ChoiceOption> },
    DateInput,
    Checkbox,
    NumberInput,
    TextInput,
}

///
/// FieldWidget
///

#[derive(Clone, Debug, Serialize)]
pub struct FieldWidget {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub control: Control,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}
