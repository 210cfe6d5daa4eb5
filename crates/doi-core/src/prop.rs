use crate::{
    types::parse_iso_date,
    value::Value,
    view::{Control, FieldWidget},
};
use doi_schema::{
    build::registry,
    descriptor::{FieldDescriptor, FieldFormat},
};

/// Upper bound (exclusive) for `int32`-formatted numbers on the wire.
const INT32_LIMIT: f64 = 100_000_000.0;

///
/// Prop
///
/// One schema field instance: the descriptor that constrains it plus the
/// current value. A held value is always either absent or one that passes
/// [`Prop::validate`]; the only way around that is [`Prop::force`], which
/// exists for trusted (loaded) data.
///

#[derive(Clone, Debug)]
pub struct Prop {
    name: String,
    descriptor: &'static FieldDescriptor,
    value: Option<Value>,
}

impl Prop {
    /// Build a prop for `entity_name.prop_name`, initialized to no value.
    ///
    /// Unknown entity or field names are caller contract violations and
    /// fail fast.
    pub fn new(entity_name: &str, prop_name: &str) -> Result<Self, doi_schema::Error> {
        let descriptor = registry()?.field(entity_name, prop_name)?;

        Ok(Self {
            name: prop_name.to_string(),
            descriptor,
            value: None,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.descriptor.label()
    }

    #[must_use]
    pub const fn get(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` if the prop currently holds a value that passes its
    /// descriptor's constraints.
    #[must_use]
    pub fn holds_valid(&self) -> bool {
        self.value
            .as_ref()
            .is_some_and(|value| self.validate(value).is_some())
    }

    /// Store `validate(value)` — invalid input silently becomes no value.
    ///
    /// User input never errors here; data quality surfaces through the
    /// owning entity's completeness state instead.
    pub fn set(&mut self, value: Value) {
        self.value = self.validate(&value);
    }

    /// Store a raw value unchecked. Trusted programmatic population only.
    pub fn force(&mut self, value: Option<Value>) {
        self.value = value;
    }

    /// Check `value` against the descriptor, returning the accepted value
    /// or `None`. Pure; never errors.
    #[must_use]
    pub fn validate(&self, value: &Value) -> Option<Value> {
        if value.kind() != self.descriptor.kind {
            return None;
        }

        if let Some(options) = &self.descriptor.one_of {
            let accepted = value
                .as_text()
                .is_some_and(|text| options.iter().any(|option| option.value == text));
            return accepted.then(|| value.clone());
        }

        if let Some(text) = value.as_text() {
            let length = text.chars().count();
            if self.descriptor.max_length.is_some_and(|max| length > max) {
                return None;
            }
            if self.descriptor.min_length.is_some_and(|min| length < min) {
                return None;
            }
        }

        match self.descriptor.format {
            Some(FieldFormat::Date) => {
                let text = value.as_text()?;
                parse_iso_date(text)?;
            }
            Some(FieldFormat::Int32) => {
                let number = value.as_number()?;
                if number.fract() != 0.0 || number <= 0.0 || number >= INT32_LIMIT {
                    return None;
                }
            }
            None => {}
        }

        Some(value.clone())
    }

    /// The input control this field renders as, for the UI collaborator.
    #[must_use]
    pub fn widget(&self) -> FieldWidget {
        let control = if let Some(options) = &self.descriptor.one_of {
            Control::Select {
                options: options.clone(),
            }
        } else if self.descriptor.format == Some(FieldFormat::Date) {
            Control::DateInput
        } else {
            match self.descriptor.kind {
                doi_schema::descriptor::FieldKind::Boolean => Control::Checkbox,
                doi_schema::descriptor::FieldKind::Number => Control::NumberInput,
                doi_schema::descriptor::FieldKind::String => Control::TextInput,
            }
        };

        FieldWidget {
            name: self.name.clone(),
            label: self.label().to_string(),
            control,
            value: self.value.clone(),
        }
    }
}

///
/// TESTS
///
