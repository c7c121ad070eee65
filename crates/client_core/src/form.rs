use shared::protocol::FormPayload;

use crate::error::FormError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: Option<String>,
    pub value: String,
}

impl FormField {
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    pub fn unnamed(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FormField>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField::named(name, value));
        self
    }

    pub fn push(&mut self, field: FormField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn parse_fields<I, T>(raw: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut form = Self::new();
        for entry in raw {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    form.push(FormField::named(name, value));
                }
                _ => return Err(FormError::MalformedField(entry.to_string())),
            }
        }
        Ok(form)
    }
}

pub fn serialize(form: &Form) -> FormPayload {
    form.fields
        .iter()
        .filter_map(|field| {
            field
                .name
                .as_deref()
                .map(|name| (name, field.value.as_str()))
        })
        .collect()
}
