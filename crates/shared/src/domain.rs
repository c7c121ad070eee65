use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ratio {
    pub name: String,
    pub value: String,
}

impl Ratio {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn display_line(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

/// Fundamental ratios in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundamentalRatios(Vec<Ratio>);

impl FundamentalRatios {
    pub fn new(ratios: Vec<Ratio>) -> Self {
        Self(ratios)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn display_lines(&self) -> Vec<String> {
        self.0.iter().map(Ratio::display_line).collect()
    }
}

impl FromIterator<Ratio> for FundamentalRatios {
    fn from_iter<I: IntoIterator<Item = Ratio>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for FundamentalRatios {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(entries
            .into_iter()
            .map(|(name, value)| {
                let value = display_value(&value);
                Ratio::new(name, value)
            })
            .collect())
    }
}

pub fn deserialize_display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.map(|value| display_value(&value)))
}
