use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{deserialize_display_text, FundamentalRatios};

pub const ANALYSIS_ENDPOINT: &str = "/perform_analysis";
pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload(BTreeMap<String, String>);

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        for (name, value) in iter {
            payload.insert(name, value);
        }
        payload
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponsePayload {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisData {
    #[serde(default, deserialize_with = "deserialize_display_text")]
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "deserialize_display_text")]
    pub advice: Option<String>,
    #[serde(default)]
    pub fundamental_ratios: FundamentalRatios,
}
