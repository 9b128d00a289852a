//! Plain span annotations: sentences, base noun phrases and script regions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::attribute::{ExtendedProperties, impl_attribute};

/// A sentence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    start_offset: usize,
    end_offset: usize,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

/// A base (non-recursive) noun phrase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseNounPhrase {
    start_offset: usize,
    end_offset: usize,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

/// A run of text in a single writing system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRegion {
    start_offset: usize,
    end_offset: usize,
    /// ISO 15924 code, e.g. `Latn` or `Arab`.
    script: String,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

impl_attribute!(Sentence, BaseNounPhrase, ScriptRegion);

impl Sentence {
    pub fn new(start_offset: usize, end_offset: usize) -> Self {
        Sentence {
            start_offset,
            end_offset,
            extended_properties: ExtendedProperties::new(),
        }
    }

    /// Same span with one more extended property.
    pub fn with_extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extended_properties.insert(key.into(), value);
        self
    }
}

impl BaseNounPhrase {
    pub fn new(start_offset: usize, end_offset: usize) -> Self {
        BaseNounPhrase {
            start_offset,
            end_offset,
            extended_properties: ExtendedProperties::new(),
        }
    }

    pub fn with_extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extended_properties.insert(key.into(), value);
        self
    }
}

impl ScriptRegion {
    pub fn new<S: Into<String>>(start_offset: usize, end_offset: usize, script: S) -> Self {
        ScriptRegion {
            start_offset,
            end_offset,
            script: script.into(),
            extended_properties: ExtendedProperties::new(),
        }
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn with_extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extended_properties.insert(key.into(), value);
        self
    }
}
