//! Translations attached to a text.
//!
//! Neither type covers a span of the source text, so they only carry the
//! extended-properties part of an attribute.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::attribute::{BaseAttribute, ExtendedProperties};

/// Token-by-token translations into one target language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    translations: Vec<String>,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

impl TranslatedTokens {
    /// Translations aligned with the token layer, one per token.
    pub fn new<I, S>(target_language: Option<String>, translations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TranslatedTokens {
            target_language,
            translations: translations.into_iter().map(Into::into).collect(),
            extended_properties: ExtendedProperties::new(),
        }
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }

    pub fn translations(&self) -> &[String] {
        &self.translations
    }

    pub fn with_extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extended_properties.insert(key.into(), value);
        self
    }
}

impl BaseAttribute for TranslatedTokens {
    fn extended_properties(&self) -> &ExtendedProperties {
        &self.extended_properties
    }
}

/// A translation of the whole text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_language: Option<String>,
    translation: String,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

impl TranslatedData {
    pub fn new<S: Into<String>>(target_language: Option<String>, translation: S) -> Self {
        TranslatedData {
            target_language,
            translation: translation.into(),
            extended_properties: ExtendedProperties::new(),
        }
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn with_extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extended_properties.insert(key.into(), value);
        self
    }
}

impl BaseAttribute for TranslatedData {
    fn extended_properties(&self) -> &ExtendedProperties {
        &self.extended_properties
    }
}
