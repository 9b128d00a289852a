//! The fixed catalog of annotation layer names.
//!
//! Every layer attached to an [`AnnotatedText`](crate::model::AnnotatedText)
//! is stored under one of these keys, and the key's canonical string is what
//! appears in the `attributes` object of the JSON form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AnnotextError, Result};

/// Symbolic name of an annotation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    Token,
    Sentence,
    EntityMention,
    ResolvedEntity,
    ScriptRegion,
    BaseNounPhrase,
    /// Language of the whole text (a single detection, not a list).
    LanguageDetection,
    LanguageDetectionRegions,
    TranslatedTokens,
    TranslatedData,
}

impl AttributeKey {
    const ALL: [AttributeKey; 10] = [
        AttributeKey::Token,
        AttributeKey::Sentence,
        AttributeKey::EntityMention,
        AttributeKey::ResolvedEntity,
        AttributeKey::ScriptRegion,
        AttributeKey::BaseNounPhrase,
        AttributeKey::LanguageDetection,
        AttributeKey::LanguageDetectionRegions,
        AttributeKey::TranslatedTokens,
        AttributeKey::TranslatedData,
    ];

    /// The canonical wire name of this key.
    pub fn key(&self) -> &'static str {
        match self {
            AttributeKey::Token => "token",
            AttributeKey::Sentence => "sentence",
            AttributeKey::EntityMention => "entityMention",
            AttributeKey::ResolvedEntity => "resolvedEntity",
            AttributeKey::ScriptRegion => "scriptRegion",
            AttributeKey::BaseNounPhrase => "baseNounPhrase",
            AttributeKey::LanguageDetection => "languageDetection",
            AttributeKey::LanguageDetectionRegions => "languageDetectionRegions",
            AttributeKey::TranslatedTokens => "translatedTokens",
            AttributeKey::TranslatedData => "translatedData",
        }
    }

    /// All keys, in catalog order.
    pub fn all() -> &'static [AttributeKey] {
        &Self::ALL
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AttributeKey {
    type Err = AnnotextError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|key| key.key() == s)
            .copied()
            .ok_or_else(|| AnnotextError::unknown_attribute_key(s))
    }
}

impl Serialize for AttributeKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for AttributeKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
